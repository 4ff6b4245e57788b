use crate::carousel::CarouselController;
use crate::config::{SiteConfig, DEFAULT_LOG_LEVEL};
use crate::content::{LegalBlock, ProjectCaseStudy, ServiceIcon, Site};
use crate::pointer::{is_interactive, ElementChain, Indicator, PointerFollower};
use crate::reveal::{grid_stagger_delay_ms, stagger_delay_ms, Motion, Reveal};
use crate::rotation::Rotation;
use crate::router::{Action, LinkClick, Router, View};
use gloo_events::EventListener;
use gloo_render::{request_animation_frame, AnimationFrame};
use gloo_timers::callback::{Interval, Timeout};
use std::cell::{Cell, RefCell};
use std::ops::Deref;
use std::rc::Rc;
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{
    window, Document, Element, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, MouseEvent,
};
use yew::prelude::*;

const ROOT_ID: &str = "app";
const CONTACT_ANCHOR: &str = "contact";
const PORTFOLIO_COLUMNS: usize = 3;
const HERO_LEAD_IN_MS: u32 = 200;
const HERO_WORD_STAGGER_MS: u32 = 40;
const REASON_STAGGER_MS: u32 = 200;
const GALLERY_STAGGER_MS: u32 = 100;
const TAG_STAGGER_MS: u32 = 50;
const TICKER_REPEAT: usize = 3;
const DEFAULT_FRAME_SECONDS: f64 = 1.0 / 60.0;

#[derive(Clone)]
struct SiteHandle(Rc<Site>);

impl PartialEq for SiteHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for SiteHandle {
    type Target = Site;

    fn deref(&self) -> &Site {
        &self.0
    }
}

#[derive(Clone, PartialEq)]
struct RevealSettings {
    root_margin: String,
    stagger_ms: u32,
}

impl RevealSettings {
    fn from_config(config: &SiteConfig) -> Self {
        Self {
            root_margin: config.reveal_root_margin(),
            stagger_ms: config.reveal_stagger_ms,
        }
    }
}

impl Default for RevealSettings {
    fn default() -> Self {
        Self::from_config(&SiteConfig::default())
    }
}

fn viewport_size() -> (f64, f64) {
    let Some(win) = window() else {
        return (1280.0, 720.0);
    };

    let width = win
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(1280.0);
    let height = win
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(720.0);

    (width, height)
}

fn prefers_reduced_motion() -> bool {
    window()
        .and_then(|w| {
            w.match_media("(prefers-reduced-motion: reduce)")
                .ok()
                .flatten()
        })
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

fn current_hash() -> String {
    window()
        .and_then(|w| w.location().hash().ok())
        .unwrap_or_default()
}

fn sync_location_hash(view: &View) {
    if View::from_hash(&current_hash()).unwrap_or_default() == *view {
        return;
    }

    if let Some(win) = window() {
        if win.location().set_hash(&view.to_hash()).is_err() {
            log::warn!("could not update location hash for {view:?}");
        }
    }
}

fn scroll_to_top() {
    if let Some(win) = window() {
        win.scroll_to_with_x_and_y(0.0, 0.0);
    }
}

fn scroll_to_anchor(anchor: &str) {
    let target = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(anchor));

    match target {
        Some(element) => element.scroll_into_view(),
        None => scroll_to_top(),
    }
}

fn set_meta_content(document: &Document, selector: &str, content: &str) {
    if let Ok(Some(meta)) = document.query_selector(selector) {
        let _ = meta.set_attribute("content", content);
    }
}

fn apply_document_meta(site: &Site, view: &View) {
    let meta = site.page_meta(view);
    let Some(document) = window().and_then(|w| w.document()) else {
        return;
    };

    document.set_title(&meta.title);
    set_meta_content(&document, "meta[name=\"description\"]", &meta.description);
    set_meta_content(&document, "meta[property=\"og:title\"]", &meta.title);
    set_meta_content(&document, "meta[property=\"og:description\"]", &meta.description);
    set_meta_content(&document, "meta[property=\"og:image\"]", &meta.image);
}

struct DomElement(Element);

impl ElementChain for DomElement {
    fn tag_name(&self) -> String {
        self.0.tag_name()
    }

    fn parent(&self) -> Option<Self> {
        self.0.parent_element().map(Self)
    }
}

struct RevealObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

impl Drop for RevealObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// `on_entry` receives each intersection measurement and returns true once
/// observation can stop.
fn observe_reveal(
    element: &Element,
    root_margin: &str,
    mut on_entry: impl FnMut(bool) -> bool + 'static,
) -> Option<RevealObserver> {
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            let intersecting = entries
                .iter()
                .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                .any(|entry| entry.is_intersecting());

            if on_entry(intersecting) {
                observer.disconnect();
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_root_margin(root_margin);

    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options).ok()?;
    observer.observe(element);

    Some(RevealObserver {
        observer,
        _callback: callback,
    })
}

#[hook]
fn use_reveal(node: NodeRef) -> bool {
    let settings = use_context::<RevealSettings>().unwrap_or_default();
    let revealed = use_state_eq(|| false);
    let machine = use_mut_ref(Reveal::new);

    {
        let revealed = revealed.clone();
        use_effect_with(node, move |node| {
            let observer = node.cast::<Element>().and_then(|element| {
                let machine = machine.clone();
                let revealed = revealed.clone();
                observe_reveal(&element, &settings.root_margin, move |intersecting| {
                    let fired = machine.borrow_mut().observe(intersecting);
                    if fired {
                        revealed.set(true);
                    }
                    fired
                })
            });

            if observer.is_none() && machine.borrow_mut().observe(true) {
                log::debug!("intersection observer unavailable, revealing immediately");
                revealed.set(true);
            }

            move || drop(observer)
        });
    }

    *revealed
}

#[derive(Properties, PartialEq)]
struct RevealOnViewProps {
    motion: Motion,
    #[prop_or(800)]
    duration_ms: u32,
    #[prop_or_default]
    delay_ms: u32,
    #[prop_or_default]
    class: Classes,
    #[prop_or_default]
    children: Html,
}

#[function_component(RevealOnView)]
fn reveal_on_view(props: &RevealOnViewProps) -> Html {
    let node = use_node_ref();
    let revealed = use_reveal(node.clone());

    html! {
        <div
            ref={node}
            class={props.class.clone()}
            style={props.motion.style(revealed, props.duration_ms, props.delay_ms)}
        >
            {props.children.clone()}
        </div>
    }
}

#[derive(Clone, Debug, PartialEq)]
struct RouteState {
    router: Router,
    anchor: Option<String>,
}

enum RouteMsg {
    Act(Action),
    Sync(View),
    Anchor(String),
}

impl RouteState {
    fn from_location() -> Self {
        Self {
            router: Router::new(View::from_hash(&current_hash()).unwrap_or_default()),
            anchor: None,
        }
    }
}

impl Reducible for RouteState {
    type Action = RouteMsg;

    fn reduce(self: Rc<Self>, message: RouteMsg) -> Rc<Self> {
        let mut router = self.router.clone();
        let (transition, anchor) = match message {
            RouteMsg::Act(action) => (router.apply(action), None),
            RouteMsg::Sync(view) => (router.sync_to(view), None),
            RouteMsg::Anchor(anchor) => {
                if router.current().is_home() {
                    return self;
                }
                (router.sync_to(View::Home), Some(anchor))
            }
        };

        let Some(transition) = transition else {
            return self;
        };
        log::debug!("route {:?} -> {:?}", transition.from, transition.to);

        Rc::new(Self { router, anchor })
    }
}

#[derive(Properties, PartialEq)]
struct AppProps {
    site: SiteHandle,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let site = props.site.clone();
    let route = use_reducer(RouteState::from_location);
    let previous_view = use_mut_ref(|| None::<View>);

    {
        let dispatcher = route.dispatcher();
        use_effect_with((), move |_| {
            let listener = window().map(|win| {
                EventListener::new(&win, "hashchange", move |_| {
                    let hash = current_hash();
                    match View::from_hash(&hash) {
                        Some(view) => dispatcher.dispatch(RouteMsg::Sync(view)),
                        None => dispatcher.dispatch(RouteMsg::Anchor(
                            hash.trim_start_matches('#').to_string(),
                        )),
                    }
                })
            });
            move || drop(listener)
        });
    }

    {
        let site = site.clone();
        use_effect_with(
            (route.router.current().clone(), route.anchor.clone()),
            move |(view, anchor)| {
                sync_location_hash(view);
                apply_document_meta(&site, view);

                let changed = previous_view.borrow_mut().replace(view.clone()).is_some();
                match anchor {
                    Some(anchor) => scroll_to_anchor(anchor),
                    None if changed => scroll_to_top(),
                    None => {}
                }
                || ()
            },
        );
    }

    let on_navigate = {
        let route = route.clone();
        Callback::from(move |action: Action| route.dispatch(RouteMsg::Act(action)))
    };

    let page = match route.router.current() {
        View::Home => html! {
            <Home site={site.clone()} on_navigate={on_navigate} />
        },
        View::ProjectDetail(id) => html! {
            <ProjectDetail
                key={id.clone()}
                site={site.clone()}
                id={AttrValue::from(id.clone())}
                on_navigate={on_navigate}
            />
        },
        View::LegalNotice => html! {
            <LegalNoticePage site={site.clone()} on_navigate={on_navigate} />
        },
    };

    html! {
        <ContextProvider<RevealSettings> context={RevealSettings::from_config(&site.config)}>
            {page}
        </ContextProvider<RevealSettings>>
    }
}

#[derive(Properties, PartialEq)]
struct PageProps {
    site: SiteHandle,
    on_navigate: Callback<Action>,
}

#[derive(Properties, PartialEq)]
struct SectionProps {
    site: SiteHandle,
}

fn navigate_on_click(on_navigate: &Callback<Action>, action: Action) -> Callback<MouseEvent> {
    let on_navigate = on_navigate.clone();
    Callback::from(move |event: MouseEvent| {
        event.prevent_default();
        on_navigate.emit(action.clone());
    })
}

fn follow_link_on_click(on_navigate: &Callback<Action>, action: Action) -> Callback<MouseEvent> {
    let on_navigate = on_navigate.clone();
    Callback::from(move |event: MouseEvent| {
        let click = LinkClick {
            button: event.button(),
            ctrl: event.ctrl_key(),
            meta: event.meta_key(),
            shift: event.shift_key(),
            alt: event.alt_key(),
        };
        if !click.stays_in_app() {
            return;
        }

        event.prevent_default();
        on_navigate.emit(action.clone());
    })
}

#[function_component(Home)]
fn home(props: &PageProps) -> Html {
    html! {
        <div class="page page-home">
            <CustomCursor site={props.site.clone()} />
            <nav class="site-nav">
                <div class="brand">{props.site.copy.identity.name.to_uppercase()}</div>
                <a class="nav-link" href={format!("#{CONTACT_ANCHOR}")}>{"Contact"}</a>
            </nav>
            <div class="noise" aria-hidden="true"></div>
            <main>
                <Hero site={props.site.clone()} />
                <About site={props.site.clone()} />
                <TechStackTicker site={props.site.clone()} />
                <ServicesCarousel site={props.site.clone()} />
                <WhyMe site={props.site.clone()} />
                <PortfolioGrid site={props.site.clone()} on_navigate={props.on_navigate.clone()} />
                <TestimonialCarousel site={props.site.clone()} />
                <ContactSection site={props.site.clone()} on_navigate={props.on_navigate.clone()} />
            </main>
        </div>
    }
}

struct CursorLoop {
    follower: RefCell<PointerFollower>,
    indicator: UseStateHandle<Indicator>,
    frame: RefCell<Option<AnimationFrame>>,
    last_timestamp: Cell<Option<f64>>,
    reduced_motion: bool,
}

impl CursorLoop {
    fn wake(self: &Rc<Self>) {
        if self.frame.borrow().is_some() {
            return;
        }

        let this = Rc::clone(self);
        let frame = request_animation_frame(move |timestamp| this.on_frame(timestamp));
        *self.frame.borrow_mut() = Some(frame);
    }

    fn on_frame(self: &Rc<Self>, timestamp: f64) {
        let _finished = self.frame.borrow_mut().take();

        let seconds = self
            .last_timestamp
            .replace(Some(timestamp))
            .map(|last| (timestamp - last) / 1_000.0)
            .unwrap_or(DEFAULT_FRAME_SECONDS);

        let moving = {
            let mut follower = self.follower.borrow_mut();
            if self.reduced_motion {
                follower.snap();
                false
            } else {
                follower.tick(seconds)
            }
        };
        self.indicator.set(self.follower.borrow().indicator());

        if moving {
            self.wake();
        } else {
            self.last_timestamp.set(None);
        }
    }

    fn stop(&self) {
        self.frame.borrow_mut().take();
    }
}

#[function_component(CustomCursor)]
fn custom_cursor(props: &SectionProps) -> Html {
    let config = &props.site.config;
    let indicator = use_state({
        let config = config.clone();
        move || PointerFollower::new(&config).indicator()
    });

    {
        let indicator = indicator.clone();
        let config = config.clone();
        use_effect_with((), move |_| {
            let cursor = Rc::new(CursorLoop {
                follower: RefCell::new(PointerFollower::new(&config)),
                indicator,
                frame: RefCell::new(None),
                last_timestamp: Cell::new(None),
                reduced_motion: prefers_reduced_motion(),
            });

            let listeners = window()
                .map(|win| {
                    let on_move = Rc::clone(&cursor);
                    let on_over = Rc::clone(&cursor);
                    vec![
                        EventListener::new(&win, "mousemove", move |event| {
                            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                                return;
                            };
                            let (x, y) = (f64::from(event.client_x()), f64::from(event.client_y()));
                            on_move.follower.borrow_mut().pointer_move(x, y);
                            on_move.wake();
                        }),
                        EventListener::new(&win, "mouseover", move |event| {
                            let interactive = event
                                .target()
                                .and_then(|target| target.dyn_into::<Element>().ok())
                                .map(|element| is_interactive(&DomElement(element)))
                                .unwrap_or(false);
                            on_over.follower.borrow_mut().pointer_over(interactive);
                            on_over.wake();
                        }),
                    ]
                })
                .unwrap_or_default();

            move || {
                drop(listeners);
                cursor.stop();
            }
        });
    }

    html! {
        <div
            class={classes!("cursor", indicator.filled.then_some("is-hovering"))}
            style={indicator.style(config.cursor_size_px)}
            aria-hidden="true"
        />
    }
}

#[function_component(Hero)]
fn hero(props: &SectionProps) -> Html {
    let identity = &props.site.copy.identity;
    let words = props
        .site
        .copy
        .hero
        .words()
        .enumerate()
        .map(|(index, word)| {
            let delay = HERO_LEAD_IN_MS + stagger_delay_ms(index, HERO_WORD_STAGGER_MS);
            html! {
                <span key={index.to_string()} class="hero-word" style={format!("animation-delay: {delay}ms;")}>
                    {word}
                </span>
            }
        })
        .collect::<Html>();

    html! {
        <section class="hero">
            <h1 class="hero-headline">{words}</h1>
            <div class="hero-signature">
                <span class="accent">{identity.name.clone()}</span>
                <span class="muted">{identity.role.clone()}</span>
                <span class="muted">{identity.location.clone()}</span>
            </div>
            <div class="hero-arrow" aria-hidden="true">{"↓"}</div>
        </section>
    }
}

#[function_component(About)]
fn about(props: &SectionProps) -> Html {
    let node = use_node_ref();
    let revealed = use_reveal(node.clone());
    let about = &props.site.copy.about;

    html! {
        <section ref={node} class="about">
            <div class="about-portrait" style={Motion::Wipe.style(revealed, 1000, 0)}>
                <img src={about.portrait_url.clone()} alt={props.site.copy.identity.name.clone()} />
            </div>
            <div class="about-copy">
                <h2 style={Motion::Slide(50.0).style(revealed, 800, 200)}>{about.heading.clone()}</h2>
                <div class="about-text" style={Motion::Rise(20.0).style(revealed, 800, 400)}>
                    { for about.paragraphs.iter().map(|paragraph| html! {
                        <p>
                            if let Some(highlight) = &paragraph.highlight {
                                <span class="accent">{highlight.clone()}</span>{" "}
                            }
                            {paragraph.text.clone()}
                        </p>
                    }) }
                </div>
                <div class="about-stats" style={Motion::Fade.style(revealed, 800, 600)}>
                    { for about.stats.iter().map(|stat| html! {
                        <div class="stat">
                            <div class="stat-value">{stat.value.clone()}</div>
                            <div class="stat-label">{stat.label.clone()}</div>
                        </div>
                    }) }
                </div>
            </div>
        </section>
    }
}

#[function_component(TechStackTicker)]
fn tech_stack_ticker(props: &SectionProps) -> Html {
    let stack = &props.site.copy.tech_stack;
    let repeated = stack.items.len() * TICKER_REPEAT;

    html! {
        <section class="tech-stack">
            <div class="tech-stack-intro">
                <p class="eyebrow">{stack.eyebrow.clone()}</p>
                <h3>{format!("{} ", stack.lead)}<span class="bright">{stack.highlight.clone()}</span>{"."}</h3>
            </div>
            <div class="ticker">
                <div class="ticker-track">
                    { for stack.items.iter().cycle().take(repeated).enumerate().map(|(index, tech)| html! {
                        <div key={index.to_string()} class="ticker-item">
                            <img src={tech.logo_url.clone()} alt={tech.name.clone()} loading="lazy" />
                            <span>{tech.name.clone()}</span>
                        </div>
                    }) }
                </div>
            </div>
        </section>
    }
}

fn service_glyph(icon: ServiceIcon) -> &'static str {
    match icon {
        ServiceIcon::Layers => "▤",
        ServiceIcon::ShoppingCart => "⛟",
        ServiceIcon::Code => "</>",
        ServiceIcon::PenTool => "✒",
        ServiceIcon::Settings => "⚙",
        ServiceIcon::Shield => "⛨",
    }
}

#[function_component(ServicesCarousel)]
fn services_carousel(props: &SectionProps) -> Html {
    let section = use_node_ref();
    let strip = use_node_ref();
    let controller = use_mut_ref(CarouselController::new);
    let offset = use_state_eq(|| 0.0_f64);
    let settle_delay_ms = props.site.config.carousel_settle_delay_ms;

    {
        let offset = offset.clone();
        use_effect_with((section.clone(), strip.clone()), move |(section, strip)| {
            let section = section.clone();
            let strip = strip.clone();

            let update_scroll: Rc<dyn Fn()> = Rc::new({
                let controller = controller.clone();
                let offset = offset.clone();
                move || {
                    let Some(element) = section.cast::<Element>() else {
                        return;
                    };
                    let rect = element.get_bounding_client_rect();
                    let (_, viewport_height) = viewport_size();
                    let mut controller = controller.borrow_mut();
                    controller.scroll(rect.top(), rect.height(), viewport_height);
                    offset.set(controller.offset());
                }
            });

            let update_width: Rc<dyn Fn()> = Rc::new({
                let update_scroll = Rc::clone(&update_scroll);
                move || {
                    let Some(element) = strip.cast::<Element>() else {
                        return;
                    };
                    let (viewport_width, _) = viewport_size();
                    let content_width = f64::from(element.scroll_width());
                    let mut controller = controller.borrow_mut();
                    if controller.measure(content_width, viewport_width) {
                        log::debug!("services carousel travel is now {:.0}px", controller.range());
                    }
                    drop(controller);
                    update_scroll();
                }
            });

            update_width();

            let listeners = window()
                .map(|win| {
                    let on_resize = Rc::clone(&update_width);
                    let on_load = Rc::clone(&update_width);
                    let on_scroll = Rc::clone(&update_scroll);
                    vec![
                        EventListener::new(&win, "resize", move |_| on_resize()),
                        EventListener::new(&win, "load", move |_| on_load()),
                        EventListener::new(&win, "scroll", move |_| on_scroll()),
                    ]
                })
                .unwrap_or_default();

            let settle = Timeout::new(settle_delay_ms, move || update_width());

            move || {
                drop(listeners);
                drop(settle);
            }
        });
    }

    let services = &props.site.copy.services;

    html! {
        <section ref={section} class="services">
            <div class="services-pin">
                <div
                    ref={strip}
                    class="services-strip"
                    style={format!("transform: translate3d({:.2}px, 0, 0);", *offset)}
                >
                    <div class="services-intro">
                        <h2>{services.heading.clone()}<br /><span class="accent">{services.accent.clone()}</span></h2>
                        <p class="muted">{services.hint.clone()}</p>
                    </div>
                    { for services.cards.iter().map(|card| html! {
                        <article key={card.title.clone()} class="service-card">
                            <div class="service-icon" aria-hidden="true">{service_glyph(card.icon)}</div>
                            <div>
                                <h3>{card.title.clone()}</h3>
                                <p class="muted">{card.description.clone()}</p>
                            </div>
                            <div class="service-arrow" aria-hidden="true">{"→"}</div>
                        </article>
                    }) }
                </div>
            </div>
        </section>
    }
}

#[function_component(WhyMe)]
fn why_me(props: &SectionProps) -> Html {
    let reasons = &props.site.copy.reasons;

    html! {
        <section class="why-me">
            <div class="narrow">
                <h2>
                    { for reasons.heading.iter().enumerate().map(|(index, line)| html! {
                        <>
                            if index > 0 { <br /> }
                            {line.clone()}
                        </>
                    }) }
                </h2>
                <div class="reasons">
                    { for reasons.items.iter().enumerate().map(|(index, reason)| html! {
                        <RevealOnView
                            key={index.to_string()}
                            class={classes!("reason")}
                            motion={Motion::Slide(-20.0)}
                            duration_ms={600}
                            delay_ms={stagger_delay_ms(index, REASON_STAGGER_MS)}
                        >
                            {reason.clone()}
                        </RevealOnView>
                    }) }
                </div>
                <p class="closing accent">{reasons.closing.clone()}</p>
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct ProjectCardProps {
    project: ProjectCaseStudy,
    index: usize,
    on_navigate: Callback<Action>,
}

#[function_component(ProjectCard)]
fn project_card(props: &ProjectCardProps) -> Html {
    let settings = use_context::<RevealSettings>().unwrap_or_default();
    let project = &props.project;
    let onclick =
        follow_link_on_click(&props.on_navigate, Action::OpenProject(project.id.clone()));

    html! {
        <a class="project-card" href={View::ProjectDetail(project.id.clone()).to_hash()} onclick={onclick}>
            <RevealOnView
                motion={Motion::Rise(50.0)}
                delay_ms={grid_stagger_delay_ms(props.index, PORTFOLIO_COLUMNS, settings.stagger_ms)}
            >
                <div class="project-cover">
                    <img src={project.cover_image().to_string()} alt={project.title.clone()} loading="lazy" />
                </div>
                <div class="project-caption">
                    <div>
                        <h3>{project.title.clone()}</h3>
                        <p class="eyebrow muted">{project.category.clone()}</p>
                    </div>
                    <span class="project-arrow accent" aria-hidden="true">{"→"}</span>
                </div>
            </RevealOnView>
        </a>
    }
}

#[function_component(PortfolioGrid)]
fn portfolio_grid(props: &PageProps) -> Html {
    let portfolio = &props.site.copy.portfolio;

    html! {
        <section id="portfolio" class="portfolio">
            <h2>{portfolio.heading.clone()}</h2>
            <div class="portfolio-grid">
                { for props.site.portfolio().enumerate().map(|(index, project)| html! {
                    <ProjectCard
                        key={project.id.clone()}
                        project={project.clone()}
                        index={index}
                        on_navigate={props.on_navigate.clone()}
                    />
                }) }
            </div>
            <div class="portfolio-more">
                <a class="pill-link" href={portfolio.archive_url.clone()} target="_blank" rel="noopener noreferrer">
                    {portfolio.archive_label.clone()}
                    <span class="external-mark" aria-hidden="true">{"↗"}</span>
                </a>
            </div>
        </section>
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct RotationState(Option<Rotation>);

enum RotationMsg {
    Tick,
    Select(usize),
}

impl Reducible for RotationState {
    type Action = RotationMsg;

    fn reduce(self: Rc<Self>, message: RotationMsg) -> Rc<Self> {
        let Some(mut rotation) = self.0 else {
            return self;
        };

        match message {
            RotationMsg::Tick => {
                rotation.tick();
            }
            RotationMsg::Select(index) => {
                if !rotation.select(index) {
                    return self;
                }
            }
        }

        Rc::new(Self(Some(rotation)))
    }
}

#[function_component(TestimonialCarousel)]
fn testimonial_carousel(props: &SectionProps) -> Html {
    let testimonials = &props.site.copy.testimonials;
    let rotation = use_reducer({
        let len = testimonials.items.len();
        move || RotationState(Rotation::new(len))
    });

    {
        let dispatcher = rotation.dispatcher();
        use_effect_with(props.site.config.testimonial_interval_ms, move |interval_ms| {
            let interval =
                Interval::new(*interval_ms, move || dispatcher.dispatch(RotationMsg::Tick));
            move || drop(interval)
        });
    }

    let active = rotation.0.map(|rotation| rotation.active()).unwrap_or_default();
    let Some(current) = testimonials.items.get(active) else {
        return html! {};
    };

    html! {
        <section class="testimonials">
            <div class="star accent" aria-hidden="true">{"★"}</div>
            <div class="quote-frame">
                <blockquote key={active.to_string()} class="quote">
                    <p>{format!("« {} »", current.quote)}</p>
                    <cite class="accent">{format!("— {}, {}", current.author, testimonials.year)}</cite>
                </blockquote>
            </div>
            <div class="quote-dots">
                { for (0..testimonials.items.len()).map(|index| {
                    let rotation = rotation.clone();
                    let onclick = Callback::from(move |_: MouseEvent| {
                        rotation.dispatch(RotationMsg::Select(index))
                    });
                    html! {
                        <button
                            key={index.to_string()}
                            type="button"
                            class={classes!("quote-dot", (index == active).then_some("is-active"))}
                            aria-label={format!("Témoignage {}", index + 1)}
                            aria-pressed={(index == active).to_string()}
                            onclick={onclick}
                        />
                    }
                }) }
            </div>
        </section>
    }
}

#[function_component(ContactSection)]
fn contact_section(props: &PageProps) -> Html {
    let contact = &props.site.copy.contact;
    let on_legal = follow_link_on_click(&props.on_navigate, Action::OpenLegalNotice);

    html! {
        <section id={CONTACT_ANCHOR} class="contact">
            <div class="narrow-left">
                <h2 class="contact-heading">{contact.heading.clone()}</h2>
                <p class="muted lead">{contact.intro.clone()}</p>
                <div class="contact-links">
                    <a class="pill-link big" href={contact.whatsapp_url.clone()} target="_blank" rel="noopener noreferrer">
                        <span aria-hidden="true">{"☎"}</span>
                        <span>{contact.phone_label.clone()}</span>
                    </a>
                    <a class="pill-link big" href={contact.email_url.clone()}>
                        <span aria-hidden="true">{"✉"}</span>
                        <span>{contact.email_label.clone()}</span>
                    </a>
                </div>
                <p class="response-note muted"><span class="pulse" aria-hidden="true"></span>{contact.response_note.clone()}</p>
            </div>
            <footer class="site-footer">
                <div>
                    { for contact.footer.iter().map(|line| html! { <p>{line.clone()}</p> }) }
                </div>
                <a class="footer-link" href={View::LegalNotice.to_hash()} onclick={on_legal}>
                    {contact.legal_label.clone()}
                </a>
            </footer>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct ProjectDetailProps {
    site: SiteHandle,
    id: AttrValue,
    on_navigate: Callback<Action>,
}

#[function_component(ProjectDetail)]
fn project_detail(props: &ProjectDetailProps) -> Html {
    let on_back = navigate_on_click(&props.on_navigate, Action::Back);

    match props.site.projects.lookup(&props.id) {
        Some(project) => html! {
            <CaseStudy project={project.clone()} on_back={on_back} />
        },
        None => html! {
            <div class="page page-centered">
                <div class="not-found">
                    <h1>{"Projet non trouvé"}</h1>
                    <button type="button" class="back-link accent" onclick={on_back}>
                        <span aria-hidden="true">{"← "}</span>{"Retour à l'accueil"}
                    </button>
                </div>
            </div>
        },
    }
}

#[derive(Properties, PartialEq)]
struct CaseStudyProps {
    project: ProjectCaseStudy,
    on_back: Callback<MouseEvent>,
}

#[function_component(CaseStudy)]
fn case_study(props: &CaseStudyProps) -> Html {
    let project = &props.project;

    html! {
        <div class="page page-detail">
            <div class="detail-back">
                <button type="button" class="back-link" onclick={props.on_back.clone()}>
                    <span aria-hidden="true">{"← "}</span>{"Retour"}
                </button>
            </div>

            <section class="detail-hero">
                <div class="detail-hero-inner">
                    <div class="eyebrow accent">{project.category.clone()}</div>
                    <h1>{project.title.clone()}</h1>
                    <p class="muted lead">{project.subtitle.clone()}</p>
                    <div class="detail-facts">
                        <div>
                            <p class="eyebrow muted">{"Client"}</p>
                            <p>{project.client.clone()}</p>
                        </div>
                        <div>
                            <p class="eyebrow muted">{"Date"}</p>
                            <p>{project.date.clone()}</p>
                        </div>
                        if project.has_live_site() {
                            <a class="pill-link" href={project.live_url.clone()} target="_blank" rel="noopener noreferrer">
                                {"Voir le site"}
                                <span class="external-mark" aria-hidden="true">{"↗"}</span>
                            </a>
                        }
                    </div>
                </div>
            </section>

            <section class="detail-block">
                <RevealOnView class={classes!("detail-cover")} motion={Motion::Grow(0.95)}>
                    <img src={project.cover_image().to_string()} alt={project.title.clone()} />
                </RevealOnView>
            </section>

            <section class="detail-block alt">
                <RevealOnView class={classes!("narrow")} motion={Motion::Slide(-20.0)}>
                    <h2>{"Le défi"}</h2>
                    <div class="narrative">{project.challenge.clone()}</div>
                </RevealOnView>
            </section>

            <section class="detail-block">
                <RevealOnView class={classes!("narrow")} motion={Motion::Slide(-20.0)}>
                    <h2>{"Comment j'ai résolu le problème"}</h2>
                    <div class="narrative">{project.solution.clone()}</div>
                </RevealOnView>
            </section>

            <section class="detail-block alt">
                <div class="wide">
                    <h2>{"Résultat final"}</h2>
                    <div class="gallery">
                        { for project.images.iter().enumerate().map(|(index, image)| html! {
                            <RevealOnView
                                key={image.clone()}
                                class={classes!("gallery-item")}
                                motion={Motion::Rise(20.0)}
                                delay_ms={stagger_delay_ms(index, GALLERY_STAGGER_MS)}
                            >
                                <img src={image.clone()} alt={format!("{} - {}", project.title, index + 1)} loading="lazy" />
                            </RevealOnView>
                        }) }
                    </div>
                </div>
            </section>

            <section class="detail-block">
                <div class="narrow">
                    <h2>{"Les résultats"}</h2>
                    <div class="results">
                        { for project.results.iter().enumerate().map(|(index, result)| html! {
                            <RevealOnView
                                key={index.to_string()}
                                class={classes!("result-card")}
                                motion={Motion::Rise(20.0)}
                                duration_ms={600}
                                delay_ms={stagger_delay_ms(index, GALLERY_STAGGER_MS)}
                            >
                                <span class="accent" aria-hidden="true">{"✓"}</span>
                                <div>
                                    <div class="result-metric accent">{result.metric.clone()}</div>
                                    <p class="muted">{result.description.clone()}</p>
                                </div>
                            </RevealOnView>
                        }) }
                    </div>
                </div>
            </section>

            <section class="detail-block alt">
                <RevealOnView class={classes!("narrow", "reflection")} motion={Motion::Slide(-20.0)}>
                    <h2>{"Ce que ce projet m'a enseigné"}</h2>
                    <p class="narrative">{project.reflection.clone()}</p>
                </RevealOnView>
            </section>

            <section class="detail-block">
                <div class="narrow">
                    <h2>{"Stack technique"}</h2>
                    <div class="tags">
                        { for project.technologies.iter().enumerate().map(|(index, tech)| html! {
                            <RevealOnView
                                key={tech.clone()}
                                class={classes!("tag")}
                                motion={Motion::Grow(0.8)}
                                duration_ms={400}
                                delay_ms={stagger_delay_ms(index, TAG_STAGGER_MS)}
                            >
                                {tech.clone()}
                            </RevealOnView>
                        }) }
                    </div>
                </div>
            </section>

            <section class="detail-block alt">
                <RevealOnView class={classes!("narrow", "centered")} motion={Motion::Rise(20.0)}>
                    <h2>{"Prêt pour un projet comme celui-ci ?"}</h2>
                    <p class="muted lead">{"Je transforme les défis digitaux en opportunités de croissance réelles."}</p>
                    <a class="cta" href={format!("#{CONTACT_ANCHOR}")}>{"Discutons de votre projet"}</a>
                </RevealOnView>
            </section>
        </div>
    }
}

#[function_component(LegalNoticePage)]
fn legal_notice_page(props: &PageProps) -> Html {
    let legal = &props.site.copy.legal;
    let on_back = navigate_on_click(&props.on_navigate, Action::Back);

    html! {
        <div class="page page-legal">
            <div class="narrow">
                <button type="button" class="back-link" onclick={on_back}>
                    <span aria-hidden="true">{"← "}</span>{"Retour"}
                </button>
                <h1>{legal.title.clone()}</h1>
                <div class="legal-content">
                    { for legal.sections.iter().map(|section| html! {
                        <section key={section.heading.clone()}>
                            <h4>{section.heading.clone()}</h4>
                            { for section.blocks.iter().map(|block| match block {
                                LegalBlock::Paragraph { text } => html! { <p>{text.clone()}</p> },
                                LegalBlock::List { items } => html! {
                                    <ul>
                                        { for items.iter().map(|item| html! {
                                            <li>
                                                if let Some(label) = &item.label {
                                                    <strong>{format!("{label} : ")}</strong>
                                                }
                                                {item.text.clone()}
                                            </li>
                                        }) }
                                    </ul>
                                },
                            }) }
                        </section>
                    }) }
                </div>
            </div>
        </div>
    }
}

pub fn run() {
    console_error_panic_hook::set_once();

    let site = Site::builtin();
    let level = site
        .as_ref()
        .map(|site| site.config.log_level)
        .unwrap_or(DEFAULT_LOG_LEVEL);
    let _ = console_log::init_with_level(level);

    let site = match site {
        Ok(site) => site,
        Err(error) => {
            log::error!("embedded site content is invalid: {error}");
            return;
        }
    };
    log::info!("loaded {} case studies", site.projects.len());

    yew::Renderer::<App>::with_root_and_props(
        window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(ROOT_ID))
            .expect("missing #app mount point"),
        AppProps {
            site: SiteHandle(Rc::new(site)),
        },
    )
    .render();
}
