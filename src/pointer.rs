//! Custom cursor: a ring that trails the pointer and swells over links and buttons.

use crate::config::{SiteConfig, SpringConfig, SPRING_STEP_SECONDS};

const MAX_FRAME_SECONDS: f64 = 0.1;
const REST_DISTANCE: f64 = 0.01;
const REST_VELOCITY: f64 = 0.01;

/// Minimal view of a DOM element needed to decide whether it is interactive.
pub trait ElementChain: Sized {
    fn tag_name(&self) -> String;
    fn parent(&self) -> Option<Self>;
}

fn is_interactive_tag(tag: &str) -> bool {
    tag.eq_ignore_ascii_case("a") || tag.eq_ignore_ascii_case("button")
}

/// True when the target is a link or button, or sits inside one.
pub fn is_interactive<E: ElementChain>(target: &E) -> bool {
    if is_interactive_tag(&target.tag_name()) {
        return true;
    }

    let mut current = target.parent();
    while let Some(element) = current {
        if is_interactive_tag(&element.tag_name()) {
            return true;
        }
        current = element.parent();
    }

    false
}

/// Damped spring on one axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spring {
    position: f64,
    velocity: f64,
}

impl Spring {
    pub fn at(position: f64) -> Self {
        Self {
            position,
            velocity: 0.0,
        }
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn is_at_rest(&self, target: f64) -> bool {
        (self.position - target).abs() < REST_DISTANCE && self.velocity.abs() < REST_VELOCITY
    }

    /// Advances toward `target` by `seconds`, in fixed sub-steps.
    pub fn step(&mut self, target: f64, seconds: f64, config: SpringConfig) {
        let mut remaining = seconds.clamp(0.0, MAX_FRAME_SECONDS);

        while remaining > 0.0 {
            let dt = remaining.min(SPRING_STEP_SECONDS);
            let force =
                -config.stiffness * (self.position - target) - config.damping * self.velocity;
            self.velocity += force / config.mass * dt;
            self.position += self.velocity * dt;
            remaining -= dt;
        }

        if self.is_at_rest(target) {
            self.snap(target);
        }
    }

    pub fn snap(&mut self, target: f64) {
        self.position = target;
        self.velocity = 0.0;
    }
}

/// What the view needs to draw the ring.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Indicator {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub filled: bool,
}

impl Indicator {
    pub fn style(&self, size: f64) -> String {
        format!(
            "width: {size:.0}px; height: {size:.0}px; \
             transform: translate3d({:.2}px, {:.2}px, 0) scale({:.3});",
            self.x, self.y, self.scale
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PointerFollower {
    pointer_x: f64,
    pointer_y: f64,
    hovering: bool,
    x: Spring,
    y: Spring,
    scale: Spring,
    size: f64,
    hover_scale: f64,
    spring: SpringConfig,
}

impl PointerFollower {
    pub fn new(config: &SiteConfig) -> Self {
        let half = config.cursor_size_px / 2.0;
        Self {
            pointer_x: 0.0,
            pointer_y: 0.0,
            hovering: false,
            x: Spring::at(-half),
            y: Spring::at(-half),
            scale: Spring::at(1.0),
            size: config.cursor_size_px,
            hover_scale: config.cursor_hover_scale,
            spring: config.spring,
        }
    }

    pub fn pointer_move(&mut self, client_x: f64, client_y: f64) {
        self.pointer_x = client_x;
        self.pointer_y = client_y;
    }

    pub fn pointer_over(&mut self, interactive: bool) {
        self.hovering = interactive;
    }

    fn target(&self) -> (f64, f64, f64) {
        let half = self.size / 2.0;
        let scale = if self.hovering { self.hover_scale } else { 1.0 };
        (self.pointer_x - half, self.pointer_y - half, scale)
    }

    /// Advances the springs one frame. Returns true while still moving.
    pub fn tick(&mut self, seconds: f64) -> bool {
        let (x, y, scale) = self.target();
        self.x.step(x, seconds, self.spring);
        self.y.step(y, seconds, self.spring);
        self.scale.step(scale, seconds, self.spring);

        !self.is_settled()
    }

    /// Jumps straight to the target, for reduced-motion users.
    pub fn snap(&mut self) {
        let (x, y, scale) = self.target();
        self.x.snap(x);
        self.y.snap(y);
        self.scale.snap(scale);
    }

    pub fn is_settled(&self) -> bool {
        let (x, y, scale) = self.target();
        self.x.is_at_rest(x) && self.y.is_at_rest(y) && self.scale.is_at_rest(scale)
    }

    pub fn indicator(&self) -> Indicator {
        Indicator {
            x: self.x.position(),
            y: self.y.position(),
            scale: self.scale.position(),
            filled: self.hovering,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RawSettings;
    use std::rc::Rc;

    struct Node {
        tag: &'static str,
        parent: Option<Rc<Node>>,
    }

    #[derive(Clone)]
    struct NodeRef(Rc<Node>);

    impl NodeRef {
        fn root(tag: &'static str) -> Self {
            Self(Rc::new(Node { tag, parent: None }))
        }

        fn child(&self, tag: &'static str) -> Self {
            Self(Rc::new(Node {
                tag,
                parent: Some(Rc::clone(&self.0)),
            }))
        }
    }

    impl ElementChain for NodeRef {
        fn tag_name(&self) -> String {
            self.0.tag.to_string()
        }

        fn parent(&self) -> Option<Self> {
            self.0.parent.clone().map(NodeRef)
        }
    }

    #[test]
    fn hover_detection_over_dom_fixture() {
        // body > main > section > { a > span, button > svg > path, p > em }
        let body = NodeRef::root("BODY");
        let section = body.child("MAIN").child("SECTION");
        let link = section.child("A");
        let link_label = link.child("SPAN");
        let button = section.child("BUTTON");
        let icon_path = button.child("svg").child("path");
        let paragraph = section.child("P");
        let emphasis = paragraph.child("EM");

        assert!(is_interactive(&link));
        assert!(is_interactive(&link_label));
        assert!(is_interactive(&button));
        assert!(is_interactive(&icon_path));
        assert!(!is_interactive(&paragraph));
        assert!(!is_interactive(&emphasis));
        assert!(!is_interactive(&body));
    }

    #[test]
    fn spring_converges_and_rests_on_target() {
        let mut spring = Spring::at(0.0);
        let config = SpringConfig::default();

        for _ in 0..120 {
            spring.step(100.0, 1.0 / 60.0, config);
        }

        assert_eq!(spring.position(), 100.0);
        assert!(spring.is_at_rest(100.0));
    }

    #[test]
    fn light_springs_at_the_stability_edge_still_settle() {
        let edges = [
            RawSettings {
                spring_mass: Some(0.01),
                spring_damping: Some(2.39),
                spring_stiffness: Some(1.0),
                ..RawSettings::default()
            },
            RawSettings {
                spring_mass: Some(0.01),
                spring_damping: Some(0.1),
                spring_stiffness: Some(1_100.0),
                ..RawSettings::default()
            },
        ];

        for raw in edges {
            let config = SiteConfig::from_raw(&raw);
            assert_eq!(config.spring.mass, 0.01);

            let mut spring = Spring::at(0.0);
            for _ in 0..3_600 {
                spring.step(100.0, 1.0 / 60.0, config.spring);
                assert!(spring.position().is_finite());
            }
            assert!(spring.is_at_rest(100.0), "{:?} did not settle", config.spring);
        }
    }

    #[test]
    fn spring_moves_gradually_rather_than_snapping() {
        let mut spring = Spring::at(0.0);
        spring.step(100.0, 1.0 / 60.0, SpringConfig::default());

        assert!(spring.position() > 0.0);
        assert!(spring.position() < 100.0);
    }

    #[test]
    fn indicator_centres_on_pointer() {
        let config = SiteConfig::default();
        let mut follower = PointerFollower::new(&config);
        follower.pointer_move(200.0, 120.0);
        follower.snap();

        let indicator = follower.indicator();
        assert_eq!(indicator.x, 200.0 - config.cursor_size_px / 2.0);
        assert_eq!(indicator.y, 120.0 - config.cursor_size_px / 2.0);
        assert_eq!(indicator.scale, 1.0);
        assert!(!indicator.filled);
    }

    #[test]
    fn hover_scales_and_fills() {
        let config = SiteConfig::default();
        let mut follower = PointerFollower::new(&config);
        follower.pointer_over(true);

        assert!(follower.tick(1.0 / 60.0));
        for _ in 0..240 {
            follower.tick(1.0 / 60.0);
        }

        let indicator = follower.indicator();
        assert!(follower.is_settled());
        assert_eq!(indicator.scale, config.cursor_hover_scale);
        assert!(indicator.filled);

        follower.pointer_over(false);
        assert!(!follower.indicator().filled);
        assert!(!follower.is_settled());
    }
}
