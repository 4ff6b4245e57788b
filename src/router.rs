//! Which page is on screen, and how the location hash maps onto it.

const PROJECT_PREFIX: &str = "/projets/";
const LEGAL_PATH: &str = "/mentions-legales";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Home,
    ProjectDetail(String),
    LegalNotice,
}

impl View {
    /// Parses a location hash. Returns `None` for plain in-page anchors such
    /// as `#contact`, which are not routes.
    pub fn from_hash(hash: &str) -> Option<Self> {
        let path = hash.strip_prefix('#').unwrap_or(hash);

        if path.is_empty() || path == "/" {
            return Some(Self::Home);
        }

        let path = path.trim_end_matches('/');
        if path == LEGAL_PATH {
            return Some(Self::LegalNotice);
        }

        let id = path.strip_prefix(PROJECT_PREFIX)?;
        if id.is_empty() || id.contains('/') {
            return None;
        }

        Some(Self::ProjectDetail(id.to_string()))
    }

    pub fn to_hash(&self) -> String {
        match self {
            Self::Home => "#/".to_string(),
            Self::ProjectDetail(id) => format!("#{PROJECT_PREFIX}{id}"),
            Self::LegalNotice => format!("#{LEGAL_PATH}"),
        }
    }

    pub fn is_home(&self) -> bool {
        matches!(self, Self::Home)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    OpenProject(String),
    OpenLegalNotice,
    Back,
}

/// Button and modifier state of a click on an in-app link.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LinkClick {
    pub button: i16,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
}

impl LinkClick {
    /// Only a plain primary click is routed in-app. Anything else is left to
    /// the browser (new tab, new window, download).
    pub fn stays_in_app(&self) -> bool {
        self.button == 0 && !(self.ctrl || self.meta || self.shift || self.alt)
    }
}

/// A completed change of view. Every transition lands at the top of the new page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: View,
    pub to: View,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Router {
    current: View,
}

impl Router {
    pub fn new(initial: View) -> Self {
        Self { current: initial }
    }

    pub fn current(&self) -> &View {
        &self.current
    }

    /// Applies a user action. Actions that make no sense from the current
    /// view (opening a project from a detail page, going back from home)
    /// are ignored.
    pub fn apply(&mut self, action: Action) -> Option<Transition> {
        let next = match (&self.current, action) {
            (View::Home, Action::OpenProject(id)) => View::ProjectDetail(id),
            (View::Home, Action::OpenLegalNotice) => View::LegalNotice,
            (View::ProjectDetail(_) | View::LegalNotice, Action::Back) => View::Home,
            _ => return None,
        };

        Some(self.replace(next))
    }

    /// Follows the browser's own addressing (back/forward, typed hash).
    pub fn sync_to(&mut self, view: View) -> Option<Transition> {
        if view == self.current {
            return None;
        }

        Some(self.replace(view))
    }

    fn replace(&mut self, next: View) -> Transition {
        let from = std::mem::replace(&mut self.current, next);
        Transition {
            from,
            to: self.current.clone(),
        }
    }
}
