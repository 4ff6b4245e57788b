//! One-shot entry transitions for sections and cards.

/// `Hidden` until the element is first seen, then `Revealed` for good.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RevealState {
    #[default]
    Hidden,
    Revealed,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Reveal {
    state: RevealState,
    observations: u32,
}

impl Reveal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one intersection measurement. Returns true only on the call that
    /// performs the `Hidden -> Revealed` transition.
    pub fn observe(&mut self, intersecting: bool) -> bool {
        self.observations = self.observations.saturating_add(1);

        if self.state == RevealState::Hidden && intersecting {
            self.state = RevealState::Revealed;
            return true;
        }

        false
    }

    #[cfg(test)]
    pub fn state(&self) -> RevealState {
        self.state
    }

    #[cfg(test)]
    pub fn is_revealed(&self) -> bool {
        self.state == RevealState::Revealed
    }

    #[cfg(test)]
    pub fn has_been_measured(&self) -> bool {
        self.observations > 0
    }
}

/// Delay for the `index`-th item of a list.
pub fn stagger_delay_ms(index: usize, stagger_ms: u32) -> u32 {
    u32::try_from(index)
        .unwrap_or(u32::MAX)
        .saturating_mul(stagger_ms)
}

/// Delay for a grid item; restarts at every row so late rows are not penalised.
pub fn grid_stagger_delay_ms(index: usize, columns: usize, stagger_ms: u32) -> u32 {
    stagger_delay_ms(index % columns.max(1), stagger_ms)
}

/// Starting pose of an element before it is revealed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Motion {
    Fade,
    Rise(f64),
    Slide(f64),
    Grow(f64),
    Wipe,
}

impl Motion {
    fn hidden_transform(self) -> String {
        match self {
            Self::Fade | Self::Wipe => "none".to_string(),
            Self::Rise(distance) => format!("translate3d(0, {distance}px, 0)"),
            Self::Slide(distance) => format!("translate3d({distance}px, 0, 0)"),
            Self::Grow(scale) => format!("scale({scale})"),
        }
    }

    /// Inline style for the element in either state.
    pub fn style(self, revealed: bool, duration_ms: u32, delay_ms: u32) -> String {
        if let Self::Wipe = self {
            let clip = if revealed {
                "inset(0 0% 0 0)"
            } else {
                "inset(0 100% 0 0)"
            };
            return format!(
                "clip-path: {clip}; transition: clip-path {duration_ms}ms \
                 cubic-bezier(0.6, 0.01, 0, 0.95) {delay_ms}ms;"
            );
        }

        let (opacity, transform) = if revealed {
            ("1".to_string(), "none".to_string())
        } else {
            ("0".to_string(), self.hidden_transform())
        };

        format!(
            "opacity: {opacity}; transform: {transform}; \
             transition: opacity {duration_ms}ms ease-out {delay_ms}ms, \
             transform {duration_ms}ms ease-out {delay_ms}ms;"
        )
    }
}
