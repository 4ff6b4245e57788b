//! Horizontal travel of the pinned services carousel.
//!
//! The services section is several viewports tall and holds a sticky strip of
//! cards. Vertical scroll through the section is mapped to a horizontal
//! translation of the strip: at progress 0 the strip's left edge sits at the
//! viewport's left edge, at progress 1 its right edge meets the viewport's
//! right edge.

/// Widths measured from the DOM. Either one may be unknown until layout settles.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CarouselLayout {
    pub content_width: f64,
    pub viewport_width: f64,
}

impl CarouselLayout {
    pub fn new(content_width: f64, viewport_width: f64) -> Self {
        Self {
            content_width,
            viewport_width,
        }
    }

    fn is_measured(self) -> bool {
        self.content_width.is_finite()
            && self.viewport_width.is_finite()
            && self.content_width > 0.0
            && self.viewport_width > 0.0
    }

    /// Distance the strip travels over the whole section. Zero when the
    /// content fits in the viewport or the layout is not measured yet.
    pub fn offset_range(self) -> f64 {
        if !self.is_measured() {
            return 0.0;
        }

        (self.content_width - self.viewport_width).max(0.0)
    }

    /// Horizontal translation (px, non-positive) for a scroll progress.
    pub fn offset_at(self, progress: f64) -> f64 {
        let range = self.offset_range();
        if range == 0.0 {
            return 0.0;
        }

        -range * clamp_progress(progress)
    }
}

fn clamp_progress(progress: f64) -> f64 {
    if progress.is_nan() {
        return 0.0;
    }

    progress.clamp(0.0, 1.0)
}

/// Progress through a pinned section, from its top reaching the viewport top
/// (0) to its bottom reaching the viewport bottom (1).
///
/// `section_top` is the section's bounding-rect top relative to the viewport.
pub fn scroll_progress(section_top: f64, section_height: f64, viewport_height: f64) -> f64 {
    let travel = section_height - viewport_height;
    if travel.is_nan() || travel <= 0.0 {
        return if section_top < 0.0 { 1.0 } else { 0.0 };
    }

    clamp_progress(-section_top / travel)
}

/// Owns the latest measurements and scroll progress for one carousel.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CarouselController {
    layout: Option<CarouselLayout>,
    progress: f64,
}

impl CarouselController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records fresh widths. Returns true when the travel range changed.
    pub fn measure(&mut self, content_width: f64, viewport_width: f64) -> bool {
        let next = CarouselLayout::new(content_width, viewport_width);
        let previous_range = self.range();
        self.layout = Some(next);

        previous_range != self.range()
    }

    pub fn scroll(&mut self, section_top: f64, section_height: f64, viewport_height: f64) {
        self.progress = scroll_progress(section_top, section_height, viewport_height);
    }

    pub fn range(&self) -> f64 {
        self.layout.map(CarouselLayout::offset_range).unwrap_or(0.0)
    }

    /// Current translation; zero until the layout has been measured.
    pub fn offset(&self) -> f64 {
        self.layout
            .map(|layout| layout.offset_at(self.progress))
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_widths_never_move() {
        let layout = CarouselLayout::new(1280.0, 1280.0);

        assert_eq!(layout.offset_range(), 0.0);
        for step in 0..=10 {
            let progress = f64::from(step) / 10.0;
            assert_eq!(layout.offset_at(progress), 0.0);
        }
    }

    #[test]
    fn narrow_content_collapses_range() {
        let layout = CarouselLayout::new(800.0, 1280.0);

        assert_eq!(layout.offset_range(), 0.0);
        assert_eq!(layout.offset_at(1.0), 0.0);
    }

    #[test]
    fn wider_content_ends_at_negative_overflow() {
        let layout = CarouselLayout::new(3200.0, 1280.0);

        assert_eq!(layout.offset_at(0.0), 0.0);
        assert_eq!(layout.offset_at(0.5), -960.0);
        assert_eq!(layout.offset_at(1.0), -1920.0);
        assert_eq!(layout.offset_at(3.0), -1920.0);
    }

    #[test]
    fn unmeasured_layout_has_no_range() {
        assert_eq!(CarouselLayout::new(0.0, 1280.0).offset_range(), 0.0);
        assert_eq!(CarouselLayout::new(2000.0, 0.0).offset_range(), 0.0);
        assert_eq!(CarouselLayout::new(f64::NAN, 1280.0).offset_at(1.0), 0.0);
    }

    #[test]
    fn progress_tracks_pinned_travel() {
        // Section is 3 viewports tall, so it pins for 2 viewports of scroll.
        assert_eq!(scroll_progress(100.0, 2700.0, 900.0), 0.0);
        assert_eq!(scroll_progress(0.0, 2700.0, 900.0), 0.0);
        assert_eq!(scroll_progress(-900.0, 2700.0, 900.0), 0.5);
        assert_eq!(scroll_progress(-1800.0, 2700.0, 900.0), 1.0);
        assert_eq!(scroll_progress(-5000.0, 2700.0, 900.0), 1.0);
    }

    #[test]
    fn section_shorter_than_viewport_does_not_divide() {
        assert_eq!(scroll_progress(10.0, 600.0, 900.0), 0.0);
        assert_eq!(scroll_progress(-10.0, 900.0, 900.0), 1.0);
    }

    #[test]
    fn controller_waits_for_measurement() {
        let mut controller = CarouselController::new();
        controller.scroll(-900.0, 2700.0, 900.0);
        assert_eq!(controller.offset(), 0.0);

        assert!(controller.measure(2280.0, 1280.0));
        assert_eq!(controller.offset(), -500.0);

        assert!(!controller.measure(2280.0, 1280.0));
        assert!(controller.measure(2280.0, 1000.0));
        assert_eq!(controller.range(), 1280.0);
    }
}
