/// Active slot of a fixed-length carousel that advances on a timer tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rotation {
    len: usize,
    active: usize,
}

impl Rotation {
    /// `None` for an empty list: there is nothing to show or rotate.
    pub fn new(len: usize) -> Option<Self> {
        (len > 0).then_some(Self { len, active: 0 })
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn tick(&mut self) -> usize {
        self.active = (self.active + 1) % self.len;
        self.active
    }

    /// Jumps to `index` (a dot button). Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }

        self.active = index;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_ticks_wrap_to_start() {
        let mut rotation = Rotation::new(3).expect("non-empty");
        let start = rotation.active();

        assert_eq!(rotation.tick(), 1);
        assert_eq!(rotation.tick(), 2);
        assert_eq!(rotation.tick(), start);
    }

    #[test]
    fn wraps_from_a_selected_slot() {
        let mut rotation = Rotation::new(3).expect("non-empty");

        assert!(rotation.select(2));
        for _ in 0..3 {
            rotation.tick();
        }
        assert_eq!(rotation.active(), 2);
    }

    #[test]
    fn rejects_out_of_range_selection() {
        let mut rotation = Rotation::new(3).expect("non-empty");

        assert!(!rotation.select(3));
        assert_eq!(rotation.active(), 0);
    }

    #[test]
    fn single_item_stays_put() {
        let mut rotation = Rotation::new(1).expect("non-empty");

        assert_eq!(rotation.tick(), 0);
    }

    #[test]
    fn empty_list_has_no_rotation() {
        assert!(Rotation::new(0).is_none());
    }
}
