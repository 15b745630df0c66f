/// Selection index into the currently visible list.
///
/// Every method takes the visible length so the index can never point
/// past the end once the caller has clamped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    index: usize,
}

impl Cursor {
    pub fn index(&self) -> usize {
        self.index
    }

    /// Move up one row, wrapping from the first row to the last
    pub fn up(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.clamp(len);
        self.index = if self.index == 0 { len - 1 } else { self.index - 1 };
    }

    /// Move down one row, wrapping from the last row to the first
    pub fn down(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.clamp(len);
        self.index = (self.index + 1) % len;
    }

    pub fn clamp(&mut self, len: usize) {
        self.index = self.index.min(len.saturating_sub(1));
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }

    pub fn set(&mut self, index: usize, len: usize) {
        self.index = index;
        self.clamp(len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_both_ways() {
        let mut cursor = Cursor::default();
        cursor.up(3);
        assert_eq!(cursor.index(), 2);
        cursor.down(3);
        assert_eq!(cursor.index(), 0);
        cursor.down(3);
        assert_eq!(cursor.index(), 1);
    }

    #[test]
    fn empty_list_is_noop() {
        let mut cursor = Cursor::default();
        cursor.up(0);
        cursor.down(0);
        assert_eq!(cursor.index(), 0);
    }

    #[test]
    fn clamp_after_shrink() {
        let mut cursor = Cursor::default();
        cursor.set(4, 5);
        cursor.clamp(2);
        assert_eq!(cursor.index(), 1);
        cursor.clamp(0);
        assert_eq!(cursor.index(), 0);
    }

    #[test]
    fn stale_index_clamped_before_moving() {
        let mut cursor = Cursor::default();
        cursor.set(9, 10);
        cursor.down(3);
        assert_eq!(cursor.index(), 0);
    }
}
