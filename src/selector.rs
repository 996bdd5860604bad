//! The color picker: a closed-choice dropdown over the four tile colors.
//!
//! State is scoped per selector instance so multiple editors never share
//! an open/closed flag.

use crate::Color;
use crate::drag::{Point, Rect};

/// Open/closed dropdown state plus the current selection.
///
/// The dropdown closes on selection, on Escape, and on any pointer-down
/// outside its bounding rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorSelector {
    selected: Color,
    open: bool,
}

impl ColorSelector {
    pub fn new(selected: Color) -> Self {
        ColorSelector { selected, open: false }
    }

    pub fn selected(&self) -> Color {
        self.selected
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Toggle the dropdown (the trigger button's click handler).
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Choose a color and close the dropdown.
    pub fn select(&mut self, color: Color) {
        self.selected = color;
        self.open = false;
    }

    /// Escape key-press: close without changing the selection.
    pub fn escape(&mut self) {
        self.open = false;
    }

    /// A pointer-down anywhere on the page. Closes the dropdown when the
    /// point falls outside the selector's bounding rectangle.
    pub fn pointer_down(&mut self, point: Point, bounds: Rect) {
        if !bounds.contains(point) {
            self.open = false;
        }
    }
}

impl Default for ColorSelector {
    fn default() -> Self {
        Self::new(Color::Blue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Rect = Rect { left: 0.0, top: 0.0, right: 20.0, bottom: 20.0 };

    #[test]
    fn test_select_sets_color_and_closes() {
        let mut sel = ColorSelector::default();
        sel.toggle();
        assert!(sel.is_open());

        sel.select(Color::Red);
        assert_eq!(sel.selected(), Color::Red);
        assert!(!sel.is_open());
    }

    #[test]
    fn test_escape_closes_without_changing_selection() {
        let mut sel = ColorSelector::new(Color::Orange);
        sel.toggle();
        sel.escape();
        assert!(!sel.is_open());
        assert_eq!(sel.selected(), Color::Orange);
    }

    #[test]
    fn test_outside_pointer_down_closes() {
        let mut sel = ColorSelector::default();
        sel.toggle();

        // Inside the selector: stays open.
        sel.pointer_down(Point::new(10.0, 10.0), BOUNDS);
        assert!(sel.is_open());

        sel.pointer_down(Point::new(100.0, 100.0), BOUNDS);
        assert!(!sel.is_open());
    }

    #[test]
    fn test_toggle_reopens() {
        let mut sel = ColorSelector::default();
        sel.toggle();
        sel.toggle();
        assert!(!sel.is_open());
        sel.toggle();
        assert!(sel.is_open());
    }
}
