/// A rectangle in viewport coordinates (what `getBoundingClientRect` reports).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }

    /// Collapsed or detached ranges report an all-zero box.
    pub fn is_empty(&self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Size {
    pub width: f64,
    pub height: f64,
}

const TOOLBAR_HALF_WIDTH: f64 = 150.0;
const TOOLBAR_LIFT: f64 = 50.0;
const TOOLBAR_MIN_EDGE: f64 = 10.0;

pub(crate) const PICKER_MARGIN: f64 = 15.0;

/// Page position of the toolbar: centred over the selection, lifted above it, never
/// closer than 10px to the top-left corner.
pub(crate) fn toolbar_position(selection: &Rect, scroll: Point) -> Point {
    Point {
        x: (selection.center_x() + scroll.x - TOOLBAR_HALF_WIDTH).max(TOOLBAR_MIN_EDGE),
        y: (selection.top + scroll.y - TOOLBAR_LIFT).max(TOOLBAR_MIN_EDGE),
    }
}

/// Page position of the color picker below the selection.
///
/// Clamped horizontally into the viewport, flipped above the selection when it would run
/// past the bottom edge. `None` for an empty selection box.
pub(crate) fn color_picker_position(
    selection: &Rect,
    picker: Size,
    viewport: Size,
    scroll: Point,
) -> Option<Point> {
    if selection.is_empty() {
        return None;
    }

    let mut x = selection.center_x() + scroll.x - picker.width / 2.0;
    x = x.max(PICKER_MARGIN);
    x = x.min(viewport.width - picker.width - PICKER_MARGIN);

    let mut y = selection.bottom() + scroll.y + PICKER_MARGIN;
    if y + picker.height > viewport.height - PICKER_MARGIN {
        y = selection.top + scroll.y - picker.height - PICKER_MARGIN;
    }
    y = y.max(PICKER_MARGIN);

    Some(Point { x, y })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toolbar_centred_above_selection() {
        let p = toolbar_position(&Rect::new(400.0, 300.0, 100.0, 20.0), Point::default());
        assert_eq!(p, Point { x: 300.0, y: 250.0 });
    }

    #[test]
    fn test_toolbar_accounts_for_scroll() {
        let p = toolbar_position(
            &Rect::new(400.0, 300.0, 100.0, 20.0),
            Point { x: 5.0, y: 1000.0 },
        );
        assert_eq!(p, Point { x: 305.0, y: 1250.0 });
    }

    #[test]
    fn test_toolbar_clamped_to_top_left() {
        let p = toolbar_position(&Rect::new(20.0, 15.0, 40.0, 18.0), Point::default());
        assert_eq!(p, Point { x: 10.0, y: 10.0 });
    }

    #[test]
    fn test_picker_below_selection() {
        let p = color_picker_position(
            &Rect::new(400.0, 100.0, 100.0, 20.0),
            Size { width: 300.0, height: 200.0 },
            Size { width: 1200.0, height: 800.0 },
            Point::default(),
        );
        assert_eq!(p, Some(Point { x: 300.0, y: 135.0 }));
    }

    #[test]
    fn test_picker_flips_above_near_bottom() {
        let p = color_picker_position(
            &Rect::new(400.0, 700.0, 100.0, 20.0),
            Size { width: 300.0, height: 200.0 },
            Size { width: 1200.0, height: 800.0 },
            Point::default(),
        );
        assert_eq!(p, Some(Point { x: 300.0, y: 485.0 }));
    }

    #[test]
    fn test_picker_clamped_horizontally() {
        let viewport = Size { width: 600.0, height: 800.0 };
        let picker = Size { width: 300.0, height: 200.0 };

        let left = color_picker_position(&Rect::new(0.0, 100.0, 20.0, 20.0), picker, viewport, Point::default());
        assert_eq!(left.map(|p| p.x), Some(PICKER_MARGIN));

        let right = color_picker_position(&Rect::new(580.0, 100.0, 20.0, 20.0), picker, viewport, Point::default());
        assert_eq!(right.map(|p| p.x), Some(285.0));
    }

    #[test]
    fn test_picker_never_above_margin() {
        // Tall picker that fits neither below nor above.
        let p = color_picker_position(
            &Rect::new(100.0, 50.0, 50.0, 20.0),
            Size { width: 100.0, height: 780.0 },
            Size { width: 1200.0, height: 800.0 },
            Point::default(),
        );
        assert_eq!(p.map(|p| p.y), Some(PICKER_MARGIN));
    }

    #[test]
    fn test_picker_needs_a_selection_box() {
        let p = color_picker_position(
            &Rect::default(),
            Size { width: 300.0, height: 200.0 },
            Size { width: 1200.0, height: 800.0 },
            Point::default(),
        );
        assert_eq!(p, None);
    }
}
