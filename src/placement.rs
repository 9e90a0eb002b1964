//! Where to put the floating tool palette next to a selection.

use crate::geometry::{Point, Rect, Size};

/// Gap between the selection and the palette, in pixels.
pub const PANEL_MARGIN: f32 = 2.0;

/// Top-left corner for a `panel` sized palette so it stays next to `selection`
/// and inside `screen`.
pub fn place(selection: Rect, screen: Rect, panel: Size) -> Point {
    place_with_margin(selection, screen, panel, PANEL_MARGIN)
}

pub fn place_with_margin(selection: Rect, screen: Rect, panel: Size, margin: f32) -> Point {
    let (pw, ph) = (panel.width, panel.height);

    // below, right-aligned with the selection
    let mut candidate = Point::new(selection.right() - pw, selection.bottom() + margin);

    if candidate.y + ph > screen.bottom() {
        // up and to the right, next to the bottom-right corner
        candidate = Point::new(selection.right() - pw + margin, selection.bottom() - ph);
    }
    if candidate.x + pw > screen.right() {
        candidate = Point::new(selection.right() - pw, selection.top() - ph - margin);
    }
    if candidate.y < screen.top() {
        candidate = Point::new(selection.left() - pw - margin, selection.bottom() - ph);
    }
    if candidate.x < screen.left() {
        // nowhere outside is free: tuck it inside the bottom-right corner
        candidate = Point::new(
            selection.right() - pw - margin,
            selection.bottom() - ph - margin,
        );
    }

    clamp_into(candidate, screen, panel)
}

fn clamp_into(point: Point, screen: Rect, panel: Size) -> Point {
    let x = point
        .x
        .min(screen.right() - panel.width)
        .max(screen.left());
    let y = point
        .y
        .min(screen.bottom() - panel.height)
        .max(screen.top());
    Point::new(x, y)
}
