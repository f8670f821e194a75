use super::{KeyRect, KeyboardLayout};
use crate::keys::Key;

/// Finds the key under `(x, y)`, scanning rows top to bottom.
///
/// Rectangles never overlap, so the scan order only affects speed. Rows are
/// skipped on the vertical test before any key in them is checked.
pub fn hit_test(layout: &KeyboardLayout, x: i32, y: i32) -> Option<&KeyRect> {
    layout
        .rows
        .iter()
        .filter(|row| {
            row.first()
                .is_some_and(|r| r.y < y && y < r.y + r.height)
        })
        .flat_map(|row| row.iter())
        .find(|rect| rect.contains(x, y))
}

pub fn hovered_key(layout: &KeyboardLayout, point: Option<(i32, i32)>) -> Option<Key> {
    point.and_then(|(x, y)| hit_test(layout, x, y).map(|r| r.key))
}
