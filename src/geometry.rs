use crate::config::LayoutParams;
use crate::error::{PbResult, PinchError};
use crate::keys::{self, Key, SpecialKey, SPECIAL_ROW};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub mod hit;

/// Height of the text display area as a share of the viewport height.
const TEXT_AREA_RATIO: f64 = 0.12;
const PROGRESS_BAR_OFFSET: i32 = 40;
const PROGRESS_BAR_HEIGHT: i32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Axis-aligned pixel rectangle, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRect {
    pub key: Key,
    pub row: usize,
    pub col: usize,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl KeyRect {
    /// Strict containment: points on an edge belong to no key.
    pub fn contains(&self, px: i32, py: i32) -> bool {
        self.x < px && px < self.x + self.width && self.y < py && py < self.y + self.height
    }

    pub fn center(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    /// True when the interiors of both rectangles overlap.
    pub fn intersects(&self, other: &KeyRect) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyboardLayout {
    pub viewport: Viewport,
    pub key_size: i32,
    /// Y coordinate of the first key row.
    pub band_top: i32,
    pub margin: i32,
    /// Key rectangles grouped by row, top to bottom.
    pub rows: Vec<Vec<KeyRect>>,
}

impl KeyboardLayout {
    pub fn keys(&self) -> impl Iterator<Item = &KeyRect> {
        self.rows.iter().flatten()
    }

    pub fn key_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    pub fn rect_for(&self, key: Key) -> Option<&KeyRect> {
        self.keys().find(|r| r.key == key)
    }

    /// Text display area at the top of the viewport.
    pub fn text_area(&self) -> Region {
        let height = (self.viewport.height as f64 * TEXT_AREA_RATIO).floor() as i32;
        Region {
            x: self.margin,
            y: self.margin,
            width: self.viewport.width - 2 * self.margin,
            height,
        }
    }

    /// Dwell progress bar, drawn just above the keyboard band.
    pub fn progress_bar(&self) -> Region {
        Region {
            x: self.margin,
            y: self.band_top - PROGRESS_BAR_OFFSET,
            width: self.viewport.width - 2 * self.margin,
            height: PROGRESS_BAR_HEIGHT,
        }
    }
}

/// Computes every key rectangle for the given viewport.
///
/// Letter keys are squares of a responsive edge length: the smallest of the
/// width-derived size, the band-height-derived size and `max_key_size`,
/// floored at `min_key_size`. Each row is centered on its own inside the
/// horizontal band between the margins.
pub fn compute_layout(viewport: Viewport, params: &LayoutParams) -> PbResult<KeyboardLayout> {
    if !viewport.is_valid() {
        return Err(PinchError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }

    let margin = params.margin;
    let gap = params.key_gap;
    let available_width = viewport.width - 2 * margin;
    let band_height = (viewport.height as f64 * params.band_ratio as f64).floor() as i32;

    let max_row_keys = keys::max_row_keys() as i32;
    let width_size = (available_width - (max_row_keys - 1) * gap).div_euclid(max_row_keys);
    let height_size = band_height.div_euclid(5);
    let key_size = width_size
        .min(height_size)
        .min(params.max_key_size)
        .max(params.min_key_size);

    let band_top = viewport.height - band_height - margin;

    let rows = keys::logical_rows()
        .into_iter()
        .enumerate()
        .map(|(row_idx, row)| {
            let y = band_top + row_idx as i32 * (key_size + gap);
            if row_idx == SPECIAL_ROW {
                special_row(&row, row_idx, y, key_size, available_width, params)
            } else {
                letter_row(&row, row_idx, y, key_size, available_width, params)
            }
        })
        .collect();

    debug!(
        "Layout {}x{}: key_size={} band_top={}",
        viewport.width, viewport.height, key_size, band_top
    );

    Ok(KeyboardLayout {
        viewport,
        key_size,
        band_top,
        margin,
        rows,
    })
}

fn letter_row(
    row: &[Key],
    row_idx: usize,
    y: i32,
    key_size: i32,
    available_width: i32,
    params: &LayoutParams,
) -> Vec<KeyRect> {
    let widths = vec![key_size; row.len()];
    place_row(row, &widths, row_idx, y, key_size, available_width, params)
}

fn special_row(
    row: &[Key],
    row_idx: usize,
    y: i32,
    key_size: i32,
    available_width: i32,
    params: &LayoutParams,
) -> Vec<KeyRect> {
    let total_gap = params.key_gap * (row.len() as i32 - 1);
    let keys_width = (available_width - total_gap) as f64;

    let widths: Vec<i32> = row
        .iter()
        .map(|key| {
            let share = match key {
                Key::Special(SpecialKey::Space) => params.space_share,
                _ => params.side_share,
            };
            ((keys_width * share as f64).floor() as i32).max(params.min_key_size)
        })
        .collect();

    place_row(row, &widths, row_idx, y, key_size, available_width, params)
}

/// Lays keys out left to right, centering the row within the band.
fn place_row(
    row: &[Key],
    widths: &[i32],
    row_idx: usize,
    y: i32,
    height: i32,
    available_width: i32,
    params: &LayoutParams,
) -> Vec<KeyRect> {
    let gap = params.key_gap;
    let row_width: i32 = widths.iter().sum::<i32>() + gap * (row.len() as i32 - 1);
    let mut x = params.margin + (available_width - row_width).div_euclid(2);

    row.iter()
        .zip(widths)
        .enumerate()
        .map(|(col, (&key, &width))| {
            let rect = KeyRect {
                key,
                row: row_idx,
                col,
                x,
                y,
                width,
                height,
            };
            x += width + gap;
            rect
        })
        .collect()
}
