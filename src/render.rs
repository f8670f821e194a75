//! Render-side projections of the core state.
//!
//! Everything here is a side-effect-free function of the gesture state, the
//! buffer and the current time. Drawing is left to the driver.

use crate::buffer::TextBuffer;
use crate::gesture::{GestureState, Timestamp};
use crate::geometry::KeyboardLayout;
use crate::keys::Key;
use std::time::Duration;

/// Average glyph width assumed when fitting text into the display area.
const GLYPH_WIDTH: i32 = 12;
const TEXT_PADDING: i32 = 40;
const MIN_DISPLAY_CHARS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverProgress {
    pub key: Key,
    /// Dwell completion in `[0, 1]`.
    pub fraction: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyHighlight {
    Normal,
    Hovered { progress: f32 },
    Pressed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinchIndicator {
    Hidden,
    /// Close enough to draw the thumb-index line.
    Near,
    Pinched,
}

pub fn hover_progress(state: &GestureState, now: Timestamp, dwell: Duration) -> Option<HoverProgress> {
    let key = state.hover_key?;
    let since = state.hover_since?;
    let fraction = if dwell.is_zero() {
        1.0
    } else {
        (now.saturating_sub(since).as_secs_f32() / dwell.as_secs_f32()).min(1.0)
    };
    Some(HoverProgress { key, fraction })
}

pub fn key_highlight(state: &GestureState, key: Key, now: Timestamp, dwell: Duration) -> KeyHighlight {
    if state.committed_key == Some(key) {
        return KeyHighlight::Pressed;
    }
    if state.hover_key != Some(key) {
        return KeyHighlight::Normal;
    }
    let progress = hover_progress(state, now, dwell).map_or(0.0, |p| p.fraction);
    KeyHighlight::Hovered { progress }
}

pub fn pinch_indicator(distance: Option<f32>, threshold_px: f32) -> PinchIndicator {
    match distance {
        Some(d) if d < threshold_px => PinchIndicator::Pinched,
        Some(d) if d < 2.0 * threshold_px => PinchIndicator::Near,
        _ => PinchIndicator::Hidden,
    }
}

/// How many characters fit in the text area of a viewport this wide.
pub fn display_capacity(viewport_width: i32, margin: i32) -> usize {
    let usable = (viewport_width - 2 * margin - TEXT_PADDING).max(0);
    ((usable / GLYPH_WIDTH) as usize).max(MIN_DISPLAY_CHARS)
}

pub fn progress_label(progress: &HoverProgress) -> String {
    format!("Typing: {} ({:.0}%)", progress.key, progress.fraction * 100.0)
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub layout: &'a KeyboardLayout,
    pub gesture: &'a GestureState,
    pub buffer: &'a TextBuffer,
    pub now: Timestamp,
    pub dwell: Duration,
}

impl FrameView<'_> {
    pub fn highlight(&self, key: Key) -> KeyHighlight {
        key_highlight(self.gesture, key, self.now, self.dwell)
    }

    pub fn progress(&self) -> Option<HoverProgress> {
        hover_progress(self.gesture, self.now, self.dwell)
    }

    pub fn display_text(&self) -> String {
        let cap = display_capacity(self.layout.viewport.width, self.layout.margin);
        self.buffer.display_tail(cap)
    }

    pub fn char_count_label(&self) -> String {
        format!("{} chars", self.buffer.char_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_progress_clamps() {
        let state = GestureState {
            hover_key: Some(Key::Letter('A')),
            hover_since: Some(ms(1000)),
            ..Default::default()
        };
        let half = hover_progress(&state, ms(1400), ms(800)).unwrap();
        assert!((half.fraction - 0.5).abs() < 1e-6);
        assert_eq!(progress_label(&half), "Typing: A (50%)");

        let over = hover_progress(&state, ms(5000), ms(800)).unwrap();
        assert_eq!(over.fraction, 1.0);
    }

    #[test]
    fn test_progress_absent_while_unarmed() {
        let state = GestureState {
            hover_key: Some(Key::Letter('A')),
            hover_since: None,
            ..Default::default()
        };
        assert!(hover_progress(&state, ms(10), ms(800)).is_none());
        assert_eq!(
            key_highlight(&state, Key::Letter('A'), ms(10), ms(800)),
            KeyHighlight::Hovered { progress: 0.0 }
        );
    }

    #[test]
    fn test_pressed_wins_over_hover() {
        let a = Key::Letter('A');
        let state = GestureState {
            hover_key: Some(a),
            committed_key: Some(a),
            ..Default::default()
        };
        assert_eq!(key_highlight(&state, a, ms(0), ms(800)), KeyHighlight::Pressed);
        assert_eq!(
            key_highlight(&state, Key::Letter('B'), ms(0), ms(800)),
            KeyHighlight::Normal
        );
    }

    #[test]
    fn test_pinch_indicator_bands() {
        assert_eq!(pinch_indicator(Some(20.0), 50.0), PinchIndicator::Pinched);
        assert_eq!(pinch_indicator(Some(75.0), 50.0), PinchIndicator::Near);
        assert_eq!(pinch_indicator(Some(100.0), 50.0), PinchIndicator::Hidden);
        assert_eq!(pinch_indicator(None, 50.0), PinchIndicator::Hidden);
    }

    #[test]
    fn test_display_capacity() {
        // (1280 - 40 - 40) / 12 = 100
        assert_eq!(display_capacity(1280, 20), 100);
        assert_eq!(display_capacity(50, 20), MIN_DISPLAY_CHARS);
    }
}
