//! Synthetic typing sessions, for driving the core without a camera.
//!
//! A [`SimulatedTypist`] scripts a hand that, for every character, hovers the
//! index tip over the key with a little positional noise, pinches once the
//! dwell has run out, then drops out of view so the next key starts fresh.

use crate::config::GestureParams;
use crate::geometry::KeyboardLayout;
use crate::keys::Key;
use crate::landmarks::{Hand, Landmark, INDEX_TIP, THUMB_TIP, WRIST};
use crate::trace::{Trace, TraceFrame};
use std::time::Duration;
use tracing::{debug, warn};

/// Thumb offset from the index tip while the hand is open (not pinching).
const OPEN_THUMB_OFFSET: (i32, i32) = (-40, 110);
const PINCH_THUMB_OFFSET: (i32, i32) = (8, 12);
const WRIST_OFFSET: (i32, i32) = (0, 220);

#[derive(Debug, Clone)]
pub struct SimulatedTypist {
    pub fps: u32,
    pub dwell: Duration,
    /// Extra hover time past the dwell before pinching.
    pub settle: Duration,
    pub pinch_frames: usize,
    /// Frames with no hand between two keys.
    pub gap_frames: usize,
    pub max_jitter_px: i32,
    rng: fastrand::Rng,
}

impl SimulatedTypist {
    pub fn new(params: &GestureParams, seed: u64) -> Self {
        Self {
            fps: 30,
            dwell: params.dwell(),
            settle: Duration::from_millis(100),
            pinch_frames: 3,
            gap_frames: 3,
            max_jitter_px: 6,
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    fn frame_time(&self, index: u64) -> Duration {
        Duration::from_millis(index * 1000 / self.fps.max(1) as u64)
    }

    fn hover_frames(&self) -> usize {
        let frame_ms = 1000.0 / self.fps.max(1) as f64;
        let hover_ms = (self.dwell + self.settle).as_millis() as f64;
        (hover_ms / frame_ms).ceil() as usize + 1
    }

    fn hand_at(&self, index: (i32, i32), thumb_offset: (i32, i32)) -> Hand {
        Hand::new(vec![
            Landmark::new(WRIST, index.0 + WRIST_OFFSET.0, index.1 + WRIST_OFFSET.1),
            Landmark::new(
                THUMB_TIP,
                index.0 + thumb_offset.0,
                index.1 + thumb_offset.1,
            ),
            Landmark::new(INDEX_TIP, index.0, index.1),
        ])
    }

    /// Scripts `text` against `layout`. Characters with no key are skipped.
    pub fn type_text(&mut self, text: &str, layout: &KeyboardLayout) -> Trace {
        let mut frames = Vec::new();
        let mut frame_idx: u64 = 0;
        let hover_frames = self.hover_frames();

        for c in text.chars() {
            let Some(rect) = Key::for_char(c).and_then(|k| layout.rect_for(k)) else {
                warn!("No key for {:?}, skipping", c);
                continue;
            };
            let rect = *rect;
            debug!("Scripting {} at {:?}", rect.key, rect.center());

            // Keep the tip strictly inside the key.
            let jitter = self
                .max_jitter_px
                .min(rect.width / 2 - 1)
                .min(rect.height / 2 - 1)
                .max(0);
            let (cx, cy) = rect.center();

            for i in 0..hover_frames + self.pinch_frames {
                let tip = (
                    cx + self.rng.i32(-jitter..=jitter),
                    cy + self.rng.i32(-jitter..=jitter),
                );
                let thumb = if i < hover_frames {
                    OPEN_THUMB_OFFSET
                } else {
                    PINCH_THUMB_OFFSET
                };
                frames.push(TraceFrame {
                    at: self.frame_time(frame_idx),
                    hands: vec![self.hand_at(tip, thumb)],
                });
                frame_idx += 1;
            }

            for _ in 0..self.gap_frames {
                frames.push(TraceFrame {
                    at: self.frame_time(frame_idx),
                    hands: Vec::new(),
                });
                frame_idx += 1;
            }
        }

        Trace { frames }
    }

    /// Scripts a single key press, including specials such as CLEAR.
    pub fn press(&mut self, key: Key, layout: &KeyboardLayout, start: Duration) -> Trace {
        let Some(rect) = layout.rect_for(key).copied() else {
            return Trace::default();
        };
        let base = start.as_millis() as u64;
        let hover_frames = self.hover_frames();
        let center = rect.center();

        let mut frames: Vec<TraceFrame> = (0..hover_frames + self.pinch_frames)
            .map(|i| {
                let thumb = if i < hover_frames {
                    OPEN_THUMB_OFFSET
                } else {
                    PINCH_THUMB_OFFSET
                };
                TraceFrame {
                    at: Duration::from_millis(base) + self.frame_time(i as u64),
                    hands: vec![self.hand_at(center, thumb)],
                }
            })
            .collect();

        let offset = frames.len() as u64;
        frames.extend((0..self.gap_frames as u64).map(|i| TraceFrame {
            at: Duration::from_millis(base) + self.frame_time(offset + i),
            hands: Vec::new(),
        }));

        Trace { frames }
    }
}
