//! Hand landmarks as delivered by an external detector.
//!
//! The detector itself is out of scope: anything that can turn a frame into
//! per-hand landmark lists implements [`HandLandmarkProvider`]. Landmark ids
//! follow the 21-point hand model (0 = wrist, 4 = thumb tip, 8 = index tip).

use crate::error::PbResult;
use serde::{Deserialize, Serialize};

pub const WRIST: u8 = 0;
pub const THUMB_TIP: u8 = 4;
pub const INDEX_TIP: u8 = 8;
pub const MIDDLE_TIP: u8 = 12;
pub const RING_TIP: u8 = 16;
pub const PINKY_TIP: u8 = 20;

/// Landmarks per hand in the 21-point model.
pub const LANDMARK_COUNT: usize = 21;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Landmark {
    pub id: u8,
    pub x: i32,
    pub y: i32,
}

impl Landmark {
    pub fn new(id: u8, x: i32, y: i32) -> Self {
        Self { id, x, y }
    }

    pub fn point(&self) -> (i32, i32) {
        (self.x, self.y)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hand {
    pub landmarks: Vec<Landmark>,
}

impl Hand {
    pub fn new(landmarks: Vec<Landmark>) -> Self {
        Self { landmarks }
    }

    /// Builds a hand from normalized `[0, 1]` coordinates in landmark-id order.
    /// Pixel values are truncated toward zero.
    pub fn from_normalized(points: &[(f32, f32)], width: u32, height: u32) -> Self {
        let landmarks = points
            .iter()
            .take(LANDMARK_COUNT)
            .enumerate()
            .map(|(id, &(nx, ny))| {
                Landmark::new(
                    id as u8,
                    (nx * width as f32) as i32,
                    (ny * height as f32) as i32,
                )
            })
            .collect();
        Self { landmarks }
    }

    /// Last landmark with the given id; later entries override earlier ones.
    pub fn get(&self, id: u8) -> Option<(i32, i32)> {
        self.landmarks
            .iter()
            .rev()
            .find(|l| l.id == id)
            .map(Landmark::point)
    }

    pub fn fingertips(&self) -> Fingertips {
        Fingertips {
            thumb: self.get(THUMB_TIP),
            index: self.get(INDEX_TIP),
            middle: self.get(MIDDLE_TIP),
            ring: self.get(RING_TIP),
            pinky: self.get(PINKY_TIP),
        }
    }
}

/// Tip positions of one hand. Any of them may be missing from a partial set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fingertips {
    pub thumb: Option<(i32, i32)>,
    pub index: Option<(i32, i32)>,
    pub middle: Option<(i32, i32)>,
    pub ring: Option<(i32, i32)>,
    pub pinky: Option<(i32, i32)>,
}

impl Fingertips {
    /// Thumb-to-index pixel distance, if both tips are present.
    pub fn pinch_distance(&self) -> Option<f32> {
        match (self.thumb, self.index) {
            (Some(t), Some(i)) => Some(distance(t, i)),
            _ => None,
        }
    }

    /// Both thumb and index tips are present; anything less is malformed.
    pub fn is_complete(&self) -> bool {
        self.thumb.is_some() && self.index.is_some()
    }

    pub fn is_pinching(&self, threshold_px: f32) -> bool {
        self.pinch_distance().is_some_and(|d| d < threshold_px)
    }
}

pub fn distance(a: (i32, i32), b: (i32, i32)) -> f32 {
    let dx = a.0 as f32 - b.0 as f32;
    let dy = a.1 as f32 - b.1 as f32;
    (dx * dx + dy * dy).sqrt()
}

/// Picks the tracking hand: the first one that carries both thumb and index tips.
pub fn tracking_fingertips(hands: &[Hand]) -> Option<Fingertips> {
    hands
        .iter()
        .map(Hand::fingertips)
        .find(Fingertips::is_complete)
}

/// One captured image. Providers may ignore the pixels (replay, simulation).
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub width: u32,
    pub height: u32,
    /// Packed 3-channel pixels, row-major; may be empty.
    pub pixels: &'a [u8],
}

impl<'a> Frame<'a> {
    pub fn new(width: u32, height: u32, pixels: &'a [u8]) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn empty(width: u32, height: u32) -> Frame<'static> {
        Frame {
            width,
            height,
            pixels: &[],
        }
    }
}

pub trait HandLandmarkProvider {
    /// Returns zero or more hands detected in `frame`.
    fn detect(&mut self, frame: &Frame<'_>) -> PbResult<Vec<Hand>>;
}
