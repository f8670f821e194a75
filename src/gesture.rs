//! Hover/pinch debouncing.
//!
//! Per-frame finger observations are noisy; this module turns them into
//! discrete, non-repeating key commits. The machine is a pure function,
//! [`step`], over an explicit [`GestureState`] so callers inject timestamps
//! instead of reading a clock. A key commits once the index fingertip has
//! hovered it for the dwell time, the hand is pinching, and the cooldown since
//! the previous commit has run out.

use crate::config::GestureParams;
use crate::geometry::hit::hovered_key;
use crate::geometry::KeyboardLayout;
use crate::keys::Key;
use crate::landmarks::Fingertips;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Time since the session started.
pub type Timestamp = Duration;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestureState {
    pub hover_key: Option<Key>,
    /// Start of the current dwell. `None` while hovering means the timer is
    /// re-armed on the next observation of the same key.
    pub hover_since: Option<Timestamp>,
    pub last_commit: Option<Timestamp>,
    /// Key committed on the most recent frame, for render feedback only.
    pub committed_key: Option<Key>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    /// No tracking fingertip this frame.
    Absent,
    Tracked { hovered: Option<Key>, pinching: bool },
}

impl Observation {
    /// Hit-tests the index tip and evaluates the pinch for one frame.
    /// A hand missing its thumb or index tip counts as absent.
    pub fn from_fingertips(
        tips: Option<&Fingertips>,
        layout: &KeyboardLayout,
        pinch_threshold_px: f32,
    ) -> Self {
        match tips {
            Some(t) if t.is_complete() => Observation::Tracked {
                hovered: hovered_key(layout, t.index),
                pinching: t.is_pinching(pinch_threshold_px),
            },
            _ => Observation::Absent,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Idle,
    Hovering {
        key: Key,
        since: Option<Timestamp>,
    },
    /// The frame on which `key` committed.
    Committing { key: Key },
}

impl GestureState {
    pub fn phase(&self) -> GesturePhase {
        match (self.committed_key, self.hover_key) {
            (Some(key), _) => GesturePhase::Committing { key },
            (None, Some(key)) => GesturePhase::Hovering {
                key,
                since: self.hover_since,
            },
            (None, None) => GesturePhase::Idle,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.phase() == GesturePhase::Idle
    }

    fn cooldown_elapsed(&self, now: Timestamp, cooldown: Duration) -> bool {
        match self.last_commit {
            Some(last) => now.saturating_sub(last) > cooldown,
            None => true,
        }
    }
}

/// Advances the machine by one frame.
///
/// Returns the next state and the key committed on this frame, if any.
pub fn step(
    state: &GestureState,
    observation: Observation,
    now: Timestamp,
    params: &GestureParams,
) -> (GestureState, Option<Key>) {
    let mut next = GestureState {
        committed_key: None,
        ..*state
    };

    let (key, pinching) = match observation {
        Observation::Tracked {
            hovered: Some(key),
            pinching,
        } => (key, pinching),
        Observation::Absent | Observation::Tracked { hovered: None, .. } => {
            if state.hover_key.is_some() {
                debug!("Hover released ({:?})", observation);
            }
            next.hover_key = None;
            next.hover_since = None;
            return (next, None);
        }
    };

    if state.hover_key != Some(key) {
        debug!("Hover {} at {:?}", key, now);
        next.hover_key = Some(key);
        next.hover_since = Some(now);
        return (next, None);
    }

    let Some(since) = state.hover_since else {
        next.hover_since = Some(now);
        return (next, None);
    };

    let dwelled = now.saturating_sub(since) >= params.dwell();
    if dwelled && pinching && state.cooldown_elapsed(now, params.cooldown()) {
        debug!("Commit {} at {:?}", key, now);
        next.last_commit = Some(now);
        next.hover_since = None;
        next.committed_key = Some(key);
        return (next, Some(key));
    }

    (next, None)
}
