use crate::buffer::{Edit, TextBuffer};
use crate::config::Config;
use crate::error::PbResult;
use crate::gesture::{self, GestureState, Observation, Timestamp};
use crate::geometry::{compute_layout, KeyboardLayout, Viewport};
use crate::keys::Key;
use crate::landmarks::{tracking_fingertips, Fingertips, Frame, Hand, HandLandmarkProvider};
use crate::render::FrameView;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Emitted once per committed key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommitEvent {
    pub key: Key,
    pub edit: Edit,
    pub at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct FrameOutcome {
    pub layout: KeyboardLayout,
    pub fingertips: Option<Fingertips>,
    pub hovered: Option<Key>,
    pub commit: Option<CommitEvent>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub processed: u64,
    pub skipped: u64,
    pub failed: u64,
    pub commits: u64,
}

/// Owns the per-session core state and runs the per-frame pipeline.
#[derive(Debug, Clone)]
pub struct Session {
    config: Config,
    gesture: GestureState,
    buffer: TextBuffer,
    layout: Option<KeyboardLayout>,
    stats: FrameStats,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            gesture: GestureState::default(),
            buffer: TextBuffer::new(),
            layout: None,
            stats: FrameStats::default(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn text(&self) -> &str {
        self.buffer.as_str()
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Layout of the last successfully processed frame.
    pub fn layout(&self) -> Option<&KeyboardLayout> {
        self.layout.as_ref()
    }

    /// Runs one frame of already-detected hands through the pipeline.
    ///
    /// An invalid viewport fails the frame before any state is touched.
    pub fn process(
        &mut self,
        viewport: Viewport,
        hands: &[Hand],
        now: Timestamp,
    ) -> PbResult<FrameOutcome> {
        let layout = match compute_layout(viewport, &self.config.layout) {
            Ok(l) => l,
            Err(e) => {
                self.stats.failed += 1;
                return Err(e);
            }
        };

        let fingertips = tracking_fingertips(hands);
        let observation = Observation::from_fingertips(
            fingertips.as_ref(),
            &layout,
            self.config.gesture.pinch_threshold_px,
        );
        let hovered = match observation {
            Observation::Tracked { hovered, .. } => hovered,
            Observation::Absent => None,
        };

        let (next, committed) = gesture::step(&self.gesture, observation, now, &self.config.gesture);
        self.gesture = next;

        let commit = committed.map(|key| {
            let edit = self.buffer.apply(key);
            info!("Typed: {} ({:?}) -> \"{}\"", key, edit, self.buffer.as_str());
            self.stats.commits += 1;
            CommitEvent { key, edit, at: now }
        });

        self.stats.processed += 1;
        self.layout = Some(layout.clone());

        Ok(FrameOutcome {
            layout,
            fingertips,
            hovered,
            commit,
        })
    }

    /// Detects hands in `frame` and processes them.
    ///
    /// A missing frame is skipped without any state change and yields
    /// `Ok(None)`. A provider failure is isolated to this frame.
    pub fn run_frame<P: HandLandmarkProvider>(
        &mut self,
        provider: &mut P,
        frame: Option<&Frame<'_>>,
        now: Timestamp,
    ) -> PbResult<Option<FrameOutcome>> {
        let Some(frame) = frame else {
            debug!("No frame at {:?}, skipping", now);
            self.stats.skipped += 1;
            return Ok(None);
        };

        let hands = match provider.detect(frame) {
            Ok(h) => h,
            Err(e) => {
                warn!("Landmark detection failed at {:?}: {}", now, e);
                self.stats.failed += 1;
                return Err(e);
            }
        };

        let viewport = Viewport::new(frame.width as i32, frame.height as i32);
        self.process(viewport, &hands, now).map(Some)
    }

    /// Render projection of the current state. `None` until a frame has been
    /// processed.
    pub fn view(&self, now: Timestamp) -> Option<FrameView<'_>> {
        self.layout.as_ref().map(|layout| FrameView {
            layout,
            gesture: &self.gesture,
            buffer: &self.buffer,
            now,
            dwell: self.config.gesture.dwell(),
        })
    }
}
