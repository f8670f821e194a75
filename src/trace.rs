//! Recorded landmark traces.
//!
//! A trace is a CSV file with the header `t_ms,hand,landmark,x,y`. Rows that
//! share a `t_ms` form one frame, grouped into hands by the `hand` index. A
//! row whose `hand` and `landmark` columns are empty records a frame in which
//! no hand was detected.

use crate::error::{PbResult, PinchError};
use crate::geometry::Viewport;
use crate::landmarks::{Frame, Hand, HandLandmarkProvider, Landmark};
use crate::session::{CommitEvent, Session};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

const HEADER: [&str; 5] = ["t_ms", "hand", "landmark", "x", "y"];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TraceFrame {
    pub at: Duration,
    pub hands: Vec<Hand>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trace {
    pub frames: Vec<TraceFrame>,
}

impl Trace {
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn duration(&self) -> Duration {
        self.frames.last().map_or(Duration::ZERO, |f| f.at)
    }
}

pub fn load_trace<P: AsRef<Path>>(path: P) -> PbResult<Trace> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        PinchError::Trace(format!("Could not open trace at '{}': {}", path.display(), e))
    })?;
    let trace = read_trace(file)?;
    info!(
        "Loaded trace '{}': {} frames over {:?}",
        path.display(),
        trace.len(),
        trace.duration()
    );
    Ok(trace)
}

pub fn read_trace<R: Read>(reader: R) -> PbResult<Trace> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    // t_ms -> hand index -> landmarks
    let mut frames: BTreeMap<u64, BTreeMap<usize, Vec<Landmark>>> = BTreeMap::new();
    let mut skipped_count = 0;

    for (row_idx, result) in rdr.records().enumerate() {
        let rec = match result {
            Ok(rec) => rec,
            Err(e) => {
                warn!("[Row {}] CSV Parse Error: {}", row_idx + 1, e);
                skipped_count += 1;
                continue;
            }
        };

        let Some(t_ms) = rec.get(0).and_then(|s| s.parse::<u64>().ok()) else {
            skipped_count += 1;
            continue;
        };
        let field = |i: usize| rec.get(i).unwrap_or("");
        if field(1).is_empty() && field(2).is_empty() {
            frames.entry(t_ms).or_default();
            continue;
        }

        let parsed = (
            field(1).parse::<usize>(),
            field(2).parse::<u8>(),
            field(3).parse::<i32>(),
            field(4).parse::<i32>(),
        );
        match parsed {
            (Ok(hand), Ok(id), Ok(x), Ok(y)) => {
                frames
                    .entry(t_ms)
                    .or_default()
                    .entry(hand)
                    .or_default()
                    .push(Landmark::new(id, x, y));
            }
            _ => {
                debug!("[Row {}] Unparseable landmark row: {:?}", row_idx + 1, rec);
                skipped_count += 1;
            }
        }
    }

    if skipped_count > 0 {
        warn!("Skipped {} invalid rows in trace.", skipped_count);
    }

    let frames = frames
        .into_iter()
        .map(|(t_ms, hands)| TraceFrame {
            at: Duration::from_millis(t_ms),
            hands: hands.into_values().map(Hand::new).collect(),
        })
        .collect();

    Ok(Trace { frames })
}

pub fn save_trace<P: AsRef<Path>>(trace: &Trace, path: P) -> PbResult<()> {
    let file = File::create(path.as_ref())?;
    write_trace(trace, file)?;
    info!(
        "Saved trace: {} frames to '{}'",
        trace.len(),
        path.as_ref().display()
    );
    Ok(())
}

pub fn write_trace<W: Write>(trace: &Trace, writer: W) -> PbResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER)?;

    for frame in &trace.frames {
        let t_ms = frame.at.as_millis().to_string();
        if frame.hands.is_empty() {
            wtr.write_record([t_ms.as_str(), "", "", "", ""])?;
            continue;
        }
        for (hand_idx, hand) in frame.hands.iter().enumerate() {
            for lm in &hand.landmarks {
                wtr.write_record([
                    t_ms.clone(),
                    hand_idx.to_string(),
                    lm.id.to_string(),
                    lm.x.to_string(),
                    lm.y.to_string(),
                ])?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}

/// Plays back a trace frame by frame as if it were a live detector.
pub struct TraceProvider<'a> {
    frames: std::slice::Iter<'a, TraceFrame>,
}

impl<'a> TraceProvider<'a> {
    pub fn new(trace: &'a Trace) -> Self {
        Self {
            frames: trace.frames.iter(),
        }
    }
}

impl HandLandmarkProvider for TraceProvider<'_> {
    fn detect(&mut self, _frame: &Frame<'_>) -> PbResult<Vec<Hand>> {
        self.frames
            .next()
            .map(|f| f.hands.clone())
            .ok_or_else(|| PinchError::Provider("trace exhausted".to_string()))
    }
}

/// Feeds every frame of `trace` through `session` at the trace's own
/// timestamps. Frames that fail are logged and skipped.
pub fn replay(trace: &Trace, session: &mut Session, viewport: Viewport) -> Vec<CommitEvent> {
    let mut provider = TraceProvider::new(trace);
    let frame = Frame::empty(viewport.width.max(0) as u32, viewport.height.max(0) as u32);
    let mut commits = Vec::new();

    for trace_frame in &trace.frames {
        match session.run_frame(&mut provider, Some(&frame), trace_frame.at) {
            Ok(Some(outcome)) => commits.extend(outcome.commit),
            Ok(None) => {}
            Err(e) => warn!("Frame at {:?} failed: {}", trace_frame.at, e),
        }
    }

    commits
}
