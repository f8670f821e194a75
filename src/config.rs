use crate::error::{PbResult, PinchError};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub gesture: GestureParams,
    #[command(flatten)]
    pub layout: LayoutParams,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GestureParams {
    /// Continuous hover time before a key may commit.
    #[arg(long, default_value_t = 0.8)]
    pub dwell_secs: f32,
    /// Minimum time between two commits.
    #[arg(long, default_value_t = 0.3)]
    pub cooldown_secs: f32,
    /// Thumb-to-index distance (pixels) below which the hand is pinching.
    #[arg(long, default_value_t = 50.0)]
    pub pinch_threshold_px: f32,
}

impl Default for GestureParams {
    fn default() -> Self {
        Self {
            dwell_secs: 0.8,
            cooldown_secs: 0.3,
            pinch_threshold_px: 50.0,
        }
    }
}

impl GestureParams {
    pub fn dwell(&self) -> Duration {
        secs_to_duration(self.dwell_secs)
    }

    pub fn cooldown(&self) -> Duration {
        secs_to_duration(self.cooldown_secs)
    }
}

// Narrower keys have their center on an edge and can never be hit.
const MIN_KEY_SIZE_FLOOR: i32 = 2;

// Rounded to whole milliseconds so 0.8 means exactly 800ms.
fn secs_to_duration(secs: f32) -> Duration {
    Duration::from_millis((secs.max(0.0) as f64 * 1000.0).round() as u64)
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayoutParams {
    // === FRAME ===
    #[arg(long, default_value_t = 20)]
    pub margin: i32,
    #[arg(long, default_value_t = 8)]
    pub key_gap: i32,
    /// Share of the viewport height given to the keyboard band.
    #[arg(long, default_value_t = 0.4)]
    pub band_ratio: f32,

    // === KEY SIZE ===
    #[arg(long, default_value_t = 100)]
    pub max_key_size: i32,
    #[arg(long, default_value_t = 50)]
    pub min_key_size: i32,

    // === SPECIAL ROW ===
    #[arg(long, default_value_t = 0.5)]
    pub space_share: f32,
    #[arg(long, default_value_t = 0.25)]
    pub side_share: f32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            margin: 20,
            key_gap: 8,
            band_ratio: 0.4,
            max_key_size: 100,
            min_key_size: 50,
            space_share: 0.5,
            side_share: 0.25,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> PbResult<Self> {
        let content = fs::read_to_string(&path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Overrides fields that were given explicitly on the command line.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($section:ident, $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$section.$field = cli.$section.$field.clone();
                }
            };
        }

        update_if_present!(gesture, dwell_secs);
        update_if_present!(gesture, cooldown_secs);
        update_if_present!(gesture, pinch_threshold_px);

        update_if_present!(layout, margin);
        update_if_present!(layout, key_gap);
        update_if_present!(layout, band_ratio);
        update_if_present!(layout, max_key_size);
        update_if_present!(layout, min_key_size);
        update_if_present!(layout, space_share);
        update_if_present!(layout, side_share);
    }

    pub fn validate(&self) -> PbResult<()> {
        let g = &self.gesture;
        if !(g.dwell_secs.is_finite() && g.dwell_secs >= 0.0) {
            return Err(config_err(format!("dwell_secs must be >= 0, got {}", g.dwell_secs)));
        }
        if !(g.cooldown_secs.is_finite() && g.cooldown_secs >= 0.0) {
            return Err(config_err(format!(
                "cooldown_secs must be >= 0, got {}",
                g.cooldown_secs
            )));
        }
        if !(g.pinch_threshold_px.is_finite() && g.pinch_threshold_px > 0.0) {
            return Err(config_err(format!(
                "pinch_threshold_px must be > 0, got {}",
                g.pinch_threshold_px
            )));
        }

        let l = &self.layout;
        if l.margin < 0 || l.key_gap < 0 {
            return Err(config_err(format!(
                "margin and key_gap must be >= 0, got {} and {}",
                l.margin, l.key_gap
            )));
        }
        if l.min_key_size < MIN_KEY_SIZE_FLOOR {
            return Err(config_err(format!(
                "min_key_size must be >= {}, got {}",
                MIN_KEY_SIZE_FLOOR,
                l.min_key_size
            )));
        }
        if l.max_key_size < l.min_key_size {
            return Err(config_err(format!(
                "max_key_size ({}) is smaller than min_key_size ({})",
                l.max_key_size, l.min_key_size
            )));
        }
        if !(l.band_ratio > 0.0 && l.band_ratio <= 1.0) {
            return Err(config_err(format!(
                "band_ratio must be in (0, 1], got {}",
                l.band_ratio
            )));
        }
        if !(l.space_share > 0.0 && l.side_share > 0.0) {
            return Err(config_err("space_share and side_share must be > 0".to_string()));
        }
        if l.space_share + 2.0 * l.side_share > 1.0 + f32::EPSILON {
            return Err(config_err(format!(
                "special row overflows: space_share + 2 * side_share = {}",
                l.space_share + 2.0 * l.side_share
            )));
        }
        Ok(())
    }
}

fn config_err(msg: String) -> PinchError {
    PinchError::Config(msg)
}
