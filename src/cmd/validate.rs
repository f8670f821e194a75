use crate::reports::{self, AuditResult};
use clap::Args;
use pinchboard::config::{Config, LayoutParams};
use pinchboard::error::{PbResult, PinchError};
use pinchboard::geometry::hit::hit_test;
use pinchboard::geometry::{compute_layout, Viewport};
use pinchboard::keys::logical_rows;
use rayon::prelude::*;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub config: Config,

    #[arg(long, default_value_t = 160)]
    pub min_width: i32,
    #[arg(long, default_value_t = 3840)]
    pub max_width: i32,
    #[arg(long, default_value_t = 120)]
    pub min_height: i32,
    #[arg(long, default_value_t = 2160)]
    pub max_height: i32,
    #[arg(long, default_value_t = 40)]
    pub step: i32,
}

pub fn run(args: ValidateArgs, config: &Config) -> PbResult<()> {
    if args.step <= 0 || args.min_width <= 0 || args.min_height <= 0 {
        return Err(PinchError::Config(
            "step, min-width and min-height must be positive".to_string(),
        ));
    }

    let step = args.step as usize;
    let viewports: Vec<Viewport> = (args.min_width..=args.max_width)
        .step_by(step)
        .flat_map(|w| {
            (args.min_height..=args.max_height)
                .step_by(step)
                .map(move |h| Viewport::new(w, h))
        })
        .collect();

    info!("🔎 Auditing {} viewport sizes...", viewports.len());

    let results: Vec<AuditResult> = viewports
        .par_iter()
        .map(|&vp| audit_viewport(vp, &config.layout))
        .collect();

    reports::print_audit_report(&results);

    let failures = results.iter().filter(|r| !r.violations.is_empty()).count();
    if failures > 0 {
        return Err(PinchError::Validation(format!(
            "{} of {} viewports violate layout invariants",
            failures,
            results.len()
        )));
    }
    info!("✅ All layouts passed.");
    Ok(())
}

pub fn audit_viewport(viewport: Viewport, params: &LayoutParams) -> AuditResult {
    let mut violations = Vec::new();

    let layout = match compute_layout(viewport, params) {
        Ok(l) => l,
        Err(e) => {
            return AuditResult {
                viewport,
                key_size: 0,
                violations: vec![e.to_string()],
            }
        }
    };

    match compute_layout(viewport, params) {
        Ok(again) if again == layout => {}
        _ => violations.push("layout is not deterministic".to_string()),
    }

    let expected: usize = logical_rows().iter().map(Vec::len).sum();
    if layout.key_count() != expected {
        violations.push(format!(
            "expected {} keys, found {}",
            expected,
            layout.key_count()
        ));
    }

    let rects: Vec<_> = layout.keys().collect();
    for (i, a) in rects.iter().enumerate() {
        if a.width <= 0 || a.height <= 0 {
            violations.push(format!("{} has degenerate size {}x{}", a.key, a.width, a.height));
        }
        for b in &rects[i + 1..] {
            if a.intersects(b) {
                violations.push(format!("{} overlaps {}", a.key, b.key));
            }
        }
        let (cx, cy) = a.center();
        let hit = hit_test(&layout, cx, cy).map(|r| r.key);
        if hit != Some(a.key) {
            violations.push(format!("center of {} hit-tests to {:?}", a.key, hit));
        }
    }

    AuditResult {
        viewport,
        key_size: layout.key_size,
        violations,
    }
}
