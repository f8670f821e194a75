use super::ViewportArgs;
use crate::reports;
use clap::Args;
use pinchboard::config::Config;
use pinchboard::error::PbResult;
use pinchboard::geometry::compute_layout;
use pinchboard::session::Session;
use pinchboard::simulate::SimulatedTypist;
use pinchboard::trace::{replay, save_trace};
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct DemoArgs {
    #[command(flatten)]
    pub config: Config,

    #[command(flatten)]
    pub viewport: ViewportArgs,

    #[arg(short, long, default_value = "HELLO WORLD")]
    pub text: String,

    #[arg(long, default_value_t = 7)]
    pub seed: u64,

    #[arg(long, default_value_t = 30)]
    pub fps: u32,

    /// Save the synthesized trace to this CSV file.
    #[arg(long)]
    pub record: Option<String>,
}

pub fn run(args: DemoArgs, config: Config) -> PbResult<()> {
    let viewport = args.viewport.viewport();
    let layout = compute_layout(viewport, &config.layout)?;

    let mut typist = SimulatedTypist::new(&config.gesture, args.seed);
    typist.fps = args.fps;
    let trace = typist.type_text(&args.text, &layout);
    info!(
        "🖐️  Simulated {} frames ({:?}) for {:?}",
        trace.len(),
        trace.duration(),
        args.text
    );

    if let Some(path) = &args.record {
        save_trace(&trace, path)?;
    }

    let mut session = Session::new(config);
    let commits = replay(&trace, &mut session, viewport);

    reports::print_commit_log(&commits);
    reports::print_session_summary(&session);
    Ok(())
}
