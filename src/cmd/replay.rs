use super::ViewportArgs;
use crate::reports;
use clap::Args;
use pinchboard::config::Config;
use pinchboard::error::PbResult;
use pinchboard::session::Session;
use pinchboard::trace::{load_trace, replay};
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct ReplayArgs {
    #[command(flatten)]
    pub config: Config,

    #[command(flatten)]
    pub viewport: ViewportArgs,

    /// CSV trace with columns t_ms,hand,landmark,x,y.
    #[arg(short, long)]
    pub trace: String,
}

pub fn run(args: ReplayArgs, config: Config) -> PbResult<()> {
    let trace = load_trace(&args.trace)?;
    let mut session = Session::new(config);

    info!("▶️  Replaying {} frames...", trace.len());
    let commits = replay(&trace, &mut session, args.viewport.viewport());

    reports::print_commit_log(&commits);
    reports::print_session_summary(&session);
    Ok(())
}
