use super::ViewportArgs;
use crate::reports;
use clap::Args;
use pinchboard::config::Config;
use pinchboard::error::PbResult;
use pinchboard::geometry::compute_layout;

#[derive(Args, Debug, Clone)]
pub struct LayoutArgs {
    #[command(flatten)]
    pub config: Config,

    #[command(flatten)]
    pub viewport: ViewportArgs,

    /// Emit the layout as JSON instead of tables.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: LayoutArgs, config: &Config) -> PbResult<()> {
    let layout = compute_layout(args.viewport.viewport(), &config.layout)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&layout)?);
        return Ok(());
    }

    reports::print_keyboard_grid(&layout);
    reports::print_layout_table(&layout);
    Ok(())
}
