use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use pinchboard::config::Config;
use pinchboard::error::PbResult;
use std::path::Path;
use std::process;
use tracing::{error, info, warn, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with gesture and layout parameters.
    #[arg(global = true, long = "config")]
    config_file: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the key rectangles for a viewport.
    Layout(cmd::layout::LayoutArgs),
    /// Audit layout invariants across many viewport sizes.
    Validate(cmd::validate::ValidateArgs),
    /// Replay a recorded landmark trace.
    Replay(cmd::replay::ReplayArgs),
    /// Type text with a simulated hand.
    Demo(cmd::demo::DemoArgs),
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let (cli_config, sub_name) = match &cli.command {
        Commands::Layout(args) => (&args.config, "layout"),
        Commands::Validate(args) => (&args.config, "validate"),
        Commands::Replay(args) => (&args.config, "replay"),
        Commands::Demo(args) => (&args.config, "demo"),
    };
    let Some(sub_matches) = matches.subcommand_matches(sub_name) else {
        error!("Missing matches for subcommand '{}'", sub_name);
        process::exit(2);
    };

    let config = resolve_config(cli.config_file.as_deref(), cli_config, sub_matches)
        .unwrap_or_else(|e| {
            error!("❌ {}", e);
            process::exit(1);
        });

    let result = match cli.command {
        Commands::Layout(args) => cmd::layout::run(args, &config),
        Commands::Validate(args) => cmd::validate::run(args, &config),
        Commands::Replay(args) => cmd::replay::run(args, config),
        Commands::Demo(args) => cmd::demo::run(args, config),
    };

    if let Err(e) = result {
        error!("❌ {}", e);
        process::exit(1);
    }
}

/// File values form the base; flags given on the command line win.
fn resolve_config(path: Option<&str>, cli: &Config, matches: &ArgMatches) -> PbResult<Config> {
    let Some(path) = path else {
        cli.validate()?;
        return Ok(cli.clone());
    };

    if !Path::new(path).exists() {
        warn!("⚠️  Config file '{}' not found. Using defaults.", path);
        cli.validate()?;
        return Ok(cli.clone());
    }

    info!("⚙️  Loading config from: {}", path);
    let mut config = Config::load_from_file(path)?;
    config.merge_from_cli(cli, matches);
    config.validate()?;
    Ok(config)
}
