use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};

use uireplay_core::api::{load_config, NullDriver, ReplayConfig, ReplayEngine};

#[derive(Parser, Debug)]
#[command(name = "uireplay", about = "Replay recorded device-automation scenarios")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replay a recorded scenario and report the outcome.
    Run(RunArgs),
    /// List the supported tool vocabulary.
    Tools,
}

#[derive(clap::Args, Debug)]
pub struct RunArgs {
    /// Path to the recorded scenario JSON file.
    pub scenario: PathBuf,

    /// Write the full report JSON to this path.
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Drive this target instead of the one named in the scenario.
    #[arg(long)]
    pub target: Option<String>,

    /// Configuration file (defaults to ./uireplay.toml when present).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Attempts per action beyond the first.
    #[arg(long)]
    pub max_retries: Option<u32>,

    /// Speed multiplier for recorded delays (> 1 is faster).
    #[arg(long)]
    pub speed: Option<f64>,

    /// Abort at the first failed action.
    #[arg(long)]
    pub stop_on_error: bool,

    /// Capture evidence before every action.
    #[arg(long)]
    pub capture_before: bool,

    /// Capture evidence after every successful action.
    #[arg(long)]
    pub capture_after: bool,

    /// Disable the default on-error evidence capture.
    #[arg(long)]
    pub no_capture_on_error: bool,

    /// Skip target preparation before the first action.
    #[arg(long)]
    pub no_prepare: bool,

    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Run the CLI; returns the process exit code.
pub async fn run(cli: Cli) -> anyhow::Result<i32> {
    match cli.command {
        Command::Run(args) => run_replay(args).await,
        Command::Tools => {
            let dispatcher =
                uireplay_core::api::ActionDispatcher::new(Arc::new(NullDriver));
            for tool in dispatcher.supported_tools() {
                let sig = dispatcher.tool_signature(tool).unwrap_or("()");
                println!("{tool}{sig}");
            }
            Ok(0)
        }
    }
}

async fn run_replay(args: RunArgs) -> anyhow::Result<i32> {
    let config = build_config(&args).context("loading replay configuration")?;

    // The physical automation driver is wired in by embedders; the shipped
    // binary runs against the null driver, which fails every tool invocation
    // but still exercises the full replay and reporting path.
    let mut engine = ReplayEngine::new(Arc::new(NullDriver), config);
    if let Some(target) = &args.target {
        engine = engine.with_target_override(target.clone());
    }

    let doc = engine.replay(&args.scenario).await;

    if let Some(path) = &args.report {
        doc.save(path)
            .with_context(|| format!("writing report to {}", path.display()))?;
    }

    match args.format {
        OutputFormat::Text => print!("{}", doc.format_text()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&doc)?),
    }

    Ok(if doc.success { 0 } else { 1 })
}

fn build_config(args: &RunArgs) -> anyhow::Result<ReplayConfig> {
    let mut cfg = load_config(args.config.as_deref())?;

    if let Some(v) = args.max_retries {
        cfg.max_retries = v;
    }
    if let Some(v) = args.speed {
        cfg.speed_multiplier = v;
    }
    if args.stop_on_error {
        cfg.stop_on_error = true;
    }
    if args.capture_before {
        cfg.capture.before = true;
    }
    if args.capture_after {
        cfg.capture.after = true;
    }
    if args.no_capture_on_error {
        cfg.capture.on_error = false;
    }
    if args.no_prepare {
        cfg.prepare_target = false;
    }

    Ok(cfg)
}
