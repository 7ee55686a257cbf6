use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use trafficwatch_core::conf::{MonitorConfig, load_config_file};
use trafficwatch_core::generator::{DEFAULT_LINES_PER_SECOND, GeneratorConfig};
use trafficwatch_core::logging::{DisplayMode, default_display_mode};

#[derive(Parser, Debug)]
#[command(
    name = "trafficwatch",
    version,
    about = "Real-time HTTP access log monitor"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Follow access logs and show live traffic (default)
    Run(RunArgs),

    /// Append synthetic access log lines to a file
    Generate(GenerateArgs),
}

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Access log to follow; repeat for several files
    #[arg(short = 'f', long = "file")]
    pub files: Vec<PathBuf>,

    /// Alert when the scene rate exceeds the lifetime rate by more than this (lines/s)
    #[arg(long)]
    pub threshold: Option<u64>,

    /// Frame length in seconds
    #[arg(long)]
    pub frame_interval: Option<u64>,

    /// Scene length in seconds; a whole multiple of the frame
    #[arg(long)]
    pub scene_interval: Option<u64>,

    /// TOML config file; flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print one JSON snapshot per frame instead of the dashboard
    #[arg(long, conflicts_with = "quiet")]
    pub json: bool,

    /// No dashboard output
    #[arg(long)]
    pub quiet: bool,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl RunArgs {
    pub fn display_mode(&self) -> DisplayMode {
        if self.json {
            DisplayMode::Json
        } else if self.quiet {
            DisplayMode::Quiet
        } else {
            default_display_mode()
        }
    }

    /// Defaults, then the config file, then flags.
    pub fn resolve_config(&self) -> Result<MonitorConfig> {
        let mut cfg = MonitorConfig::default();

        if let Some(path) = &self.config {
            load_config_file(path)?.apply(&mut cfg);
        }

        if !self.files.is_empty() {
            cfg.files = self.files.clone();
        }
        if let Some(threshold) = self.threshold {
            cfg.alert_threshold = threshold;
        }
        if let Some(secs) = self.frame_interval {
            cfg.frame_interval = Duration::from_secs(secs);
        }
        if let Some(secs) = self.scene_interval {
            cfg.scene_interval = Duration::from_secs(secs);
        }

        cfg.validate()?;
        Ok(cfg)
    }
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// File to append to
    #[arg(short, long)]
    pub dest: PathBuf,

    /// Replay this log instead of generating random lines
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// Lines per second
    #[arg(short, long, default_value_t = DEFAULT_LINES_PER_SECOND)]
    pub lps: u32,
}

impl From<GenerateArgs> for GeneratorConfig {
    fn from(args: GenerateArgs) -> Self {
        Self {
            dest: args.dest,
            source: args.source,
            lines_per_second: args.lps,
        }
    }
}
