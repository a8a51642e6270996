//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for planning results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Panel, debate transcript, requirements document and execution plan
    Full,
    /// Only the requirements document
    Document,
    /// JSON output
    Json,
}

impl From<OutputFormat> for planner_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => Self::Full,
            OutputFormat::Document => Self::Document,
            OutputFormat::Json => Self::Json,
        }
    }
}

/// CLI arguments for swarm-planner
#[derive(Parser, Debug)]
#[command(name = "swarm-planner")]
#[command(author, version, about = "Swarm Planner - A panel of specialists turns a project brief into requirements")]
#[command(long_about = r#"
Swarm Planner convenes a panel of specialist workers to debate a project
brief and build a shared requirements document.

The process has three stages:
1. Panel design: a designer proposes the workers (or a canonical panel is used)
2. Rounds: every worker contributes once per round, in parallel
3. Aggregation: the document is consolidated, then an execution plan is drafted

Configuration files are loaded from (in priority order):
1. SWARM_PLANNER_* environment variables
2. --config <path>     Explicit config file
3. ./planner.toml      Project-level config
4. ~/.config/swarm-planner/config.toml   Global config

Example:
  swarm-planner --brief brief.json
  swarm-planner --brief brief.json --rounds 3 --output full
  cat brief.json | swarm-planner --brief - --stream
"#)]
pub struct Cli {
    /// Project brief as a JSON file, or `-` to read stdin
    #[arg(short, long, value_name = "PATH", required_unless_present = "show_config")]
    pub brief: Option<PathBuf>,

    /// Number of discussion rounds (2-4)
    #[arg(short, long, value_name = "N")]
    pub rounds: Option<u8>,

    /// Print each session event as one NDJSON line on stdout
    #[arg(long)]
    pub stream: bool,

    /// Output format (defaults to the configured format, then `document`)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Model used for every reasoning call
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Skip drafting the execution plan
    #[arg(long)]
    pub no_execution_plan: bool,

    /// Write diagnostics to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Whether the brief comes from stdin.
    pub fn brief_from_stdin(&self) -> bool {
        self.brief.as_deref().is_some_and(|p| p.as_os_str() == "-")
    }
}
