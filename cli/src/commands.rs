//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for consultation results
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Full formatted output with every contribution
    Full,
    /// Only the consensus and final recommendation
    Summary,
    /// JSON output
    Json,
}

/// CLI arguments for aida-consult
#[derive(Parser, Debug)]
#[command(name = "aida-consult")]
#[command(author, version, about = "AI clinical consultations - specialists discuss and reach consensus")]
#[command(long_about = r#"
aida-consult runs a clinical question past a panel of specialist AI agents
and aggregates their opinions into a consensus recommendation.

The process has three phases:
1. Intake: the consultation record is opened and the query persisted
2. Analysis: each selected specialist answers independently
3. Consensus: confidences are averaged and a recommendation is chosen

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./aida.toml         Project-level config
3. ~/.config/aida-consult/config.toml   Global config

Example:
  aida-consult --patient-id p-42 --patient-name "Ada Lovelace" \
      "What could be causing persistent headaches and elevated blood pressure?"
  aida-consult --patient-id p-42 --patient-name "Ada Lovelace" \
      --symptom fever --symptom cough -a central -a general
  aida-consult --patient-id p-42 --patient-name "Ada Lovelace" --overview
"#)]
pub struct Cli {
    /// The clinical question (omit when using --symptom or --overview)
    pub query: Option<String>,

    /// Patient identifier
    #[arg(long, value_name = "ID")]
    pub patient_id: String,

    /// Patient display name
    #[arg(long, value_name = "NAME")]
    pub patient_name: String,

    /// Observed symptom (can be specified multiple times)
    #[arg(short, long, value_name = "SYMPTOM")]
    pub symptom: Vec<String>,

    /// Request a whole-patient overview instead of a question
    #[arg(long)]
    pub overview: bool,

    /// Agents to consult (can be specified multiple times)
    #[arg(short, long, value_name = "AGENT")]
    pub agent: Vec<String>,

    /// Attach a file to the consultation after it completes
    #[arg(long, value_name = "PATH")]
    pub attach: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Force the in-memory store regardless of configuration
    #[arg(long)]
    pub offline: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
