//! Command-line interface for Trialboard
//!
//! Provides argument parsing and subcommand handling for the Trialboard binary.

use crate::metrics::NormalizeMode;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Metric and trial table helpers for ML experiment dashboards
#[derive(Parser)]
#[command(name = "trialboard")]
#[command(version)]
#[command(about = "Metric and trial table helpers for ML experiment dashboards")]
#[command(
    long_about = "Trialboard decodes trial metric records, sorts trial tables the way the \
    dashboard does, formats durations and cancels trial jobs through the experiment manager."
)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "trialboard.toml", global = true)]
    pub config: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate a template configuration file
    Config {
        /// Output file path (prints to stdout if not specified)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Normalize the latest metric of a JSON array of metric records
    Final {
        /// JSON file holding an array of metric records
        #[arg(short, long)]
        input: PathBuf,

        /// Which view to normalize for
        #[arg(short, long, value_enum, default_value_t = NormalizeMode::Plot)]
        mode: NormalizeMode,
    },

    /// Sort a JSON array of table rows by a column
    Sort {
        /// JSON file holding an array of objects
        #[arg(short, long)]
        input: PathBuf,

        /// Column (object field) to sort by
        #[arg(short = 'k', long)]
        column: String,

        /// Sort in descending order
        #[arg(short, long)]
        descending: bool,
    },

    /// Format a trial duration given in seconds
    Duration {
        seconds: f64,
    },

    /// Cancel a trial job through the experiment manager
    Cancel {
        /// Trial job id
        trial_job_id: String,
    },
}

/// Generate template configuration content
pub fn generate_config_template() -> &'static str {
    r#"# Trialboard Configuration
# =========================
#
# This file configures the experiment manager endpoint and logging.
# Every setting is optional; the values below are the defaults.

# ─────────────────────────────────────────────────────────────────────────────
# EXPERIMENT MANAGER
# ─────────────────────────────────────────────────────────────────────────────

[manager]
# REST API root of the experiment manager
base_url = "http://localhost:8080/api/v1/nni"

# Per-request timeout in seconds (1-300)
request_timeout_seconds = 30

# ─────────────────────────────────────────────────────────────────────────────
# OBSERVABILITY
# ─────────────────────────────────────────────────────────────────────────────

[observability]
# Log level: "trace", "debug", "info", "warn", "error"
# RUST_LOG overrides this when set
log_level = "info"
"#
}
