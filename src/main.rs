//! Trialboard command-line tool
//!
//! Runs the dashboard helpers against local files and the experiment manager.

use clap::Parser;
use std::collections::BTreeMap;
use std::path::Path;
use trialboard::cli::{Cli, Command, generate_config_template};
use trialboard::config::Config;
use trialboard::error::{AppError, AppResult};
use trialboard::format::{convert_duration, format_accuracy};
use trialboard::manager::ManagerClient;
use trialboard::metrics::{MetricRecord, MetricValue, NormalizedMetric, normalize_metric};
use trialboard::table::copy_and_sort;
use trialboard::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        // No subcommand: just check the configuration
        let config = Config::from_file(&cli.config)?;
        telemetry::init(&config.observability.log_level);
        tracing::info!(
            manager = config.manager.base_url(),
            "Configuration {} is valid",
            cli.config
        );
        return Ok(());
    };

    match command {
        Command::Config { output } => {
            let template = generate_config_template();
            match output {
                Some(path) => {
                    std::fs::write(&path, template)?;
                    eprintln!("Wrote configuration template to {}", path);
                }
                None => print!("{}", template),
            }
            Ok(())
        }
        command => run(command, &cli.config).await,
    }
}

async fn run(command: Command, config_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default(config_path)?;
    telemetry::init(&config.observability.log_level);

    match command {
        Command::Final { input, mode } => {
            let records: Vec<MetricRecord> = read_json(&input)?;
            let line = match normalize_metric(&records, mode)? {
                NormalizedMetric::Scalar(n) => format_accuracy(n),
                NormalizedMetric::Final(metric) => serde_json::to_string(&metric)?,
                NormalizedMetric::Unsupported => "unsupported".to_string(),
            };
            println!("{}", line);
        }
        Command::Sort {
            input,
            column,
            descending,
        } => {
            let rows: Vec<BTreeMap<String, MetricValue>> = read_json(&input)?;
            let sorted = copy_and_sort(&rows, &column, descending);
            println!("{}", serde_json::to_string_pretty(&sorted)?);
        }
        Command::Duration { seconds } => {
            println!("{}", convert_duration(seconds));
        }
        Command::Cancel { trial_job_id } => {
            let client = ManagerClient::new(&config.manager)?;
            client.kill_job(&trial_job_id).await?;
            println!("Cancel the job successfully");
        }
        // Written by main() without loading configuration
        Command::Config { .. } => {}
    }

    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> AppResult<T> {
    let display = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|source| AppError::InputRead {
        path: display.clone(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| AppError::InputParse {
        path: display,
        source,
    })
}
