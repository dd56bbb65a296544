//! Run command implementation
//!
//! This module implements the `run` command: read a batch of FHIR
//! resources, de-identify them through one session, and write the
//! privacy-safe documents out as NDJSON.

use crate::config::load_config;
use crate::deid::DeidSession;
use clap::Args;
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Input file: NDJSON (one resource per line) or a JSON array
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output file for de-identified resources (NDJSON); stdout if omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write the session report as JSON to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Override the date shift window (days)
    #[arg(long)]
    pub offset_range_days: Option<i64>,
}

impl RunArgs {
    /// Execute the run command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(input = %self.input.display(), "Starting de-identification run");

        // Load configuration
        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Configuration error: {e}");
                return Ok(2);
            }
        };

        // Apply CLI overrides
        if let Some(range) = self.offset_range_days {
            tracing::info!(offset_range_days = range, "Overriding offset range from CLI");
            config.deid.offset_range_days = range;
        }

        if let Err(e) = config.deid.validate() {
            eprintln!("Configuration error: {e}");
            return Ok(2);
        }

        // Read and parse the input batch
        let values = match read_input(&self.input) {
            Ok(v) => v,
            Err(e) => {
                eprintln!("Failed to read input: {e}");
                return Ok(2);
            }
        };
        tracing::info!(count = values.len(), "Input batch loaded");

        // Transform
        let session = DeidSession::new(config.deid)?;
        let (results, report) = session.transform_batch(values);

        // Write output
        let mut lines = String::new();
        for result in &results {
            lines.push_str(&serde_json::to_string(&result.data)?);
            lines.push('\n');
        }
        match &self.output {
            Some(path) => {
                fs::write(path, lines)?;
                tracing::info!(output = %path.display(), count = results.len(), "Output written");
            }
            None => {
                let stdout = std::io::stdout();
                let mut handle = stdout.lock();
                handle.write_all(lines.as_bytes())?;
            }
        }

        // Write the JSON report if requested
        if let Some(path) = &self.report {
            report.write_to_file(path)?;
            tracing::info!(report = %path.display(), "Session report written");
        }

        eprintln!("{}", report.format_console());

        if report.failed_resources > 0 {
            Ok(1)
        } else {
            Ok(0)
        }
    }
}

/// Read a batch of JSON resources from a file
///
/// Accepts either NDJSON (one document per line) or a single JSON array.
fn read_input(path: &PathBuf) -> anyhow::Result<Vec<Value>> {
    let contents = fs::read_to_string(path)?;
    let trimmed = contents.trim_start();

    if trimmed.starts_with('[') {
        let values: Vec<Value> = serde_json::from_str(trimmed)?;
        return Ok(values);
    }

    let mut values = Vec::new();
    for (number, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let value: Value = serde_json::from_str(line)
            .map_err(|e| anyhow::anyhow!("line {}: {}", number + 1, e))?;
        values.push(value);
    }
    Ok(values)
}
