use anyhow::{Context, Result};
use chrono::{DateTime, Duration, FixedOffset, Local};
use clap::{ArgGroup, Parser};
use extractors::{
    daily_totals, filter_by_date_range, filter_summaries_by_date_range, qualify_record_type,
    simplify_record_type, write_daily_totals_csv, write_records_csv, HealthExportExtractor,
};
use serde::Serialize;
use std::path::PathBuf;

mod config;

use crate::config::CliConfig;

#[derive(Parser, Debug)]
#[command(name = "healthkit-parse", about = "Parse and analyze Apple Health export data")]
#[command(group(
    ArgGroup::new("mode")
        .args(["list_types", "workouts", "summaries"]),
))]
struct Cli {
    /// Path to the Apple Health export.xml file
    #[arg(value_name = "XML_FILE")]
    xml_file: PathBuf,

    /// Filter by record type (e.g. StepCount, HeartRate)
    #[arg(long = "type", value_name = "TYPE")]
    record_type: Option<String>,

    /// Number of days to show [config default: 7]
    #[arg(long)]
    days: Option<u32>,

    /// Maximum number of entries to print [config default: 10]
    #[arg(long)]
    limit: Option<usize>,

    /// List all available record types and exit
    #[arg(long)]
    list_types: bool,

    /// Show workouts instead of records
    #[arg(long)]
    workouts: bool,

    /// Show daily activity summaries instead of records
    #[arg(long)]
    summaries: bool,

    /// Export the selected records to a CSV file
    #[arg(long, value_name = "FILE", conflicts_with = "mode")]
    output: Option<PathBuf>,

    /// With --output, write one row of totals per day
    #[arg(long, requires = "output")]
    daily: bool,

    /// Print entries as JSON lines
    #[arg(long)]
    json: bool,

    /// Config file (default: <config dir>/healthkit/cli.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, config_path) =
        CliConfig::load(cli.config.as_deref()).context("Failed to load healthkit CLI config")?;
    init_tracing(&config.logging.level);
    tracing::debug!("Using config {:?}", config_path);

    let days = cli.days.unwrap_or(config.defaults.days);
    let limit = cli.limit.unwrap_or(config.defaults.sample_limit);

    let mut extractor = HealthExportExtractor::new(&cli.xml_file);

    if cli.list_types {
        return list_types(&mut extractor, cli.json);
    }

    let end = Local::now().fixed_offset();
    let start = end
        - Duration::try_days(i64::from(days))
            .ok_or_else(|| anyhow::anyhow!("--days {} is out of range", days))?;

    if cli.workouts {
        show_workouts(&mut extractor, start, end, days, limit, cli.json)
    } else if cli.summaries {
        show_summaries(&mut extractor, start, end, days, limit, cli.json)
    } else {
        show_records(&cli, &mut extractor, start, end, days, limit)
    }
}

fn init_tracing(default_level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}

fn list_types(extractor: &mut HealthExportExtractor, json: bool) -> Result<()> {
    let record_types = extractor
        .record_types()
        .with_context(|| format!("Failed to read {:?}", extractor.path()))?;

    if json {
        println!("{}", serde_json::to_string(&record_types)?);
        return Ok(());
    }

    println!("Available record types:");
    for record_type in &record_types {
        println!("  {}", simplify_record_type(record_type));
    }
    println!("\nTotal: {} types", record_types.len());
    Ok(())
}

fn show_records(
    cli: &Cli,
    extractor: &mut HealthExportExtractor,
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
    days: u32,
    limit: usize,
) -> Result<()> {
    let full_type = type_filter(cli.record_type.as_deref());
    let records = extractor
        .parse_records(full_type.as_deref())
        .with_context(|| format!("Failed to read {:?}", extractor.path()))?;
    let recent = filter_by_date_range(&records, start, end);

    if let Some(output) = &cli.output {
        let result = if cli.daily {
            write_daily_totals_csv(output, &daily_totals(&recent))
        } else {
            write_records_csv(output, &recent)
        };
        let written = result.with_context(|| format!("Failed to write {:?}", output))?;

        println!("Exported {} rows to {}", written, output.display());
        return Ok(());
    }

    if !cli.json {
        println!("Found {} records in last {} days", recent.len(), days);
    }
    print_sample(&recent, limit, cli.json, |record| {
        format!(
            "[{}] {}: {} {}",
            display_date(record.start_date),
            simplify_record_type(record.record_type.as_deref().unwrap_or("Unknown")),
            record.value.as_deref().unwrap_or(""),
            record.unit.as_deref().unwrap_or("")
        )
    })
}

fn show_workouts(
    extractor: &mut HealthExportExtractor,
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
    days: u32,
    limit: usize,
    json: bool,
) -> Result<()> {
    let workouts = extractor
        .parse_workouts()
        .with_context(|| format!("Failed to read {:?}", extractor.path()))?;
    let recent = filter_by_date_range(&workouts, start, end);

    if !json {
        println!("Found {} workouts in last {} days", recent.len(), days);
    }
    print_sample(&recent, limit, json, |workout| {
        let mut line = format!(
            "[{}] {} - {} {}",
            display_date(workout.start_date),
            simplify_record_type(workout.workout_type.as_deref().unwrap_or("Unknown")),
            workout.duration,
            workout.duration_unit.as_deref().unwrap_or("")
        );
        if let Some(distance) = workout.total_distance {
            line.push_str(&format!(", distance {}", distance));
        }
        if let Some(energy) = workout.total_energy_burned {
            line.push_str(&format!(", energy {}", energy));
        }
        line
    })
}

fn show_summaries(
    extractor: &mut HealthExportExtractor,
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
    days: u32,
    limit: usize,
    json: bool,
) -> Result<()> {
    let all = extractor
        .parse_activity_summaries()
        .with_context(|| format!("Failed to read {:?}", extractor.path()))?;
    let summaries = filter_summaries_by_date_range(&all, start.date_naive(), end.date_naive());

    if !json {
        println!("Found {} activity summaries in last {} days", summaries.len(), days);
    }
    print_sample(&summaries, limit, json, |summary| summary.to_string())
}

fn print_sample<T: Serialize>(
    items: &[T],
    limit: usize,
    json: bool,
    line: impl Fn(&T) -> String,
) -> Result<()> {
    if json {
        for item in items.iter().take(limit) {
            println!("{}", serde_json::to_string(item)?);
        }
        return Ok(());
    }

    if items.is_empty() {
        return Ok(());
    }

    println!("\nShowing first {}:", limit.min(items.len()));
    for item in items.iter().take(limit) {
        println!("  {}", line(item));
    }
    if items.len() > limit {
        println!("  ... and {} more", items.len() - limit);
    }
    Ok(())
}

/// Fully qualified type for `--type`. An empty value means no filter.
fn type_filter(record_type: Option<&str>) -> Option<String> {
    record_type
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(qualify_record_type)
}

fn display_date(date: Option<DateTime<FixedOffset>>) -> String {
    date.map(|d| d.to_string())
        .unwrap_or_else(|| "no date".to_string())
}
