mod commands;
mod logging;
mod progress;
mod report;

use std::process;

use chrono::{DateTime, FixedOffset, NaiveDate};
use clap::{CommandFactory, Parser};
use colored::*;
use commands::{Cli, Commands};
use dashcam_timeline_core::playlist;
use dashcam_timeline_core::{calendar, AppConfig, TimelineEngine, TimelineResult};
use dotenv::dotenv;
use progress::CliReporter;
use report::{format_duration, print_segments, TimelineReport};
use tracing::{error, info};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let _guard = logging::init_logger();

    let mut config = match dashcam_timeline_core::config::load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            process::exit(1);
        }
    };

    let args = Cli::parse();
    if let Some(manifest) = args.manifest {
        config.manifest_path = Some(manifest);
    }

    let outcome = match args.command {
        Some(Commands::Build { json }) => run_build(&config, json),
        Some(Commands::Dates) => run_dates(&config),
        Some(Commands::Day { date }) => run_day(&config, date),
        Some(Commands::Seek { at }) => run_seek(&config, at),
        Some(Commands::Position { offset_ms }) => run_position(&config, offset_ms),
        Some(Commands::Playlist) => run_playlist(&config),
        Some(Commands::PrintConfig) => {
            println!("Configuration: {:?}", config);
            Ok(())
        }
        None => {
            let _ = Cli::command().print_long_help();
            Ok(())
        }
    };

    if let Err(err) = outcome {
        error!("Error: {}", err);
        process::exit(1);
    }

    Ok(())
}

fn load_timeline(config: &AppConfig) -> Result<TimelineResult, Box<dyn std::error::Error>> {
    let engine = TimelineEngine::new(config.clone());
    let source = engine
        .manifest_source()
        .ok_or("No manifest configured; pass --manifest or set manifest_path")?;
    let reporter = CliReporter::new();
    let result = engine.build(&source, &reporter)?;

    info!(
        "Discovery: {}, Build: {}",
        format!("{:.2}s", result.discovery_duration.as_secs_f64()).green(),
        format!("{:.2}s", result.build_duration.as_secs_f64()).green(),
    );
    info!(
        "{} files discovered, {} identified, {} skipped",
        format!("{}", result.files_discovered).cyan(),
        format!("{}", result.files_identified).cyan(),
        format!("{}", result.files_skipped).red(),
    );

    Ok(result)
}

fn run_build(config: &AppConfig, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let result = load_timeline(config)?;
    if json {
        let report = TimelineReport::from(&result.timeline);
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_segments(&result.timeline);
    }
    Ok(())
}

fn run_dates(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let result = load_timeline(config)?;
    let dates = calendar::available_dates(&result.timeline);
    if dates.is_empty() {
        println!("{}", "No recordings found".yellow());
    }
    for date in dates {
        let day = calendar::timeline_for_date(&result.timeline, date);
        println!(
            "{}  {} segments, {}",
            date,
            day.segments().len(),
            format_duration(day.total_duration())
        );
    }
    Ok(())
}

fn run_day(config: &AppConfig, date: NaiveDate) -> Result<(), Box<dyn std::error::Error>> {
    let result = load_timeline(config)?;
    let day = calendar::timeline_for_date(&result.timeline, date);
    print_segments(&day);
    Ok(())
}

fn run_seek(
    config: &AppConfig,
    at: DateTime<FixedOffset>,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = load_timeline(config)?;
    let offset_ms = playlist::time_to_playlist_position(&result.timeline, at);
    println!("{}", offset_ms);
    Ok(())
}

fn run_position(config: &AppConfig, offset_ms: i64) -> Result<(), Box<dyn std::error::Error>> {
    let result = load_timeline(config)?;
    match playlist::playlist_position_to_wall_clock(&result.timeline, offset_ms) {
        Some(time) => println!("{}", time.to_rfc3339()),
        None => println!("{}", "No recordings found".yellow()),
    }
    Ok(())
}

fn run_playlist(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let result = load_timeline(config)?;
    for entry in playlist::playlist_entries(&result.timeline) {
        println!(
            "{:>10}  {:>7}  {}  {}",
            entry.offset_ms,
            entry.duration_ms,
            entry.front.handle,
            entry.inside.map(|v| v.handle.as_str()).unwrap_or("-"),
        );
    }
    Ok(())
}
