use chrono::{DateTime, FixedOffset, NaiveDate};
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "dashcam-timeline")]
#[command(about = "Rebuild a playable timeline from dashcam clips", long_about = None)]
pub struct Cli {
    /// CSV manifest of discovered video files, overrides `manifest_path`
    #[arg(long, global = true)]
    pub manifest: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build the timeline and print a summary
    Build {
        /// Print the full timeline as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the dates that have recordings
    Dates,
    /// Show the segments recorded on one date (YYYY-MM-DD)
    Day { date: NaiveDate },
    /// Convert a wall-clock time (RFC 3339) into a playlist offset
    Seek { at: DateTime<FixedOffset> },
    /// Convert a playlist offset in milliseconds into wall-clock time
    Position {
        #[arg(allow_hyphen_values = true)]
        offset_ms: i64,
    },
    /// Print the playback order with offsets
    Playlist,
    /// Print configuration values
    PrintConfig,
}
