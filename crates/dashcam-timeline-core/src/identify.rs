use crate::model::VideoFile;
use crate::parser::{parse_file_name, ParseOutcome, RejectReason};
use crate::source::DiscoveredFile;
use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, TimeDelta, TimeZone};
use rayon::prelude::*;
use std::fmt;
use tracing::{trace, warn};

const VIDEO_EXTENSION: &str = ".mp4";

// Probed durations past this are treated as garbage metadata. Keeps clip ends
// well inside chrono's representable range.
const MAX_PROBED_DURATION_MS: u64 = 24 * 60 * 60 * 1000;

/// The zone filename timestamps were recorded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Local,
    Fixed(FixedOffset),
}

impl Zone {
    /// Anchor a naive timestamp. Local times that do not exist or occur twice yield `None`.
    pub fn resolve(&self, naive: NaiveDateTime) -> Option<DateTime<FixedOffset>> {
        match self {
            Zone::Local => resolve_in(&Local, naive),
            Zone::Fixed(offset) => resolve_in(offset, naive),
        }
    }
}

/// Anchor `naive` in `tz`, keeping only unambiguous results. Times skipped by a
/// forward clock change and times repeated by a backward one both give `None`.
pub fn resolve_in<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> Option<DateTime<FixedOffset>> {
    tz.from_local_datetime(&naive)
        .single()
        .map(|dt| dt.fixed_offset())
}

/// Why a discovered file did not make it into the identified set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NotVideo,
    Rejected(RejectReason),
    UnresolvableLocalTime(NaiveDateTime),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotVideo => write!(f, "not an {} file", VIDEO_EXTENSION),
            SkipReason::Rejected(reason) => write!(f, "{}", reason),
            SkipReason::UnresolvableLocalTime(naive) => {
                write!(f, "local time {} is ambiguous or does not exist", naive)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identified {
    /// Identified files, in the order they were discovered.
    pub files: Vec<VideoFile>,
    pub skipped: usize,
}

/// Turn discovered records into video files, skipping anything that does not
/// look like a dashcam clip. Skips are logged and counted, never returned as errors.
pub fn identify_files(records: &[DiscoveredFile], zone: Zone) -> Identified {
    let outcomes: Vec<Result<VideoFile, SkipReason>> = records
        .par_iter()
        .map(|record| identify_file(record, zone))
        .collect();

    let mut files = Vec::with_capacity(outcomes.len());
    let mut skipped = 0;
    for (record, outcome) in records.iter().zip(outcomes) {
        match outcome {
            Ok(file) => files.push(file),
            Err(SkipReason::NotVideo) => {
                trace!("Ignoring non-video file {}", record.name);
                skipped += 1;
            }
            Err(reason) => {
                warn!("Could not parse file name {}: {}", record.name, reason);
                skipped += 1;
            }
        }
    }

    Identified { files, skipped }
}

pub fn identify_file(record: &DiscoveredFile, zone: Zone) -> Result<VideoFile, SkipReason> {
    identify_with(record, |naive| zone.resolve(naive))
}

fn identify_with<F>(record: &DiscoveredFile, resolve: F) -> Result<VideoFile, SkipReason>
where
    F: Fn(NaiveDateTime) -> Option<DateTime<FixedOffset>>,
{
    if !is_video_name(&record.name) {
        return Err(SkipReason::NotVideo);
    }

    let parsed = match parse_file_name(&record.name) {
        ParseOutcome::Parsed(parsed) => parsed,
        ParseOutcome::Rejected(reason) => return Err(SkipReason::Rejected(reason)),
    };

    let timestamp =
        resolve(parsed.timestamp).ok_or(SkipReason::UnresolvableLocalTime(parsed.timestamp))?;

    Ok(VideoFile {
        handle: record.handle.clone(),
        name: record.name.clone(),
        timestamp,
        role: parsed.role,
        is_event: record.is_event,
        duration: probed_duration(record),
    })
}

fn is_video_name(name: &str) -> bool {
    name.len() > VIDEO_EXTENSION.len()
        && name
            .get(name.len() - VIDEO_EXTENSION.len()..)
            .is_some_and(|ext| ext.eq_ignore_ascii_case(VIDEO_EXTENSION))
}

fn probed_duration(record: &DiscoveredFile) -> TimeDelta {
    if record.probed_duration_ms > MAX_PROBED_DURATION_MS {
        warn!(
            "Ignoring implausible duration {}ms for {}",
            record.probed_duration_ms, record.name
        );
        return TimeDelta::zero();
    }
    // Bounded above, so the cast cannot wrap.
    TimeDelta::milliseconds(record.probed_duration_ms as i64)
}
