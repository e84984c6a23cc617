use chrono::{DateTime, FixedOffset, TimeDelta};
use colored::*;
use dashcam_timeline_core::model::{RecordingSegment, Timeline, VideoClip};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct TimelineReport {
    pub earliest: Option<DateTime<FixedOffset>>,
    pub latest: Option<DateTime<FixedOffset>>,
    pub total_duration_ms: i64,
    pub segments: Vec<SegmentReport>,
}

#[derive(Debug, Serialize)]
pub struct SegmentReport {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    pub duration_ms: i64,
    pub has_event: bool,
    /// Idle time before the next segment; absent on the last one.
    pub gap_to_next_ms: Option<i64>,
    pub clips: Vec<ClipReport>,
}

#[derive(Debug, Serialize)]
pub struct ClipReport {
    pub start: DateTime<FixedOffset>,
    pub duration_ms: i64,
    pub front: String,
    pub inside: Option<String>,
    pub is_event: bool,
}

impl From<&Timeline> for TimelineReport {
    fn from(timeline: &Timeline) -> Self {
        Self {
            earliest: timeline.earliest(),
            latest: timeline.latest(),
            total_duration_ms: timeline.total_duration().num_milliseconds(),
            segments: timeline
                .segments()
                .iter()
                .enumerate()
                .map(|(i, segment)| SegmentReport::new(segment, timeline.gap_after(i)))
                .collect(),
        }
    }
}

impl SegmentReport {
    fn new(segment: &RecordingSegment, gap_to_next: Option<TimeDelta>) -> Self {
        Self {
            start: segment.start_time(),
            end: segment.end_time(),
            duration_ms: segment.duration().num_milliseconds(),
            has_event: segment.has_event(),
            gap_to_next_ms: gap_to_next.map(|gap| gap.num_milliseconds()),
            clips: segment.clips().iter().map(ClipReport::from).collect(),
        }
    }
}

impl From<&VideoClip> for ClipReport {
    fn from(clip: &VideoClip) -> Self {
        Self {
            start: clip.start_time(),
            duration_ms: clip.duration().num_milliseconds(),
            front: clip.front().handle.clone(),
            inside: clip.inside().map(|v| v.handle.clone()),
            is_event: clip.is_event(),
        }
    }
}

/// `1h 02m 03s` style rendering; sub-second remainders are dropped.
pub fn format_duration(duration: TimeDelta) -> String {
    let total = duration.num_seconds().max(0);
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);
    if hours > 0 {
        format!("{}h {:02}m {:02}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {:02}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

pub fn print_segments(timeline: &Timeline) {
    if timeline.is_empty() {
        println!("{}", "No recordings found".yellow());
        return;
    }

    for (i, segment) in timeline.segments().iter().enumerate() {
        let line = format!(
            "#{:<3} {} → {}  {:>12}  {} clips",
            i + 1,
            segment.start_time().format("%Y-%m-%d %H:%M:%S"),
            segment.end_time().format("%H:%M:%S"),
            format_duration(segment.duration()),
            segment.clips().len(),
        );
        if segment.has_event() {
            println!("{} {}", line.yellow(), "event".red());
        } else {
            println!("{}", line);
        }
        if let Some(gap) = timeline.gap_after(i) {
            println!("     {}", format!("... {} idle", format_duration(gap)).dimmed());
        }
    }

    println!(
        "{} segments, {} recorded",
        format!("{}", timeline.segments().len()).cyan(),
        format_duration(timeline.total_duration()).green(),
    );
}
