use crate::config::TimelineConfig;
use crate::error::Error;
use crate::model::{CameraRole, RecordingSegment, Timeline, VideoClip, VideoFile};
use chrono::{DateTime, FixedOffset, TimeDelta};
use std::collections::BTreeMap;
use tracing::{debug, trace, warn};

/// Builds a [`Timeline`] from identified video files.
///
/// The build is a pure function of its input: no I/O, no shared state, so one
/// builder can serve any number of threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimelineBuilder {
    config: TimelineConfig,
}

/// Front file plus optional inside file, before the duration is settled.
struct PairedFiles<'a> {
    front: &'a VideoFile,
    inside: Option<&'a VideoFile>,
}

#[derive(Default)]
struct TimestampSlot<'a> {
    front: Option<&'a VideoFile>,
    inside: Option<&'a VideoFile>,
}

impl TimelineBuilder {
    /// Fails with [`Error::InvalidTimeline`] when the thresholds could yield a
    /// non-positive clip duration.
    pub fn new(config: TimelineConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    /// Run the full pipeline:
    /// 1. Pair front/inside files sharing a timestamp (front is mandatory)
    /// 2. Settle every clip's duration
    /// 3. Split the clip sequence into segments wherever the gap exceeds the tolerance
    pub fn build(&self, files: &[VideoFile]) -> Timeline {
        let paired = pair_by_timestamp(files);
        debug!("Paired {} clips from {} files", paired.len(), files.len());

        let clips = self.refine_durations(paired);
        let timeline = self.assemble_segments(clips);
        debug!(
            "Timeline has {} segments, {}s recorded",
            timeline.segments().len(),
            timeline.total_duration().num_seconds()
        );
        timeline
    }

    /// Settle a clip's duration.
    ///
    /// A positive probed duration wins. Otherwise the distance to the next
    /// clip's start is used when it looks like one recording interval, and the
    /// default duration covers everything else.
    pub fn refine_duration(
        &self,
        reported: TimeDelta,
        start: DateTime<FixedOffset>,
        next_start: Option<DateTime<FixedOffset>>,
    ) -> TimeDelta {
        if reported > TimeDelta::zero() {
            return reported;
        }

        if let Some(next_start) = next_start {
            let gap = next_start - start;
            if gap > TimeDelta::zero() && gap <= self.config.max_inferred_duration() {
                trace!(
                    "Inferred {}ms for clip at {} from next clip",
                    gap.num_milliseconds(),
                    start
                );
                return gap;
            }
        }

        trace!("Using default duration for clip at {}", start);
        self.config.default_clip_duration()
    }

    fn refine_durations(&self, paired: Vec<PairedFiles<'_>>) -> Vec<VideoClip> {
        let starts: Vec<DateTime<FixedOffset>> = paired.iter().map(|p| p.front.timestamp).collect();

        paired
            .into_iter()
            .enumerate()
            .map(|(i, p)| {
                let next_start = starts.get(i + 1).copied();
                let duration =
                    self.refine_duration(p.front.duration, p.front.timestamp, next_start);
                VideoClip::new(p.front.clone(), p.inside.cloned(), duration)
            })
            .collect()
    }

    fn assemble_segments(&self, clips: Vec<VideoClip>) -> Timeline {
        let tolerance = self.config.gap_tolerance();
        let mut segments: Vec<RecordingSegment> = Vec::new();
        let mut current: Vec<VideoClip> = Vec::new();

        for clip in clips {
            if let Some(previous) = current.last() {
                // Tiny overlaps from rounding count the same as tiny gaps.
                let gap = clip.start_time() - previous.end_time();
                if gap.abs() > tolerance {
                    trace!("{}ms gap before clip at {}", gap.num_milliseconds(), clip.start_time());
                    segments.extend(RecordingSegment::from_clips(std::mem::take(&mut current)));
                }
            }
            current.push(clip);
        }
        segments.extend(RecordingSegment::from_clips(current));

        Timeline::from_segments(segments)
    }
}

/// Build a timeline with the default thresholds.
pub fn build_timeline(files: &[VideoFile]) -> Timeline {
    TimelineBuilder::default().build(files)
}

/// Group files by exact timestamp. Groups without a front file produce nothing.
/// When a role appears twice at one timestamp the first file seen is kept.
fn pair_by_timestamp(files: &[VideoFile]) -> Vec<PairedFiles<'_>> {
    let mut slots: BTreeMap<DateTime<FixedOffset>, TimestampSlot<'_>> = BTreeMap::new();

    for file in files {
        let slot = slots.entry(file.timestamp).or_default();
        let role_slot = match file.role {
            CameraRole::Front => &mut slot.front,
            CameraRole::Inside => &mut slot.inside,
        };
        if let Some(kept) = *role_slot {
            warn!(
                "Duplicate {} file at {}: keeping {}, ignoring {}",
                file.role, file.timestamp, kept.name, file.name
            );
        } else {
            *role_slot = Some(file);
        }
    }

    slots
        .into_iter()
        .filter_map(|(timestamp, slot)| match slot.front {
            Some(front) => Some(PairedFiles {
                front,
                inside: slot.inside,
            }),
            None => {
                trace!("No front file at {}, dropping", timestamp);
                None
            }
        })
        .collect()
}
