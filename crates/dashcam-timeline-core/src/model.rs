use chrono::{DateTime, FixedOffset, TimeDelta};
use std::fmt;

/// Which camera recorded a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraRole {
    Front,
    Inside,
}

impl fmt::Display for CameraRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraRole::Front => write!(f, "front"),
            CameraRole::Inside => write!(f, "inside"),
        }
    }
}

/// One physical clip file, identified from its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFile {
    /// Opaque reference the host uses to open the file.
    pub handle: String,
    pub name: String,
    pub timestamp: DateTime<FixedOffset>,
    pub role: CameraRole,
    pub is_event: bool,
    /// Probed duration, zero when unknown.
    pub duration: TimeDelta,
}

/// A single recorded moment: the front file plus the inside file sharing its timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoClip {
    front: VideoFile,
    inside: Option<VideoFile>,
    start_time: DateTime<FixedOffset>,
    duration: TimeDelta,
}

impl VideoClip {
    pub(crate) fn new(front: VideoFile, inside: Option<VideoFile>, duration: TimeDelta) -> Self {
        let start_time = front.timestamp;
        Self {
            front,
            inside,
            start_time,
            duration,
        }
    }

    pub fn front(&self) -> &VideoFile {
        &self.front
    }

    pub fn inside(&self) -> Option<&VideoFile> {
        self.inside.as_ref()
    }

    pub fn start_time(&self) -> DateTime<FixedOffset> {
        self.start_time
    }

    pub fn duration(&self) -> TimeDelta {
        self.duration
    }

    pub fn end_time(&self) -> DateTime<FixedOffset> {
        self.start_time + self.duration
    }

    /// True when either camera file came from an event recording.
    pub fn is_event(&self) -> bool {
        self.front.is_event || self.inside.as_ref().is_some_and(|v| v.is_event)
    }
}

/// A maximal run of clips with no significant gap between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingSegment {
    clips: Vec<VideoClip>,
    start_time: DateTime<FixedOffset>,
    end_time: DateTime<FixedOffset>,
    duration: TimeDelta,
}

impl RecordingSegment {
    /// Finalize a chronologically ordered run of clips. Returns `None` for an empty run.
    pub fn from_clips(clips: Vec<VideoClip>) -> Option<Self> {
        let start_time = clips.first()?.start_time();
        let end_time = clips.last()?.end_time();
        Some(Self {
            clips,
            start_time,
            end_time,
            duration: end_time - start_time,
        })
    }

    pub fn clips(&self) -> &[VideoClip] {
        &self.clips
    }

    pub fn start_time(&self) -> DateTime<FixedOffset> {
        self.start_time
    }

    pub fn end_time(&self) -> DateTime<FixedOffset> {
        self.end_time
    }

    pub fn duration(&self) -> TimeDelta {
        self.duration
    }

    pub fn has_event(&self) -> bool {
        self.clips.iter().any(VideoClip::is_event)
    }
}

/// Every recording segment of a volume, in chronological order.
///
/// `total_duration` is the sum of the segment durations, so gaps between
/// segments are never counted. An empty timeline means nothing was recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline {
    segments: Vec<RecordingSegment>,
    earliest: Option<DateTime<FixedOffset>>,
    latest: Option<DateTime<FixedOffset>>,
    total_duration: TimeDelta,
}

impl Timeline {
    pub fn empty() -> Self {
        Self::from_segments(Vec::new())
    }

    /// Finalize an ordered list of segments.
    pub fn from_segments(segments: Vec<RecordingSegment>) -> Self {
        let earliest = segments.first().map(RecordingSegment::start_time);
        let latest = segments.last().map(RecordingSegment::end_time);
        let total_duration = segments
            .iter()
            .fold(TimeDelta::zero(), |acc, segment| acc + segment.duration());

        Self {
            segments,
            earliest,
            latest,
            total_duration,
        }
    }

    pub fn segments(&self) -> &[RecordingSegment] {
        &self.segments
    }

    pub fn earliest(&self) -> Option<DateTime<FixedOffset>> {
        self.earliest
    }

    pub fn latest(&self) -> Option<DateTime<FixedOffset>> {
        self.latest
    }

    pub fn total_duration(&self) -> TimeDelta {
        self.total_duration
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// All clips across all segments, in playback order.
    pub fn clips(&self) -> impl Iterator<Item = &VideoClip> {
        self.segments.iter().flat_map(|segment| segment.clips().iter())
    }

    pub fn clip_count(&self) -> usize {
        self.segments.iter().map(|segment| segment.clips().len()).sum()
    }

    /// Wall-clock distance from the first recording to the end of the last, gaps included.
    pub fn span(&self) -> Option<TimeDelta> {
        Some(self.latest? - self.earliest?)
    }

    /// Time from the end of segment `index` to the start of the next one.
    /// `None` for the last segment or an out-of-range index.
    pub fn gap_after(&self, index: usize) -> Option<TimeDelta> {
        let current = self.segments.get(index)?;
        let next = self.segments.get(index + 1)?;
        Some(next.start_time() - current.end_time())
    }

    /// Every gap between consecutive segments; one fewer than there are segments.
    pub fn gaps(&self) -> Vec<TimeDelta> {
        self.segments
            .windows(2)
            .map(|pair| pair[1].start_time() - pair[0].end_time())
            .collect()
    }
}
