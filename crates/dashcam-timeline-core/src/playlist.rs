use crate::model::{Timeline, VideoFile};
use chrono::{DateTime, FixedOffset, TimeDelta};

/// One clip's place in the concatenated playback of a timeline.
///
/// Front and inside playlists share offsets; a missing inside file leaves a
/// hole of `duration_ms` in the inside playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistEntry<'a> {
    pub front: &'a VideoFile,
    pub inside: Option<&'a VideoFile>,
    pub start_time: DateTime<FixedOffset>,
    pub offset_ms: i64,
    pub duration_ms: i64,
}

/// Clips in playback order with their playlist offsets. Gaps take no room.
pub fn playlist_entries(timeline: &Timeline) -> Vec<PlaylistEntry<'_>> {
    let mut offset_ms = 0;
    timeline
        .clips()
        .map(|clip| {
            let entry = PlaylistEntry {
                front: clip.front(),
                inside: clip.inside(),
                start_time: clip.start_time(),
                offset_ms,
                duration_ms: clip.duration().num_milliseconds(),
            };
            offset_ms += entry.duration_ms;
            entry
        })
        .collect()
}

/// Length of the concatenated playback, in milliseconds.
pub fn playlist_duration_ms(timeline: &Timeline) -> i64 {
    timeline
        .clips()
        .map(|clip| clip.duration().num_milliseconds())
        .sum()
}

/// Map a wall-clock time to an offset into the playlist.
///
/// Times before the first clip map to 0, times after the last clip to the
/// playlist length, and times inside a gap to the start of the clip after it.
pub fn time_to_playlist_position(timeline: &Timeline, at: DateTime<FixedOffset>) -> i64 {
    let mut offset_ms = 0;
    for clip in timeline.clips() {
        if at < clip.start_time() {
            return offset_ms;
        }
        if at < clip.end_time() {
            return offset_ms + (at - clip.start_time()).num_milliseconds();
        }
        offset_ms += clip.duration().num_milliseconds();
    }
    offset_ms
}

/// Map a playlist offset back to wall-clock time. `None` only for an empty timeline.
///
/// Negative offsets clamp to the earliest recording, offsets past the end to the latest.
pub fn playlist_position_to_wall_clock(
    timeline: &Timeline,
    offset_ms: i64,
) -> Option<DateTime<FixedOffset>> {
    if offset_ms <= 0 {
        return timeline.earliest();
    }

    let mut consumed_ms = 0;
    for clip in timeline.clips() {
        let duration_ms = clip.duration().num_milliseconds();
        if offset_ms < consumed_ms + duration_ms {
            return Some(clip.start_time() + TimeDelta::milliseconds(offset_ms - consumed_ms));
        }
        consumed_ms += duration_ms;
    }
    timeline.latest()
}
