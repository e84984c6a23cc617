use chrono::{DateTime, FixedOffset, TimeDelta, TimeZone};
use dashcam_timeline_core::builder::build_timeline;
use dashcam_timeline_core::model::{CameraRole, Timeline, VideoFile};
use dashcam_timeline_core::playlist::{
    playlist_duration_ms, playlist_entries, playlist_position_to_wall_clock,
    time_to_playlist_position,
};

fn base_time() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(2 * 3600)
        .unwrap()
        .with_ymd_and_hms(2024, 3, 2, 17, 0, 0)
        .unwrap()
}

fn at(offset_secs: i64) -> DateTime<FixedOffset> {
    base_time() + TimeDelta::seconds(offset_secs)
}

fn make_video(offset_secs: i64, role: CameraRole, duration_ms: i64) -> VideoFile {
    let timestamp = at(offset_secs);
    VideoFile {
        handle: format!("{}-{:?}", offset_secs, role),
        name: format!("{}_0_{:?}.mp4", timestamp.format("%Y%m%d%H%M%S"), role),
        timestamp,
        role,
        is_event: false,
        duration: TimeDelta::milliseconds(duration_ms),
    }
}

/// Two segments: [0s, 180s) from three clips and [600s, 690s) from a 90s clip.
fn two_segment_timeline() -> Timeline {
    build_timeline(&[
        make_video(0, CameraRole::Front, 60_000),
        make_video(0, CameraRole::Inside, 60_000),
        make_video(60, CameraRole::Front, 60_000),
        make_video(120, CameraRole::Front, 60_000),
        make_video(120, CameraRole::Inside, 60_000),
        make_video(600, CameraRole::Front, 90_000),
    ])
}

#[test]
fn test_playlist_entries_accumulate_offsets() {
    let timeline = two_segment_timeline();
    let entries = playlist_entries(&timeline);

    let offsets: Vec<i64> = entries.iter().map(|e| e.offset_ms).collect();
    assert_eq!(offsets, vec![0, 60_000, 120_000, 180_000]);
    assert_eq!(entries[3].duration_ms, 90_000);
    assert!(entries[0].inside.is_some());
    assert!(entries[1].inside.is_none());
    assert_eq!(entries[3].start_time, at(600));
    assert_eq!(playlist_duration_ms(&timeline), 270_000);
}

#[test]
fn test_time_to_position_inside_clips() {
    let timeline = two_segment_timeline();
    assert_eq!(time_to_playlist_position(&timeline, at(0)), 0);
    assert_eq!(time_to_playlist_position(&timeline, at(75)), 75_000);
    assert_eq!(time_to_playlist_position(&timeline, at(610)), 190_000);
}

#[test]
fn test_time_to_position_outside_recordings() {
    let timeline = two_segment_timeline();
    assert_eq!(time_to_playlist_position(&timeline, at(-3_600)), 0);
    // A gap maps to the start of the next clip.
    assert_eq!(time_to_playlist_position(&timeline, at(300)), 180_000);
    assert_eq!(time_to_playlist_position(&timeline, at(690)), 270_000);
    assert_eq!(time_to_playlist_position(&timeline, at(86_400)), 270_000);
}

#[test]
fn test_position_to_wall_clock() {
    let timeline = two_segment_timeline();
    assert_eq!(playlist_position_to_wall_clock(&timeline, 0), Some(at(0)));
    assert_eq!(
        playlist_position_to_wall_clock(&timeline, 179_999),
        Some(at(180) - TimeDelta::milliseconds(1))
    );
    // The first millisecond of the second segment.
    assert_eq!(playlist_position_to_wall_clock(&timeline, 180_000), Some(at(600)));
    assert_eq!(playlist_position_to_wall_clock(&timeline, -500), Some(at(0)));
    assert_eq!(playlist_position_to_wall_clock(&timeline, 999_999), Some(at(690)));
}

#[test]
fn test_conversions_round_trip_within_clips() {
    let timeline = two_segment_timeline();
    for secs in [0, 1, 59, 60, 61, 119, 179, 600, 645, 689] {
        let time = at(secs) + TimeDelta::milliseconds(250);
        let offset = time_to_playlist_position(&timeline, time);
        assert_eq!(
            playlist_position_to_wall_clock(&timeline, offset),
            Some(time),
            "round trip failed at {}s",
            secs
        );
    }

    for offset in [0, 1, 59_999, 60_000, 180_000, 269_999] {
        let time = playlist_position_to_wall_clock(&timeline, offset).unwrap();
        assert_eq!(time_to_playlist_position(&timeline, time), offset);
    }
}

#[test]
fn test_conversions_on_empty_timeline() {
    let timeline = Timeline::empty();
    assert!(playlist_entries(&timeline).is_empty());
    assert_eq!(time_to_playlist_position(&timeline, base_time()), 0);
    assert_eq!(playlist_position_to_wall_clock(&timeline, 0), None);
    assert_eq!(playlist_position_to_wall_clock(&timeline, 5_000), None);
}
