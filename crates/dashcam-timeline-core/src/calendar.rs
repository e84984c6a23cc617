use crate::model::{RecordingSegment, Timeline};
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Dates on which at least one segment starts, in each segment's own offset.
pub fn available_dates(timeline: &Timeline) -> BTreeSet<NaiveDate> {
    timeline
        .segments()
        .iter()
        .map(segment_date)
        .collect()
}

pub fn latest_date(timeline: &Timeline) -> Option<NaiveDate> {
    available_dates(timeline).last().copied()
}

/// The part of a timeline whose segments start on `date`, finalized on its own.
pub fn timeline_for_date(timeline: &Timeline, date: NaiveDate) -> Timeline {
    let segments: Vec<RecordingSegment> = timeline
        .segments()
        .iter()
        .filter(|segment| segment_date(segment) == date)
        .cloned()
        .collect();
    Timeline::from_segments(segments)
}

fn segment_date(segment: &RecordingSegment) -> NaiveDate {
    segment.start_time().date_naive()
}
