use crate::model::CameraRole;
use chrono::NaiveDateTime;
use thiserror::Error;

const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";
const TIMESTAMP_LEN: usize = 14;

/// What a dashcam filename says about the clip inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedName {
    pub timestamp: NaiveDateTime,
    pub role: CameraRole,
}

/// Why a filename does not follow `<YYYYMMDDHHMMSS>_<reserved>_<role>.<ext>`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    #[error("expected 3 '_'-separated parts, found {0}")]
    PartCount(usize),

    #[error("'{0}' is not a valid YYYYMMDDHHMMSS timestamp")]
    InvalidTimestamp(String),

    #[error("unknown camera role marker {0:?}")]
    UnknownRole(Option<char>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    Parsed(ParsedName),
    Rejected(RejectReason),
}

impl ParseOutcome {
    pub fn parsed(self) -> Option<ParsedName> {
        match self {
            ParseOutcome::Parsed(name) => Some(name),
            ParseOutcome::Rejected(_) => None,
        }
    }
}

/// Parse a dashcam filename into its local timestamp and camera role.
///
/// The reserved middle part is not interpreted. Only the first character of
/// the last part matters, the rest of it carries device flags.
pub fn parse_file_name(file_name: &str) -> ParseOutcome {
    let stem = strip_extension(file_name);

    let parts: Vec<&str> = stem.split('_').collect();
    if parts.len() != 3 {
        return ParseOutcome::Rejected(RejectReason::PartCount(parts.len()));
    }

    let timestamp = match parse_timestamp(parts[0]) {
        Some(timestamp) => timestamp,
        None => {
            return ParseOutcome::Rejected(RejectReason::InvalidTimestamp(parts[0].to_string()))
        }
    };

    let role = match parts[2].chars().next() {
        Some('F') => CameraRole::Front,
        Some('I') => CameraRole::Inside,
        other => return ParseOutcome::Rejected(RejectReason::UnknownRole(other)),
    };

    ParseOutcome::Parsed(ParsedName { timestamp, role })
}

fn strip_extension(file_name: &str) -> &str {
    match file_name.rsplit_once('.') {
        Some((stem, _ext)) if !stem.is_empty() => stem,
        _ => file_name,
    }
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    // chrono accepts signs and wider years for %Y, so pin the exact shape first.
    if raw.len() != TIMESTAMP_LEN || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT).ok()
}
