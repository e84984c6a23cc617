use crate::error::Error;
use crate::identify::Zone;
use chrono::{FixedOffset, Offset, TimeDelta, Utc};
use config::{Config, ConfigError, Environment, File as ConfigFile};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub manifest_path: Option<String>,
    pub utc_offset: Option<String>,
    pub event_markers: Vec<String>,
    pub normal_markers: Vec<String>,
    pub timeline: TimelineConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            manifest_path: None,
            utc_offset: None,
            event_markers: vec!["Event".to_string()],
            normal_markers: vec!["Normal".to_string()],
            timeline: TimelineConfig::default(),
        }
    }
}

impl AppConfig {
    /// Zone used to anchor the zone-naive filename timestamps.
    /// No configured offset means the system local zone.
    pub fn zone(&self) -> Result<Zone, Error> {
        match self.utc_offset.as_deref() {
            None => Ok(Zone::Local),
            Some(raw) => parse_utc_offset(raw).map(Zone::Fixed),
        }
    }
}

/// Thresholds for the timeline builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Largest |gap| between two clips that still joins them into one segment.
    pub gap_tolerance_ms: i64,
    /// Largest start-to-start distance accepted as an inferred clip duration.
    pub max_inferred_duration_ms: i64,
    /// Duration assigned when neither the probe nor the next clip tells us anything.
    pub default_clip_duration_ms: i64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            gap_tolerance_ms: 1_000,
            max_inferred_duration_ms: 65_000,
            default_clip_duration_ms: 60_000,
        }
    }
}

impl TimelineConfig {
    pub fn gap_tolerance(&self) -> TimeDelta {
        TimeDelta::milliseconds(self.gap_tolerance_ms)
    }

    pub fn max_inferred_duration(&self) -> TimeDelta {
        TimeDelta::milliseconds(self.max_inferred_duration_ms)
    }

    pub fn default_clip_duration(&self) -> TimeDelta {
        TimeDelta::milliseconds(self.default_clip_duration_ms)
    }

    /// Refined clip durations must stay strictly positive, and no threshold may be negative.
    pub fn validate(&self) -> Result<(), Error> {
        if self.default_clip_duration_ms <= 0 {
            return Err(Error::InvalidTimeline(format!(
                "default_clip_duration_ms must be positive, got {}",
                self.default_clip_duration_ms
            )));
        }
        if self.gap_tolerance_ms < 0 {
            return Err(Error::InvalidTimeline(format!(
                "gap_tolerance_ms must not be negative, got {}",
                self.gap_tolerance_ms
            )));
        }
        if self.max_inferred_duration_ms < 0 {
            return Err(Error::InvalidTimeline(format!(
                "max_inferred_duration_ms must not be negative, got {}",
                self.max_inferred_duration_ms
            )));
        }
        Ok(())
    }
}

pub fn load_configuration() -> Result<AppConfig, ConfigError> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name("Config").required(false))
        .add_source(
            Environment::with_prefix("DASHCAM")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("event_markers")
                .with_list_parse_key("normal_markers"),
        )
        .build()?;
    builder.try_deserialize::<AppConfig>()
}

fn parse_utc_offset(raw: &str) -> Result<FixedOffset, Error> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("z") || trimmed.eq_ignore_ascii_case("utc") {
        return Ok(Utc.fix());
    }
    trimmed
        .parse::<FixedOffset>()
        .map_err(|_| Error::InvalidOffset(raw.to_string()))
}
