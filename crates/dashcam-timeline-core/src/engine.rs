use crate::builder::TimelineBuilder;
use crate::config::AppConfig;
use crate::error::Error;
use crate::identify::identify_files;
use crate::model::Timeline;
use crate::progress::ProgressReporter;
use crate::source::{ManifestSource, RecordingMarkers, VideoSource};
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub struct TimelineEngine {
    config: AppConfig,
}

#[derive(Debug)]
pub struct TimelineResult {
    pub timeline: Timeline,
    pub files_discovered: usize,
    pub files_identified: usize,
    pub files_skipped: usize,
    pub discovery_duration: Duration,
    pub build_duration: Duration,
}

impl TimelineEngine {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn markers(&self) -> RecordingMarkers {
        RecordingMarkers::new(
            self.config.event_markers.clone(),
            self.config.normal_markers.clone(),
        )
    }

    /// Source for the configured manifest, or `None` when no manifest is set.
    pub fn manifest_source(&self) -> Option<ManifestSource> {
        self.config
            .manifest_path
            .as_ref()
            .map(|path| ManifestSource::new(path, self.markers()))
    }

    /// Run the full timeline pipeline:
    /// 1. Ask the source for the discovered files (the only step that can fail)
    /// 2. Identify dashcam clips from their names, skipping the rest
    /// 3. Pair, settle durations and segment into a timeline
    pub fn build(
        &self,
        source: &dyn VideoSource,
        reporter: &dyn ProgressReporter,
    ) -> Result<TimelineResult, Error> {
        let builder = TimelineBuilder::new(self.config.timeline)?;
        let zone = self.config.zone()?;

        // Phase 1: Discover
        info!("Discovering video files...");
        reporter.on_discovery_start();
        let discovery_start = Instant::now();
        let records = source.discover()?;
        let discovery_duration = discovery_start.elapsed();
        reporter.on_discovery_complete(records.len(), discovery_duration.as_secs_f64());

        // Phase 2: Identify
        let identified = identify_files(&records, zone);
        debug!(
            "Identified {} of {} files ({} skipped)",
            identified.files.len(),
            records.len(),
            identified.skipped,
        );
        reporter.on_identify_complete(identified.files.len(), identified.skipped);

        // Phase 3: Build
        info!("Building timeline...");
        reporter.on_build_start();
        let build_start = Instant::now();
        let timeline = builder.build(&identified.files);
        let build_duration = build_start.elapsed();
        reporter.on_build_complete(
            timeline.segments().len(),
            timeline.clip_count(),
            build_duration.as_secs_f64(),
        );

        Ok(TimelineResult {
            timeline,
            files_discovered: records.len(),
            files_identified: identified.files.len(),
            files_skipped: identified.skipped,
            discovery_duration,
            build_duration,
        })
    }
}
