use crate::error::Error;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A video file as reported by whatever enumerated the storage volume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    pub handle: String,
    pub name: String,
    pub is_event: bool,
    /// Zero when the host could not probe the file.
    pub probed_duration_ms: u64,
}

impl DiscoveredFile {
    pub fn new(handle: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
            name: name.into(),
            is_event: false,
            probed_duration_ms: 0,
        }
    }

    pub fn with_event(mut self, is_event: bool) -> Self {
        self.is_event = is_event;
        self
    }

    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.probed_duration_ms = duration_ms;
        self
    }
}

/// Supplies the flat list of video files a timeline is built from.
///
/// Implementations own all I/O; failures surface here, before any timeline work starts.
pub trait VideoSource: Send + Sync {
    fn discover(&self) -> Result<Vec<DiscoveredFile>, Error>;
}

/// A source over an already materialized list.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    files: Vec<DiscoveredFile>,
}

impl InMemorySource {
    pub fn new(files: Vec<DiscoveredFile>) -> Self {
        Self { files }
    }
}

impl VideoSource for InMemorySource {
    fn discover(&self) -> Result<Vec<DiscoveredFile>, Error> {
        Ok(self.files.clone())
    }
}

/// Reads a CSV manifest written by a host-side scanner.
///
/// Columns: `path`, `duration_ms` (may be empty) and an optional `is_event`.
/// Rows without `is_event` are classified from their path.
#[derive(Debug, Clone)]
pub struct ManifestSource {
    path: PathBuf,
    markers: RecordingMarkers,
}

impl ManifestSource {
    pub fn new(path: impl AsRef<Path>, markers: RecordingMarkers) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            markers,
        }
    }
}

impl VideoSource for ManifestSource {
    fn discover(&self) -> Result<Vec<DiscoveredFile>, Error> {
        info!("Reading manifest {}", self.path.display());
        let file = File::open(&self.path).map_err(|err| {
            std::io::Error::new(
                err.kind(),
                format!("Error opening manifest {}: {}", self.path.display(), err),
            )
        })?;
        read_manifest(file, &self.markers)
    }
}

#[derive(Debug, Deserialize)]
struct ManifestRow {
    path: String,
    #[serde(default)]
    duration_ms: Option<u64>,
    #[serde(default)]
    is_event: Option<bool>,
}

pub fn read_manifest<R: Read>(
    reader: R,
    markers: &RecordingMarkers,
) -> Result<Vec<DiscoveredFile>, Error> {
    let (files, unmarked) = read_manifest_rows(reader, markers)?;
    if unmarked > 0 {
        warn!(
            "{} of {} manifest rows have no event or normal directory, treated as normal",
            unmarked,
            files.len()
        );
    }
    debug!("Manifest listed {} files", files.len());
    Ok(files)
}

/// Parsed rows plus the number of rows whose event flag had to be guessed,
/// i.e. rows with no `is_event` value and no recording marker in their path.
fn read_manifest_rows<R: Read>(
    reader: R,
    markers: &RecordingMarkers,
) -> Result<(Vec<DiscoveredFile>, usize), Error> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut files = Vec::new();
    let mut unmarked = 0;
    for row in csv_reader.deserialize() {
        let row: ManifestRow = row?;
        let name = file_name_of(&row.path).to_string();
        let is_event = match row.is_event {
            Some(flag) => flag,
            None => match markers.classify(&row.path) {
                RecordingKind::Event => true,
                RecordingKind::Normal => false,
                RecordingKind::Unknown => {
                    unmarked += 1;
                    false
                }
            },
        };
        files.push(DiscoveredFile {
            handle: row.path,
            name,
            is_event,
            probed_duration_ms: row.duration_ms.unwrap_or(0),
        });
    }

    Ok((files, unmarked))
}

fn file_name_of(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingKind {
    Event,
    Normal,
    Unknown,
}

/// Directory names that tell event recordings apart from routine ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingMarkers {
    pub event: Vec<String>,
    pub normal: Vec<String>,
}

impl RecordingMarkers {
    pub fn new(event: Vec<String>, normal: Vec<String>) -> Self {
        Self { event, normal }
    }

    /// Classify a path by its directory components. An event marker wins over a normal one.
    pub fn classify(&self, path: &str) -> RecordingKind {
        let components: Vec<&str> = path.split(['/', '\\']).collect();
        let has_marker = |markers: &[String]| {
            components
                .iter()
                .any(|c| markers.iter().any(|m| c.eq_ignore_ascii_case(m)))
        };

        if has_marker(self.event.as_slice()) {
            RecordingKind::Event
        } else if has_marker(self.normal.as_slice()) {
            RecordingKind::Normal
        } else {
            debug!("No recording marker in {}", path);
            RecordingKind::Unknown
        }
    }
}

impl Default for RecordingMarkers {
    fn default() -> Self {
        Self::new(vec!["Event".to_string()], vec!["Normal".to_string()])
    }
}
