pub mod builder;
pub mod calendar;
pub mod config;
pub mod engine;
pub mod error;
pub mod identify;
pub mod model;
pub mod parser;
pub mod playlist;
pub mod progress;
pub mod source;

pub use builder::{build_timeline, TimelineBuilder};
pub use config::{AppConfig, TimelineConfig};
pub use engine::{TimelineEngine, TimelineResult};
pub use error::Error;
pub use identify::Zone;
pub use model::{CameraRole, RecordingSegment, Timeline, VideoClip, VideoFile};
pub use progress::{ProgressReporter, SilentReporter};
pub use source::{DiscoveredFile, InMemorySource, ManifestSource, VideoSource};
