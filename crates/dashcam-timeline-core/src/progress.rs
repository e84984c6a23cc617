/// Trait for reporting timeline build progress.
///
/// The CLI implements it with indicatif spinners; library users can ignore it.
/// All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    fn on_discovery_start(&self) {}
    fn on_discovery_complete(&self, _files_found: usize, _duration_secs: f64) {}
    fn on_identify_complete(&self, _identified: usize, _skipped: usize) {}
    fn on_build_start(&self) {}
    fn on_build_complete(&self, _segments: usize, _clips: usize, _duration_secs: f64) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}
