use dashcam_timeline_core::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// CLI progress reporter using indicatif spinners.
///
/// - Discovery phase: spinner (reading the manifest can take a while on slow media)
/// - Build phase: spinner, finished with a one-line summary
pub struct CliReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl CliReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn start_spinner(&self, message: &'static str) {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
        }
        pb.set_message(message);
        pb.enable_steady_tick(std::time::Duration::from_millis(80));

        if let Ok(mut guard) = self.bar.lock() {
            if let Some(old) = guard.take() {
                old.finish_and_clear();
            }
            *guard = Some(pb);
        }
    }

    fn finish_bar(&self) {
        if let Ok(mut guard) = self.bar.lock() {
            if let Some(pb) = guard.take() {
                pb.finish_and_clear();
            }
        }
    }
}

impl ProgressReporter for CliReporter {
    fn on_discovery_start(&self) {
        self.start_spinner("Discovering video files...");
    }

    fn on_discovery_complete(&self, files_found: usize, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Discovery complete: {} files in {:.2}s",
            files_found, duration_secs
        );
    }

    fn on_identify_complete(&self, identified: usize, skipped: usize) {
        eprintln!(
            "  \x1b[32m✓\x1b[0m Identified {} video files, skipped {}",
            identified, skipped
        );
    }

    fn on_build_start(&self) {
        self.start_spinner("Building timeline...");
    }

    fn on_build_complete(&self, segments: usize, clips: usize, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Timeline complete: {} segments, {} clips in {:.2}s",
            segments, clips, duration_secs
        );
    }
}
