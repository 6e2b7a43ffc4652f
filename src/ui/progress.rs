use crate::extractor::RunSummary;
use crate::ui::output::format_duration;
use bstr::ByteSlice;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::time::Duration;

pub struct ProgressManager {
    multi_progress: MultiProgress,
    enabled: bool,
}

impl ProgressManager {
    pub fn new(enabled: bool) -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            enabled,
        }
    }

    /// The index is read lazily, so the length is unknown up front and a
    /// spinner with a running count is shown instead of a bar.
    pub fn create_scan_spinner(&self) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }

        let pb = self.multi_progress.add(ProgressBar::new_spinner());
        pb.set_style(
            ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {pos} files {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "✓"]),
        );
        pb.set_message("Reading index...");
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    /// Runs `f` with the progress display cleared, so lines printed inside
    /// are not overdrawn.
    pub fn suspend<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        if self.enabled {
            self.multi_progress.suspend(f)
        } else {
            f()
        }
    }
}

pub fn update_scan_progress(pb: &ProgressBar, filename: &[u8]) {
    pb.inc(1);
    pb.set_message(format!("Scanning {}", filename.as_bstr()));
}

pub fn finish_scan_progress(pb: &ProgressBar, summary: &RunSummary) {
    pb.finish_with_message(format!(
        "{} written (completed in {})",
        summary.blocks_written,
        format_duration(summary.elapsed())
    ));
}
