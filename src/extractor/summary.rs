use crate::extractor::Extraction;
use bstr::ByteSlice;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::{Duration, Instant};

/// Counters for one pass over the index.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub files_scanned: usize,
    pub blocks_written: usize,
    pub empty_blocks: usize,
    pub unterminated: usize,
    pub written: Vec<String>,
    pub dry_run: bool,
    pub duration: Duration,
    #[serde(skip)]
    start_time: Instant,
}

impl RunSummary {
    pub fn new(dry_run: bool) -> Self {
        Self {
            started_at: Utc::now(),
            files_scanned: 0,
            blocks_written: 0,
            empty_blocks: 0,
            unterminated: 0,
            written: Vec::new(),
            dry_run,
            duration: Duration::ZERO,
            start_time: Instant::now(),
        }
    }

    /// Counts one scanned file. Names are kept for display only, so
    /// non-UTF-8 bytes are shown as U+FFFD here.
    pub fn record(&mut self, filename: &[u8], extraction: &Extraction) {
        self.files_scanned += 1;

        match extraction {
            Extraction::Block(_) => {
                self.blocks_written += 1;
                self.written.push(filename.to_str_lossy().into_owned());
            }
            Extraction::Empty => self.empty_blocks += 1,
            Extraction::Unterminated => self.unterminated += 1,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn finish(&mut self) {
        self.duration = self.elapsed();
    }

    pub fn skipped(&self) -> usize {
        self.empty_blocks + self.unterminated
    }
}
