use crate::error::{FixEmailsError, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Exit status used when a second Ctrl+C abandons the current file.
const FORCED_EXIT_CODE: i32 = 130;

/// Ctrl+C handling for a batch run.
///
/// The first interrupt lets the file being scanned finish, and the run then
/// stops before opening the next index entry. A second interrupt exits at
/// once, possibly leaving a partly written `.edited` file behind.
pub struct GracefulShutdown {
    stop_requested: Arc<AtomicBool>,
}

impl GracefulShutdown {
    /// Installs the process-wide Ctrl+C handler. Only one may exist per
    /// process.
    pub fn new() -> Result<Self> {
        let stop_requested = Arc::new(AtomicBool::new(false));
        let flag = stop_requested.clone();

        ctrlc::set_handler(move || {
            if flag.swap(true, Ordering::SeqCst) {
                eprintln!("\nInterrupted again, exiting now.");
                std::process::exit(FORCED_EXIT_CODE);
            }
            eprintln!("\nStopping after the current file (Ctrl+C again to exit now)");
        })
        .map_err(|e| FixEmailsError::Config {
            message: format!("Failed to install Ctrl+C handler: {}", e),
        })?;

        Ok(Self { stop_requested })
    }

    /// A flag with no handler behind it, for embedding the extractor in a
    /// program that owns signal handling.
    pub fn detached() -> Self {
        Self {
            stop_requested: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Called between index entries.
    pub fn check_shutdown(&self) -> Result<()> {
        if self.stop_requested.load(Ordering::SeqCst) {
            return Err(FixEmailsError::Cancelled);
        }
        Ok(())
    }

    pub fn request_shutdown(&self) {
        self.stop_requested.store(true, Ordering::SeqCst);
    }
}
