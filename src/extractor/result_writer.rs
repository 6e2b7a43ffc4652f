use crate::error::{FixEmailsError, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Appended to the email path to name its result file.
pub const OUTPUT_SUFFIX: &str = ".edited";

/// `<source>.edited`, next to the source file.
pub fn edited_path(source: &Path) -> PathBuf {
    let mut name = source.as_os_str().to_owned();
    name.push(OUTPUT_SUFFIX);
    PathBuf::from(name)
}

pub struct ResultWriter {
    dry_run: bool,
}

impl ResultWriter {
    pub fn new() -> Self {
        Self { dry_run: false }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Creates or truncates `<source>.edited` and writes the block bytes as
    /// one line. In dry-run mode nothing touches the disk. Returns the result
    /// path either way.
    pub fn write(&self, source: &Path, block: &[u8]) -> Result<PathBuf> {
        let dest = edited_path(source);

        if self.dry_run {
            return Ok(dest);
        }

        let to_error = |source: std::io::Error| FixEmailsError::OutputWrite {
            path: dest.clone(),
            source,
        };

        let file = File::create(&dest).map_err(to_error)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(block).map_err(to_error)?;
        writer.write_all(b"\n").map_err(to_error)?;
        writer.flush().map_err(to_error)?;

        Ok(dest)
    }
}
