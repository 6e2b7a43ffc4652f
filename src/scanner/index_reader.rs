use crate::error::{FixEmailsError, Result};
use crate::scanner::LineScanner;
use bstr::{BString, ByteSlice};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Lazily yields the email filenames listed in an index file, one per line.
///
/// The sequence is forward-only and ends at end of file. Names are the raw
/// bytes of each line. Read failures are surfaced as
/// [`FixEmailsError::IndexRead`] and end the sequence.
pub struct IndexReader<R> {
    path: PathBuf,
    lines: LineScanner<R>,
    skip_blank_lines: bool,
}

impl IndexReader<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| FixEmailsError::IndexOpen {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self::from_reader(path, BufReader::new(file)))
    }
}

impl<R: BufRead> IndexReader<R> {
    pub fn from_reader<P: Into<PathBuf>>(path: P, reader: R) -> Self {
        Self {
            path: path.into(),
            lines: LineScanner::new(reader),
            skip_blank_lines: false,
        }
    }

    pub fn with_skip_blank_lines(mut self, skip: bool) -> Self {
        self.skip_blank_lines = skip;
        self
    }
}

impl<R: BufRead> Iterator for IndexReader<R> {
    type Item = Result<BString>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.lines.next()? {
                Ok(line) if self.skip_blank_lines && line.trim().is_empty() => continue,
                Ok(line) => return Some(Ok(BString::from(line))),
                Err(source) => {
                    return Some(Err(FixEmailsError::IndexRead {
                        path: self.path.clone(),
                        source,
                    }))
                }
            }
        }
    }
}
