use crate::error::{FixEmailsError, Result};
use crate::scanner::LineScanner;
use bstr::{BString, ByteSlice, ByteVec};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Substrings that open a block, tried in this order on every line.
pub const START_MARKERS: [&[u8]; 2] = [b"A charge ", b"a gas station charge"];

/// Substring that closes the block and ends the scan of a file.
pub const TERMINATOR: &[u8] = b"Do not reply";

const QUOTE_CHAR: char = '>';

/// What a single email file produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// Terminator found and the trimmed block is non-empty.
    Block(BString),
    /// Terminator found but nothing survived the trims.
    Empty,
    /// The file ended without a terminator.
    Unterminated,
}

/// Per-file scan state: the accumulated block and whether a start marker
/// has been seen. A fresh context is built for every file.
#[derive(Debug, Default)]
pub struct BlockContext {
    block: BString,
    in_block: bool,
}

impl BlockContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one line (terminator already removed). Returns `true` when the
    /// line carried the terminator; the caller must stop feeding then.
    ///
    /// The text before the terminator is appended even if no start marker
    /// has been seen yet.
    pub fn feed_line(&mut self, line: &[u8]) -> bool {
        let mut line = line;

        if let Some(start) = find_start_marker(line) {
            line = &line[start..];
            self.in_block = true;
        }

        let line = line.trim_with(|c| c == QUOTE_CHAR);

        if let Some(end) = line.find(TERMINATOR) {
            self.block.push_str(&line[..end]);
            return true;
        }

        if self.in_block {
            self.block.push_str(line);
        }

        false
    }

    /// Applies the closing trims: drop the first `=` only, then strip
    /// `\r`, `\n` and spaces from both ends.
    pub fn finish(mut self) -> Extraction {
        if let Some(pos) = self.block.find_byte(b'=') {
            self.block.remove(pos);
        }

        let trimmed = self.block.trim_with(|c| matches!(c, '\r' | '\n' | ' '));

        if trimmed.is_empty() {
            Extraction::Empty
        } else {
            Extraction::Block(BString::from(trimmed))
        }
    }
}

fn find_start_marker(line: &[u8]) -> Option<usize> {
    START_MARKERS.iter().find_map(|marker| line.find(marker))
}

/// Scans lines until the terminator and returns the block it closes.
pub fn extract_block<R: BufRead>(reader: R) -> io::Result<Extraction> {
    let mut context = BlockContext::new();

    for line in LineScanner::new(reader) {
        if context.feed_line(&line?) {
            return Ok(context.finish());
        }
    }

    Ok(Extraction::Unterminated)
}

/// Opens one email file and extracts its block. The handle is closed when
/// this returns.
pub fn extract_from_file(path: &Path) -> Result<Extraction> {
    let file = File::open(path).map_err(|source| FixEmailsError::EmailOpen {
        path: path.to_path_buf(),
        source,
    })?;

    extract_block(BufReader::new(file)).map_err(|source| FixEmailsError::EmailRead {
        path: path.to_path_buf(),
        source,
    })
}
