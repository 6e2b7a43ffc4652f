use std::io::{self, BufRead};

/// Splits a reader into lines the way mail tools see them: `\n` or `\r\n`
/// terminated, terminator removed, and a final unterminated line still
/// yielded. Lines are raw bytes and are never decoded, so 8-bit mail passes
/// through untouched.
pub struct LineScanner<R> {
    reader: R,
    finished: bool,
}

impl<R: BufRead> LineScanner<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            finished: false,
        }
    }
}

impl<R: BufRead> Iterator for LineScanner<R> {
    type Item = io::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let mut line = Vec::with_capacity(256);
        match self.reader.read_until(b'\n', &mut line) {
            Ok(0) => {
                self.finished = true;
                None
            }
            Ok(_) => {
                if line.last() == Some(&b'\n') {
                    line.pop();
                }
                if line.last() == Some(&b'\r') {
                    line.pop();
                }
                Some(Ok(line))
            }
            Err(e) => {
                // A failed reader is not resumed.
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}
