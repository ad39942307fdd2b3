//! Line records.
//!
//! A record is one line of input with its terminator split off. The
//! terminator is kept alongside the text so a line can be written back
//! exactly as it was read. `\n`, `\r\n` and a lone `\r` all end a line.

use std::io::{self, BufRead};

/// One input line, terminator stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    text: String,
    terminator: &'static str,
}

impl Record {
    /// Split a raw line, terminator included, into text and terminator.
    pub fn from_line(mut line: String) -> Self {
        let terminator = if line.ends_with("\r\n") {
            "\r\n"
        } else if line.ends_with('\n') {
            "\n"
        } else if line.ends_with('\r') {
            "\r"
        } else {
            ""
        };
        line.truncate(line.len() - terminator.len());
        Self {
            text: line,
            terminator,
        }
    }

    /// The line content without its terminator.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The line exactly as read.
    pub fn raw(&self) -> String {
        let mut raw = String::with_capacity(self.text.len() + self.terminator.len());
        raw.push_str(&self.text);
        raw.push_str(self.terminator);
        raw
    }
}

/// Iterator over the records of a buffered reader.
///
/// Yields an `InvalidData` error for a line that is not UTF-8.
pub struct Records<R> {
    reader: R,
}

impl<R: BufRead> Records<R> {
    /// Append the next line's bytes, terminator included, to `line`.
    fn read_line_bytes(&mut self, line: &mut Vec<u8>) -> io::Result<()> {
        loop {
            let available = self.reader.fill_buf()?;
            if available.is_empty() {
                return Ok(());
            }
            match available.iter().position(|&b| b == b'\n' || b == b'\r') {
                Some(i) => {
                    let end = available[i];
                    line.extend_from_slice(&available[..=i]);
                    self.reader.consume(i + 1);
                    if end == b'\r' && self.reader.fill_buf()?.first() == Some(&b'\n') {
                        line.push(b'\n');
                        self.reader.consume(1);
                    }
                    return Ok(());
                }
                None => {
                    let n = available.len();
                    line.extend_from_slice(available);
                    self.reader.consume(n);
                }
            }
        }
    }
}

impl<R: BufRead> Iterator for Records<R> {
    type Item = io::Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut line = Vec::new();
        if let Err(e) = self.read_line_bytes(&mut line) {
            return Some(Err(e));
        }
        if line.is_empty() {
            return None;
        }
        match String::from_utf8(line) {
            Ok(line) => Some(Ok(Record::from_line(line))),
            Err(e) => Some(Err(io::Error::new(io::ErrorKind::InvalidData, e))),
        }
    }
}

/// Read records one line at a time.
pub fn records<R: BufRead>(reader: R) -> Records<R> {
    Records { reader }
}
