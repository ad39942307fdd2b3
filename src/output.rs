//! Output stream layout.

use std::io::{self, Write};

/// Where newline separators go between emitted records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinPolicy {
    /// One `\n` between records, none after the last.
    Interior,
    /// Every record followed by one `\n`.
    Terminated,
    /// No separators; records already carry their own terminators.
    Verbatim,
}

/// Writes emitted records according to a join policy.
pub struct RecordWriter<W: Write> {
    inner: W,
    policy: JoinPolicy,
    written: usize,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(inner: W, policy: JoinPolicy) -> Self {
        Self {
            inner,
            policy,
            written: 0,
        }
    }

    /// Write one emitted record.
    pub fn write_record(&mut self, text: &str) -> io::Result<()> {
        match self.policy {
            JoinPolicy::Interior => {
                if self.written > 0 {
                    self.inner.write_all(b"\n")?;
                }
                self.inner.write_all(text.as_bytes())?;
            }
            JoinPolicy::Terminated => {
                self.inner.write_all(text.as_bytes())?;
                self.inner.write_all(b"\n")?;
            }
            JoinPolicy::Verbatim => self.inner.write_all(text.as_bytes())?,
        }
        self.written += 1;
        Ok(())
    }

    /// Number of records written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.inner
    }
}
