//! The line transform pipeline.
//!
//! Streams an input one record at a time through a `Rule` and writes the
//! emitted records through a `RecordWriter`. Only the "first record written"
//! state is carried between records.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::{debug, trace, warn};

use crate::error::PipelineError;
use crate::output::{JoinPolicy, RecordWriter};
use crate::record::records;
use crate::rule::{Outcome, Rule};

/// What to do with a record that fails its rule's structural check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MalformedPolicy {
    /// Abort the run with `PipelineError::MalformedRecord`.
    #[default]
    Fail,
    /// Treat the record as skipped and keep going.
    Skip,
}

/// Record counts for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub records_in: usize,
    pub records_out: usize,
    /// Malformed records skipped under `MalformedPolicy::Skip`.
    pub malformed: usize,
}

/// A rule plus the output layout it is written with.
pub struct Pipeline {
    rule: Box<dyn Rule>,
    join: JoinPolicy,
    on_malformed: MalformedPolicy,
}

impl Pipeline {
    pub fn new(rule: impl Rule + 'static, join: JoinPolicy) -> Self {
        Self {
            rule: Box::new(rule),
            join,
            on_malformed: MalformedPolicy::Fail,
        }
    }

    /// Set the handling of malformed records.
    pub fn on_malformed(mut self, policy: MalformedPolicy) -> Self {
        self.on_malformed = policy;
        self
    }

    pub fn rule_name(&self) -> &str {
        self.rule.name()
    }

    pub fn join(&self) -> JoinPolicy {
        self.join
    }

    /// Clean `input` into `output`, creating or truncating `output`.
    ///
    /// On error the output written so far is flushed and left in place.
    pub fn run(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> Result<RunStats, PipelineError> {
        let input = input.as_ref();
        let output = output.as_ref();
        debug!(
            rule = self.rule.name(),
            input = %input.display(),
            output = %output.display(),
            "starting run"
        );

        let reader = File::open(input).map_err(|e| PipelineError::io(input, e))?;
        let writer = File::create(output).map_err(|e| PipelineError::io(output, e))?;
        let stats = self.stream(BufReader::new(reader), BufWriter::new(writer), input, output)?;

        debug!(
            records_in = stats.records_in,
            records_out = stats.records_out,
            malformed = stats.malformed,
            "run complete"
        );
        Ok(stats)
    }

    /// Clean an in-memory or already opened stream.
    pub fn process<R: BufRead, W: Write>(
        &self,
        reader: R,
        writer: W,
    ) -> Result<RunStats, PipelineError> {
        self.stream(reader, writer, Path::new("<input>"), Path::new("<output>"))
    }

    fn stream<R: BufRead, W: Write>(
        &self,
        reader: R,
        writer: W,
        input: &Path,
        output: &Path,
    ) -> Result<RunStats, PipelineError> {
        let mut out = RecordWriter::new(writer, self.join);
        let result = self.copy_records(reader, &mut out, input, output);
        match result {
            Ok(mut stats) => {
                out.flush().map_err(|e| PipelineError::io(output, e))?;
                stats.records_out = out.written();
                Ok(stats)
            }
            Err(e) => {
                // Keep whatever was written before the failure.
                if let Err(flush_err) = out.flush() {
                    warn!(output = %output.display(), error = %flush_err, "flush after failed run");
                }
                Err(e)
            }
        }
    }

    fn copy_records<R: BufRead, W: Write>(
        &self,
        reader: R,
        out: &mut RecordWriter<W>,
        input: &Path,
        output: &Path,
    ) -> Result<RunStats, PipelineError> {
        let mut stats = RunStats::default();

        for (idx, record) in records(reader).enumerate() {
            let record = record.map_err(|e| PipelineError::io(input, e))?;
            let line = idx + 1;
            stats.records_in += 1;

            match self.rule.apply(&record) {
                Ok(Outcome::Emit(text)) => {
                    out.write_record(&text)
                        .map_err(|e| PipelineError::io(output, e))?;
                }
                Ok(Outcome::Skip) => trace!(line, "skipped"),
                Err(m) => match self.on_malformed {
                    MalformedPolicy::Fail => {
                        return Err(PipelineError::MalformedRecord {
                            line,
                            expected: m.expected,
                            record: record.as_str().to_string(),
                        });
                    }
                    MalformedPolicy::Skip => {
                        warn!(line, expected = %m.expected, "skipping malformed record");
                        stats.malformed += 1;
                    }
                },
            }
        }

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{DelimiterOffset, DigitStrip, LastSpaceSplit};
    use std::io::{self, Cursor};

    fn run_str(pipeline: &Pipeline, input: &str) -> Result<(String, RunStats), PipelineError> {
        let mut out = Vec::new();
        let stats = pipeline.process(Cursor::new(input), &mut out)?;
        Ok((String::from_utf8(out).unwrap(), stats))
    }

    fn frequency() -> Pipeline {
        Pipeline::new(DelimiterOffset::trimmed(',', 5), JoinPolicy::Interior)
    }

    #[test]
    fn test_frequency_filter_keeps_order() {
        let input = "word,count\nabout,100\nthe,90\nother,80\na,70\nwhich,60\n";
        let (out, stats) = run_str(&frequency(), input).unwrap();
        assert_eq!(out, "about,100\nother,80\nwhich,60");
        assert_eq!(stats.records_in, 6);
        assert_eq!(stats.records_out, 3);
    }

    #[test]
    fn test_frequency_filter_is_idempotent() {
        let input = "about,100\nthe,90\nother,80\n";
        let (once, _) = run_str(&frequency(), input).unwrap();
        let (twice, _) = run_str(&frequency(), &once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_raw_frequency_reproduces_lines() {
        let pipeline = Pipeline::new(DelimiterOffset::raw(',', 5), JoinPolicy::Verbatim);
        let input = "about,100 \nthe,90\nother,80";
        let (out, _) = run_str(&pipeline, input).unwrap();
        assert_eq!(out, "about,100 \nother,80");
    }

    #[test]
    fn test_medium_normalize() {
        let pipeline = Pipeline::new(LastSpaceSplit, JoinPolicy::Interior);
        let input = "Jun 19 2021 Day 0 CIGAR\nJun 20 2021 Day 1 REBUT \n12345 Hello World\n";
        let (out, _) = run_str(&pipeline, input).unwrap();
        assert_eq!(out, "cigar\n\nworld");
        for line in out.lines() {
            assert_eq!(line, line.to_lowercase());
            assert_eq!(line, line.trim_end());
        }
    }

    #[test]
    fn test_digit_strip_line_count() {
        let pipeline = Pipeline::new(DigitStrip, JoinPolicy::Terminated);
        let input = "  apple123\nberry7\n\n  cider";
        let (out, stats) = run_str(&pipeline, input).unwrap();
        assert_eq!(out, "apple\nberry\n\ncider\n");
        assert_eq!(out.lines().count(), input.lines().count());
        assert_eq!(stats.records_out, stats.records_in);
    }

    #[test]
    fn test_empty_input() {
        for pipeline in [
            frequency(),
            Pipeline::new(LastSpaceSplit, JoinPolicy::Interior),
            Pipeline::new(DigitStrip, JoinPolicy::Terminated),
        ] {
            let (out, stats) = run_str(&pipeline, "").unwrap();
            assert_eq!(out, "");
            assert_eq!(stats, RunStats::default());
        }
    }

    #[test]
    fn test_malformed_fails_with_line_number() {
        let err = run_str(&frequency(), "about,1\nnocomma\nother,2\n").unwrap_err();
        match err {
            PipelineError::MalformedRecord {
                line,
                expected,
                record,
            } => {
                assert_eq!(line, 2);
                assert_eq!(expected, ',');
                assert_eq!(record, "nocomma");
            }
            other => panic!("Expected MalformedRecord, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_keeps_partial_output() {
        let mut out = Vec::new();
        let result = frequency().process(Cursor::new("about,1\nnocomma\nother,2\n"), &mut out);
        assert!(result.unwrap_err().is_malformed());
        assert_eq!(out, b"about,1");
    }

    #[test]
    fn test_malformed_skip_policy() {
        let pipeline =
            Pipeline::new(LastSpaceSplit, JoinPolicy::Interior).on_malformed(MalformedPolicy::Skip);
        let (out, stats) = run_str(&pipeline, "1 CRANE\nSLATE\n2 TRACE\n").unwrap();
        assert_eq!(out, "crane\ntrace");
        assert_eq!(stats.records_in, 3);
        assert_eq!(stats.records_out, 2);
        assert_eq!(stats.malformed, 1);
    }

    /// Accepts writes, fails every flush.
    struct FailingFlush(Vec<u8>);

    impl Write for FailingFlush {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::other("disk full"))
        }
    }

    #[test]
    fn test_flush_failure_keeps_malformed_error() {
        let mut out = FailingFlush(Vec::new());
        let err = frequency()
            .process(Cursor::new("about,1
nocomma
"), &mut out)
            .unwrap_err();
        assert!(err.is_malformed());
        assert_eq!(out.0, b"about,1");
    }

    #[test]
    fn test_flush_failure_on_success_is_io_error() {
        let mut out = FailingFlush(Vec::new());
        let err = frequency()
            .process(Cursor::new("about,1
"), &mut out)
            .unwrap_err();
        assert!(matches!(err, PipelineError::Io { .. }));
    }

    #[test]
    fn test_invalid_utf8_is_io_error() {
        let mut out = Vec::new();
        let input: &[u8] = &[b'a', b' ', 0xff, b'\n'];
        let err = Pipeline::new(LastSpaceSplit, JoinPolicy::Interior)
            .process(input, &mut out)
            .unwrap_err();
        assert!(matches!(err, PipelineError::Io { .. }));
    }
}
