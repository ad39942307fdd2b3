//! Per-record keep/transform rules.
//!
//! Each `Rule` looks at one record and decides whether it is skipped or
//! emitted, and what text is emitted. Rules hold no state between records.

use crate::Record;

/// What a rule does with a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Skip,
    Emit(String),
}

/// A record is missing the character its rule depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Malformed {
    pub expected: char,
}

/// A keep/transform rule applied to each record independently.
pub trait Rule {
    /// Decide the outcome for one record.
    fn apply(&self, record: &Record) -> Result<Outcome, Malformed>;

    /// The display name of this rule.
    fn name(&self) -> &str;
}

/// Keeps records whose first `delimiter` sits at character `offset`.
///
/// A record with no delimiter at all is malformed. Kept records are emitted
/// either trimmed of trailing whitespace or verbatim with their terminator.
pub struct DelimiterOffset {
    delimiter: char,
    offset: usize,
    keep_terminator: bool,
}

impl DelimiterOffset {
    /// Emit kept records with trailing whitespace removed.
    pub fn trimmed(delimiter: char, offset: usize) -> Self {
        Self {
            delimiter,
            offset,
            keep_terminator: false,
        }
    }

    /// Emit kept records exactly as read, terminator included.
    pub fn raw(delimiter: char, offset: usize) -> Self {
        Self {
            delimiter,
            offset,
            keep_terminator: true,
        }
    }
}

impl Rule for DelimiterOffset {
    fn apply(&self, record: &Record) -> Result<Outcome, Malformed> {
        let found = record
            .as_str()
            .chars()
            .position(|c| c == self.delimiter)
            .ok_or(Malformed {
                expected: self.delimiter,
            })?;

        if found != self.offset {
            return Ok(Outcome::Skip);
        }
        if self.keep_terminator {
            Ok(Outcome::Emit(record.raw()))
        } else {
            Ok(Outcome::Emit(record.as_str().trim_end().to_string()))
        }
    }

    fn name(&self) -> &str {
        if self.keep_terminator {
            "DELIMITER-OFFSET-RAW"
        } else {
            "DELIMITER-OFFSET"
        }
    }
}

/// Emits the lower-cased word after the last space of each record.
pub struct LastSpaceSplit;

impl Rule for LastSpaceSplit {
    fn apply(&self, record: &Record) -> Result<Outcome, Malformed> {
        let text = record.as_str();
        let idx = text.rfind(' ').ok_or(Malformed { expected: ' ' })?;
        let word = text[idx + 1..].trim_end().to_lowercase();
        Ok(Outcome::Emit(word))
    }

    fn name(&self) -> &str {
        "LAST-SPACE-SPLIT"
    }
}

/// Strips leading whitespace and a trailing run of digits. Never skips.
pub struct DigitStrip;

impl Rule for DigitStrip {
    fn apply(&self, record: &Record) -> Result<Outcome, Malformed> {
        let word = record
            .as_str()
            .trim_start()
            .trim_end_matches(|c: char| c == '\n' || c.is_ascii_digit());
        Ok(Outcome::Emit(word.to_string()))
    }

    fn name(&self) -> &str {
        "DIGIT-STRIP"
    }
}
