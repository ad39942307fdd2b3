//! The fixed cleaning tasks and the files they work on.

use std::path::{Path, PathBuf};

use crate::output::JoinPolicy;
use crate::pipeline::Pipeline;
use crate::rule::{DelimiterOffset, DigitStrip, LastSpaceSplit};

/// Offset of the first comma in a five-letter word's CSV row.
pub const FIVE_LETTER_COMMA: usize = 5;

/// One preprocessing job: a rule bound to its default input and output files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Keep five-letter rows of the unigram frequency table, trimmed.
    Frequency,
    /// Keep five-letter rows of the unigram frequency table, as read.
    FrequencyRaw,
    /// Reduce each dated answer line to its lower-cased word.
    Medium,
    /// Strip counts from the word-find dictionary.
    Wordfind,
}

impl Task {
    pub fn default_input(self) -> &'static str {
        match self {
            Task::Frequency | Task::FrequencyRaw => "unigram_freq.csv",
            Task::Medium => "medium_wordle_words_todate_original.txt",
            Task::Wordfind => "wordfind_5letter_words_original.txt",
        }
    }

    pub fn default_output(self) -> &'static str {
        match self {
            Task::Frequency | Task::FrequencyRaw => "five_letter_freq.csv",
            Task::Medium => "medium_wordle_words_todate.txt",
            Task::Wordfind => "wordfind_5letter_words.txt",
        }
    }

    /// Default input resolved against `dir`.
    pub fn input_in(self, dir: &Path) -> PathBuf {
        dir.join(self.default_input())
    }

    /// Default output resolved against `dir`.
    pub fn output_in(self, dir: &Path) -> PathBuf {
        dir.join(self.default_output())
    }

    pub fn pipeline(self) -> Pipeline {
        match self {
            Task::Frequency => Pipeline::new(
                DelimiterOffset::trimmed(',', FIVE_LETTER_COMMA),
                JoinPolicy::Interior,
            ),
            Task::FrequencyRaw => Pipeline::new(
                DelimiterOffset::raw(',', FIVE_LETTER_COMMA),
                JoinPolicy::Verbatim,
            ),
            Task::Medium => Pipeline::new(LastSpaceSplit, JoinPolicy::Interior),
            Task::Wordfind => Pipeline::new(DigitStrip, JoinPolicy::Terminated),
        }
    }
}
