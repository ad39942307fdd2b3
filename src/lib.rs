//! # word-prep
//!
//! Line-at-a-time cleaning of the text and CSV files behind a word-guessing
//! game's word lists.
//!
//! Every task is the same shape: read a file one line at a time, let a
//! [`Rule`] skip or rewrite each line, and write what survives through a
//! [`JoinPolicy`]. Record order is never changed.
//!
//! ## Example
//!
//! ```
//! use word_prep::{DelimiterOffset, JoinPolicy, Pipeline};
//!
//! let input = "word,count\nabout,100\nthe,90\nother,80\n";
//! let mut output = Vec::new();
//!
//! let stats = Pipeline::new(DelimiterOffset::trimmed(',', 5), JoinPolicy::Interior)
//!     .process(input.as_bytes(), &mut output)
//!     .unwrap();
//!
//! assert_eq!(output, b"about,100\nother,80");
//! assert_eq!(stats.records_out, 2);
//! ```

pub mod error;
pub mod output;
pub mod pipeline;
pub mod record;
pub mod rule;
pub mod task;

pub use error::PipelineError;
pub use output::{JoinPolicy, RecordWriter};
pub use pipeline::{MalformedPolicy, Pipeline, RunStats};
pub use record::{Record, Records, records};
pub use rule::{DelimiterOffset, DigitStrip, LastSpaceSplit, Malformed, Outcome, Rule};
pub use task::Task;
