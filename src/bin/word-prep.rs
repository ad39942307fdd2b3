//! CLI tool to clean the word list and frequency files.
//!
//! Usage:
//!   word-prep frequency
//!   word-prep medium -C data
//!   word-prep wordfind -i words.txt -o clean.txt
//!
//! With no options each task reads and writes its fixed file names in the
//! current directory.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use tracing::level_filters::LevelFilter;
use word_prep::{MalformedPolicy, Task};

/// Clean word list and frequency files for the solver.
#[derive(Parser)]
#[command(name = "word-prep", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Keep five-letter rows of unigram_freq.csv, trimmed, in five_letter_freq.csv
    Frequency(TaskArgs),
    /// Keep five-letter rows of unigram_freq.csv exactly as read
    FrequencyRaw(TaskArgs),
    /// Lower-case the last word of each line of the Medium answer list
    Medium(TaskArgs),
    /// Strip trailing counts from the word-find dictionary
    Wordfind(TaskArgs),
}

#[derive(Args)]
struct TaskArgs {
    /// Directory the default file names are resolved against
    #[arg(short = 'C', long, default_value = ".")]
    dir: PathBuf,

    /// Read from this file instead of the task's default input
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Write to this file instead of the task's default output
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Skip lines missing their delimiter instead of failing
    #[arg(long)]
    skip_malformed: bool,

    /// Debug logging and record counts on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let (task, args) = match cli.command {
        Command::Frequency(args) => (Task::Frequency, args),
        Command::FrequencyRaw(args) => (Task::FrequencyRaw, args),
        Command::Medium(args) => (Task::Medium, args),
        Command::Wordfind(args) => (Task::Wordfind, args),
    };

    init_tracing(args.verbose);

    let input = args.input.unwrap_or_else(|| task.input_in(&args.dir));
    let output = args.output.unwrap_or_else(|| task.output_in(&args.dir));
    let policy = if args.skip_malformed {
        MalformedPolicy::Skip
    } else {
        MalformedPolicy::Fail
    };

    match task.pipeline().on_malformed(policy).run(&input, &output) {
        Ok(stats) => {
            if args.verbose {
                eprintln!(
                    "Processed {} -> {} records, output: {}",
                    stats.records_in,
                    stats.records_out,
                    output.display()
                );
                if stats.malformed > 0 {
                    eprintln!("Skipped {} malformed records", stats.malformed);
                }
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
