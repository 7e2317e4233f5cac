// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// The flags mirror the classic counter tool:
//   -w <word>   the substring to count (default "go")
//   -n <int>    how many URLs may be fetched at the same time (default 5)
//   -c          match case exactly (default: ignore case)
//   [FILE]      file with one URL per line; stdin is used when it is piped
//
// clap exits with code 2 on any usage error, which is exactly the exit code
// we want for malformed arguments.
// =============================================================================

use clap::builder::{NonEmptyStringValueParser, RangedU64ValueParser};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

// The whole CLI surface. There are no subcommands: one invocation = one run.
#[derive(Parser, Debug)]
#[command(
    name = "counter",
    version,
    about = "Fetch every URL listed in the input and count a word in the content",
    long_about = "counter reads one URL per line (from FILE or piped stdin), fetches them \
                  concurrently with a fixed worker limit, prints how many times the word \
                  occurs in each response and finally the total."
)]
pub struct Cli {
    /// Word (literal substring) to count
    #[arg(short = 'w', long = "word", default_value = "go", value_parser = NonEmptyStringValueParser::new())]
    pub word: String,

    /// Maximum number of concurrent workers
    ///
    /// Zero is rejected at parse time: a pool without slots would never run.
    #[arg(
        short = 'n',
        long = "workers",
        default_value_t = 5,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub workers: usize,

    /// Match the word case-sensitively
    #[arg(short = 'c', long = "case-sensitive")]
    pub case_sensitive: bool,

    /// Print a JSON summary at the end instead of one line per URL
    #[arg(long)]
    pub json: bool,

    /// Increase log verbosity on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// File with one URL per line (reads piped stdin when omitted)
    pub file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["counter"]).unwrap();
        assert_eq!(cli.word, "go");
        assert_eq!(cli.workers, 5);
        assert!(!cli.case_sensitive);
        assert!(!cli.json);
        assert!(cli.file.is_none());
    }

    #[test]
    fn test_short_flags_and_file() {
        let cli = Cli::try_parse_from(["counter", "-w", "rust", "-n", "2", "-c", "urls.txt"]).unwrap();
        assert_eq!(cli.word, "rust");
        assert_eq!(cli.workers, 2);
        assert!(cli.case_sensitive);
        assert_eq!(cli.file, Some(PathBuf::from("urls.txt")));
    }

    #[test]
    fn test_zero_workers_rejected() {
        let err = Cli::try_parse_from(["counter", "-n", "0"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_empty_word_rejected() {
        let err = Cli::try_parse_from(["counter", "-w", ""]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_verbose_counts() {
        let cli = Cli::try_parse_from(["counter", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
