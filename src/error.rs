// src/error.rs
// =============================================================================
// Typed errors for the pieces of a run that can fail.
//
// - InputError: the input source could not be opened (fatal, exit 1)
// - ConfigError: run parameters that make no sense (empty word, zero workers)
// - FetchError: one URL could not be fetched or read (recovered per task)
//
// The application path in main.rs wraps these in anyhow::Error with context.
// =============================================================================

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("can't open file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no input: pass a file path or pipe URLs on stdin")]
    NoInput,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("word to count must not be empty")]
    EmptyWord,

    #[error("concurrency limit must be at least 1")]
    ZeroWorkers,
}

/// Why a single URL contributed nothing to the total.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error(transparent)]
    Request(#[from] reqwest::Error),

    /// The body stream failed after the response started.
    #[error("{0}")]
    Io(#[from] io::Error),
}
