// src/input.rs
// =============================================================================
// Chooses where the URL list comes from.
//
// Rules:
// 1. A FILE argument always wins.
// 2. Without FILE, stdin is used when it is NOT a terminal (piped or redirected).
// 3. Without FILE and with an interactive terminal there is nothing to read:
//    that is an input error, reported before any worker is spawned.
//
// The result is a buffered async reader; the dispatcher pulls lines from it
// lazily, one at a time.
// =============================================================================

use crate::error::InputError;
use std::io::IsTerminal;
use std::path::Path;
use tokio::io::{AsyncBufRead, BufReader};

/// A lazily consumed, line-oriented input source.
pub type Input = Box<dyn AsyncBufRead + Send + Unpin>;

pub async fn open_input(path: Option<&Path>) -> Result<Input, InputError> {
    open_input_with(path, std::io::stdin().is_terminal()).await
}

// Split out so tests can decide whether "stdin is a terminal".
async fn open_input_with(path: Option<&Path>, stdin_is_terminal: bool) -> Result<Input, InputError> {
    match path {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .map_err(|source| InputError::Open {
                    path: path.to_path_buf(),
                    source,
                })?;
            tracing::debug!(path = %path.display(), "reading URLs from file");
            Ok(Box::new(BufReader::new(file)))
        }
        None if !stdin_is_terminal => {
            tracing::debug!("reading URLs from stdin");
            Ok(Box::new(BufReader::new(tokio::io::stdin())))
        }
        None => Err(InputError::NoInput),
    }
}
