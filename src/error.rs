use std::io;

use thiserror::Error;

/// Errors that stop processing of a single file. The batch keeps going;
/// the affected file is left untouched.
#[derive(Debug, Error)]
pub enum StripError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),
}
