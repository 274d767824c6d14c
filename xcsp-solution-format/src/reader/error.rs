use std::io;

#[cfg(doc)]
use super::SolutionReader;

/// The errors that can be encountered by the [`SolutionReader`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read from source: {0}")]
    IoError(#[from] io::Error),

    #[error("failed to parse instantiation on line {line_nr} {span:?}: {reason}")]
    ParseError {
        line_nr: usize,
        reason: String,
        span: (usize, usize),
    },

    #[error("the instantiation starting on line {line_nr} is never closed")]
    UnterminatedInstantiation { line_nr: usize },
}
