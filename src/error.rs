//! Load-time errors.
//!
//! Only building a [`Script`](crate::Script) can fail. Once a script exists,
//! every turn of a conversation produces a reply or the exit signal.

use std::path::PathBuf;
use thiserror::Error;

/// Error raised while loading or validating a script.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to read script {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("expected `tag: content`, found {0:?}")]
    MalformedLine(String),
    #[error("`{0}` needs at least one word")]
    EmptyDirective(String),
    #[error("invalid priority {0:?} (expected an integer)")]
    InvalidPriority(String),
    #[error("`decomp` appears before any `key`")]
    OrphanPattern,
    #[error("`reasmb` appears before any `decomp` of the current key")]
    OrphanTemplate,
    #[error("script has no `xnone` fallback key")]
    MissingFallback,
    #[error("key {term:?} has no decomposition patterns")]
    EmptyTrigger { term: String },
    #[error("pattern {pattern} of key {term:?} has no reassembly templates")]
    EmptyPattern { term: String, pattern: usize },
    #[error("line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<ScriptError>,
    },
}

impl ScriptError {
    /// Strip any line-number wrapping.
    pub fn root_cause(&self) -> &ScriptError {
        match self {
            ScriptError::AtLine { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// 1-based script line the error was raised on, if known.
    pub fn line(&self) -> Option<usize> {
        match self {
            ScriptError::AtLine { line, .. } => Some(*line),
            _ => None,
        }
    }
}
