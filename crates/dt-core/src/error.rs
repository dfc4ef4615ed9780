use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which channel an error belongs to.
///
/// `Load` and `Traversal` go to the diagnostic channel, `Validation` goes to the
/// user-facing message slot, `State` is a caller mistake (wrong lifecycle phase).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    Load,
    Traversal,
    Validation,
    State,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{code}: {message}")]
pub struct DialogTreeError {
    pub kind: ErrorKind,
    pub code: String,
    pub message: String,
}

impl DialogTreeError {
    pub fn new(kind: ErrorKind, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn load(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Load, code, message)
    }

    pub fn traversal(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Traversal, code, message)
    }

    pub fn validation(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, code, message)
    }

    pub fn state(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::State, code, message)
    }

    pub fn is_diagnostic(&self) -> bool {
        matches!(self.kind, ErrorKind::Load | ErrorKind::Traversal)
    }
}
