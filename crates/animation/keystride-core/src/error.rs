//! Error types for retime, export and document I/O.

use thiserror::Error;

/// Failure of a retime call. No keyframe or frame rate is touched when one is returned.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum RetimeError {
    /// The target has no animation data.
    #[error("No animated object found")]
    NoAnimation,

    #[error("Invalid retime config: {reason}")]
    InvalidConfig { reason: String },
}

/// Failure reported by the bake/export facility, forwarded verbatim.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct ExportError {
    pub message: String,
}

impl ExportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A bake that cannot be sampled on the requested grid.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BakeError {
    #[error("sample step must be > 0, got {step}")]
    InvalidStep { step: f64 },

    #[error("sample step {step} too small for range {start}..{end} (more than {limit} samples)")]
    TooManySamples {
        step: f64,
        start: f64,
        end: f64,
        limit: usize,
    },
}

/// Failure reading or writing a scene/settings document.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid document: {reason}")]
    Invalid { reason: String },
}

impl DocumentError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
