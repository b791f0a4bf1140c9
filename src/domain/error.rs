// ============================================================
// Layer 3 — Error Taxonomy
// ============================================================
// Three kinds of failure reach the user:
//
//   Validation:  empty question / empty context. Detected
//                before any model is loaded or called. The
//                user sees a warning and can simply retry.
//
//   Extraction:  the uploaded bytes could not be decoded.
//                Fatal to the current request only.
//
//   Model:       loading or invoking a model failed. No
//                retry, no fallback. Fatal to the request.
//
// Collaborators use anyhow internally; their errors are mapped
// into this enum at the service boundary with `{:#}` so the
// whole context chain survives as the message.
//
// Reference: Rust Book §9 (Error Handling), thiserror docs

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::document::DocumentFormat;

/// Input problems caught before the pipeline runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please provide a passage (or upload a document) and enter a question.")]
    MissingQuestion,

    #[error("Please provide a passage or upload a document.")]
    MissingContext,
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("could not read {format} document '{name}': {message}")]
    DocumentParse {
        name:    String,
        format:  DocumentFormat,
        message: String,
    },

    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("failed to load {0}")]
    ModelLoad(String),

    #[error("model call failed: {0}")]
    ModelInvocation(String),

    #[error("tokenizer failed: {0}")]
    Tokenizer(String),

    #[error("cannot read '{}': {source}", path.display())]
    Read {
        path:   PathBuf,
        source: std::io::Error,
    },
}

impl PipelineError {
    /// Validation failures are warnings, everything else is an error.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn model_load(what: &str, err: anyhow::Error) -> Self {
        Self::ModelLoad(format!("{what}: {err:#}"))
    }

    pub fn invocation(err: anyhow::Error) -> Self {
        Self::ModelInvocation(format!("{err:#}"))
    }

    pub fn tokenizer(err: anyhow::Error) -> Self {
        Self::Tokenizer(format!("{err:#}"))
    }
}
