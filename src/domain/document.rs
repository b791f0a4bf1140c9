// ============================================================
// Layer 3 — Uploaded Document Domain Type
// ============================================================
// Represents one document handed to the pipeline by the user.
// It only lives until its text has been extracted; after that
// the bytes are dropped and only the context string remains.
//
// The format hint tells the Text Extractor which parser to use.
// It is derived from the file extension, never sniffed from
// the content.
//
// Reference: Rust Book §5 (Structs), §6 (Enums)

use std::fmt;
use std::path::Path;

use crate::domain::error::PipelineError;

/// Container formats the Text Extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// Page-described binary document (the primary upload format)
    Pdf,
    /// Office Open XML word-processing document
    Docx,
    /// UTF-8 plain text
    PlainText,
}

impl DocumentFormat {
    /// Resolve the format hint from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf"                    => Some(Self::Pdf),
            "docx"                   => Some(Self::Docx),
            "txt" | "text" | "md"    => Some(Self::PlainText),
            _                        => None,
        }
    }

    /// Resolve the format hint from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self, PipelineError> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
            .ok_or_else(|| PipelineError::UnsupportedFormat(path.display().to_string()))
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pdf       => "pdf",
            Self::Docx      => "docx",
            Self::PlainText => "text",
        };
        f.write_str(name)
    }
}

/// Raw content of an upload plus the hint needed to decode it.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    /// File name shown back to the user (never used for parsing)
    pub name: String,

    /// How the bytes are to be decoded
    pub format: DocumentFormat,

    /// The undecoded file content
    pub bytes: Vec<u8>,
}

impl UploadedDocument {
    pub fn new(name: impl Into<String>, format: DocumentFormat, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            format,
            bytes,
        }
    }
}
