// ============================================================
// Layer 4 — Text Extractor
// ============================================================
// Turns an uploaded document into one plain-text context string.
//
//   PDF:   lopdf decodes the container; every page's text is
//          appended in page order. No separator is promised
//          between pages, whatever lopdf happens to emit.
//   DOCX:  docx-rs parses the ZIP/XML; paragraph text is
//          joined with newlines (Paragraph → Run → Text).
//   Text:  must be valid UTF-8.
//
// The parsed document only lives inside the extract function,
// so it is dropped on every exit path, success or failure.
//
// A document with no text layer (scanned pages) yields an empty
// string. That is not an error here; the services reject empty
// context later.
//
// Reference: lopdf / docx-rs crate documentation
//            Rust Book §9 (Error Handling)

use anyhow::{anyhow, bail, Context, Result};
use std::{fs, path::Path};

use crate::domain::document::{DocumentFormat, UploadedDocument};
use crate::domain::error::PipelineError;
use crate::domain::traits::TextExtractor;

/// Every PDF file starts with this header.
const PDF_MAGIC: &[u8] = b"%PDF";

/// Dispatches on the upload's format hint.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentExtractor;

impl DocumentExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for DocumentExtractor {
    fn extract_text(&self, document: &UploadedDocument) -> Result<String, PipelineError> {
        let extracted = match document.format {
            DocumentFormat::Pdf       => extract_pdf(&document.bytes),
            DocumentFormat::Docx      => extract_docx(&document.bytes),
            DocumentFormat::PlainText => extract_plain(&document.bytes),
        };

        let text = extracted.map_err(|e| PipelineError::DocumentParse {
            name:    document.name.clone(),
            format:  document.format,
            message: format!("{e:#}"),
        })?;

        tracing::info!(
            "Extracted {} chars from {} document '{}' ({} bytes)",
            text.chars().count(),
            document.format,
            document.name,
            document.bytes.len()
        );
        if text.trim().is_empty() {
            tracing::warn!("'{}' has no extractable text layer", document.name);
        }

        Ok(text)
    }
}

/// Read a file from disk into an upload, taking the format hint
/// from its extension.
pub fn load_upload(path: &Path) -> Result<UploadedDocument, PipelineError> {
    let format = DocumentFormat::from_path(path)?;
    let bytes  = fs::read(path).map_err(|source| PipelineError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload")
        .to_string();

    Ok(UploadedDocument::new(name, format, bytes))
}

fn extract_pdf(bytes: &[u8]) -> Result<String> {
    if !bytes.starts_with(PDF_MAGIC) {
        bail!("missing %PDF header");
    }

    let doc = lopdf::Document::load_mem(bytes)
        .map_err(|e| anyhow!("malformed PDF structure: {e}"))?;

    // get_pages() is keyed by 1-based page number, so iteration
    // is already in page order
    let mut text = String::new();
    for (page_number, _page_id) in doc.get_pages() {
        let page_text = doc
            .extract_text(&[page_number])
            .map_err(|e| anyhow!("cannot decode text on page {page_number}: {e}"))?;
        text.push_str(&page_text);
    }

    Ok(text)
}

fn extract_docx(bytes: &[u8]) -> Result<String> {
    let docx = docx_rs::read_docx(bytes)
        .map_err(|e| anyhow!("docx-rs parse error: {e:?}"))?;

    let mut paragraphs: Vec<String> = Vec::new();

    for child in &docx.document.children {
        use docx_rs::DocumentChild;

        // Tables, section properties, etc. carry no passage text
        if let DocumentChild::Paragraph(para) = child {
            let para_text = extract_paragraph_text(para);
            if !para_text.trim().is_empty() {
                paragraphs.push(para_text);
            }
        }
    }

    Ok(paragraphs.join("\n"))
}

/// Runs inside one paragraph are pieces of the same sentence,
/// so they are concatenated without a separator.
fn extract_paragraph_text(para: &docx_rs::Paragraph) -> String {
    let mut parts = Vec::new();

    for child in &para.children {
        use docx_rs::ParagraphChild;

        if let ParagraphChild::Run(run) = child {
            for rc in &run.children {
                use docx_rs::RunChild;

                if let RunChild::Text(t) = rc {
                    parts.push(t.text.clone());
                }
            }
        }
    }

    parts.join("")
}

fn extract_plain(bytes: &[u8]) -> Result<String> {
    String::from_utf8(bytes.to_vec()).context("text upload is not valid UTF-8")
}
