// ============================================================
// Layer 1 — Result Rendering
// ============================================================
// Turns pipeline results into the text the user reads. Shared
// by the one-shot commands and the interactive session, and
// written against `impl Write` so tests can capture it.
//
//   Answer: Paris
//   Possible questions:
//     1. What is the capital of France?
//     2. …
//   Warning: Please provide a passage or upload a document.
//   Error: could not read pdf document 'x.pdf': …

use std::io::{self, Write};

use crate::application::session::UploadSummary;
use crate::domain::answer::{AnswerResult, GeneratedQuestionSet};
use crate::domain::error::PipelineError;

pub fn write_answer(out: &mut impl Write, result: &AnswerResult, verbose: bool) -> io::Result<()> {
    writeln!(out, "Answer: {}", result.answer)?;

    if verbose {
        if let Some(score) = result.score {
            writeln!(out, "  score: {score:.4}")?;
        }
        if let (Some(start), Some(end)) = (result.start, result.end) {
            writeln!(out, "  span:  chars {start}..{end}")?;
        }
    }
    Ok(())
}

pub fn write_questions(out: &mut impl Write, set: &GeneratedQuestionSet) -> io::Result<()> {
    if set.is_empty() {
        return writeln!(out, "The model returned no questions.");
    }

    writeln!(out, "Possible questions:")?;
    for (i, q) in set.iter().enumerate() {
        writeln!(out, "  {}. {}", i + 1, q)?;
    }
    if set.context_truncated {
        writeln!(out, "(only the beginning of the passage was used)")?;
    }
    Ok(())
}

pub fn write_upload(out: &mut impl Write, summary: &UploadSummary) -> io::Result<()> {
    writeln!(out, "Extracted {} characters from '{}'.", summary.chars, summary.name)?;
    if summary.preview.is_empty() {
        return writeln!(out, "Warning: the document has no extractable text.");
    }
    writeln!(out, "--- extracted context ---")?;
    writeln!(out, "{}", summary.preview)?;
    writeln!(out, "-------------------------")
}

/// Validation problems are warnings; everything else is an error
/// for this request only.
pub fn write_failure(out: &mut impl Write, err: &PipelineError) -> io::Result<()> {
    if err.is_validation() {
        writeln!(out, "Warning: {err}")
    } else {
        writeln!(out, "Error: {err}")
    }
}
