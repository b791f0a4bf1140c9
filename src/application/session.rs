// ============================================================
// Layer 2 — Front-End Session
// ============================================================
// State behind the interactive front-end. It holds what the
// user has entered so far and routes the two actions to the
// services:
//
//   mode ─┬─ Upload  → context = text extracted from upload
//         └─ Passage → context = passage typed by the user
//   question (optional for "generate questions")
//
//   get_answer()         → AnswerUseCase(question, context)
//   generate_questions() → GenerateUseCase(context)
//
// Both contexts are kept, so switching mode back and forth does
// not lose anything; the active mode decides which one is used.
//
// A failed upload, whether the file could not be read or its
// contents could not be extracted, clears the previous upload
// (the new file replaced it) but leaves the session usable.
//
// No printing here: rendering is Layer 1's job.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::application::answer_use_case::AnswerUseCase;
use crate::application::generate_use_case::GenerateUseCase;
use crate::data::extractor::load_upload;
use crate::data::preview::preview;
use crate::domain::answer::{AnswerResult, GeneratedQuestionSet};
use crate::domain::document::UploadedDocument;
use crate::domain::error::PipelineError;
use crate::domain::traits::TextExtractor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Upload,
    Passage,
}

impl FromStr for InputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "upload" | "document" | "pdf" => Ok(Self::Upload),
            "passage" | "text"            => Ok(Self::Passage),
            other => Err(format!("unknown input mode '{other}' (expected 'upload' or 'passage')")),
        }
    }
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upload  => f.write_str("upload"),
            Self::Passage => f.write_str("passage"),
        }
    }
}

/// What the user sees right after a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSummary {
    pub name:    String,
    pub chars:   usize,
    pub preview: String,
}

struct ExtractedUpload {
    name: String,
    text: String,
}

pub struct Session<E: TextExtractor> {
    extractor:     E,
    answers:       AnswerUseCase,
    questions:     GenerateUseCase,
    preview_chars: usize,
    mode:          InputMode,
    upload:        Option<ExtractedUpload>,
    passage:       String,
    question:      String,
}

impl<E: TextExtractor> Session<E> {
    pub fn new(
        extractor:     E,
        answers:       AnswerUseCase,
        questions:     GenerateUseCase,
        preview_chars: usize,
    ) -> Self {
        Self {
            extractor,
            answers,
            questions,
            preview_chars,
            mode:         InputMode::default(),
            upload:       None,
            passage:      String::new(),
            question:     String::new(),
        }
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: InputMode) {
        tracing::debug!("Input mode: {}", mode);
        self.mode = mode;
    }

    /// Read a file from disk and upload it.
    pub fn upload_file(&mut self, path: &Path) -> Result<UploadSummary, PipelineError> {
        self.clear_upload();
        let document = load_upload(path)?;
        self.upload(document)
    }

    /// Extract the document's text and make it the active context.
    pub fn upload(&mut self, document: UploadedDocument) -> Result<UploadSummary, PipelineError> {
        self.clear_upload();

        let text = self.extractor.extract_text(&document)?;
        let summary = UploadSummary {
            name:    document.name.clone(),
            chars:   text.chars().count(),
            preview: preview(&text, self.preview_chars),
        };

        self.upload = Some(ExtractedUpload { name: document.name, text });
        Ok(summary)
    }

    fn clear_upload(&mut self) {
        self.mode   = InputMode::Upload;
        self.upload = None;
    }

    /// Replace the typed passage and make it the active context.
    pub fn set_passage(&mut self, passage: impl Into<String>) {
        self.mode    = InputMode::Passage;
        self.passage = passage.into();
    }

    pub fn set_question(&mut self, question: impl Into<String>) {
        self.question = question.into();
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    /// Name of the uploaded document, if one is loaded
    pub fn upload_name(&self) -> Option<&str> {
        self.upload.as_ref().map(|u| u.name.as_str())
    }

    /// The context selected by the current input mode.
    pub fn context(&self) -> &str {
        match self.mode {
            InputMode::Upload  => self.upload.as_ref().map(|u| u.text.as_str()).unwrap_or(""),
            InputMode::Passage => &self.passage,
        }
    }

    /// Preview of the active context, empty if there is none.
    pub fn context_preview(&self) -> String {
        preview(self.context(), self.preview_chars)
    }

    pub fn get_answer(&self) -> Result<AnswerResult, PipelineError> {
        self.answers.answer(&self.question, self.context())
    }

    pub fn generate_questions(&self) -> Result<GeneratedQuestionSet, PipelineError> {
        self.questions.generate(self.context())
    }
}
