// ============================================================
// Layer 3 — Collaborator Traits
// ============================================================
// Everything the pipeline delegates lives behind one of these:
//
//   TextExtractor:      document bytes → plain text
//   ContextTokenizer:   text ↔ token ids, with truncation
//   AnswerModel:        (question, context) → answer span
//   QuestionGenerator:  prompt + decoding params → sequences
//   ModelSource:        hands out the loaded models, loading
//                       them on first use
//
// Production implementations live in Layers 4–6. Tests build
// their own deterministic fakes against the same traits, so no
// test ever needs network access or model weights.
//
// Reference: Rust Book §10 (Traits), §17 (Trait Objects)

use std::sync::Arc;

use anyhow::Result;

use crate::domain::answer::{AnswerResult, GeneratedText};
use crate::domain::document::UploadedDocument;
use crate::domain::error::PipelineError;
use crate::domain::generation::GenerationParams;

// ─── TextExtractor ────────────────────────────────────────────────────────────
/// Turns an uploaded document into a single plain-text string.
///
/// An empty string is a valid result (e.g. image-only pages);
/// deciding whether it is usable is the caller's job.
pub trait TextExtractor {
    fn extract_text(&self, document: &UploadedDocument) -> Result<String, PipelineError>;
}

// ─── ContextTokenizer ─────────────────────────────────────────────────────────
/// Token ids kept after encoding with a length limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenWindow {
    pub ids: Vec<u32>,

    /// True if tokens past the limit were dropped
    pub truncated: bool,
}

/// The generation model's tokenizer.
pub trait ContextTokenizer: Send + Sync {
    /// Encode `text`, keeping at most the leading `max_tokens` ids.
    fn encode(&self, text: &str, max_tokens: usize) -> Result<TokenWindow>;

    /// Decode ids back to text with special/control tokens removed.
    fn decode(&self, ids: &[u32]) -> Result<String>;
}

// ─── AnswerModel ──────────────────────────────────────────────────────────────
/// An extractive question-answering model.
pub trait AnswerModel: Send + Sync {
    fn model_id(&self) -> &str;

    fn answer(&self, question: &str, context: &str) -> Result<AnswerResult>;
}

// ─── QuestionGenerator ────────────────────────────────────────────────────────
/// A text-to-text generation model prompted to write questions.
pub trait QuestionGenerator: Send + Sync {
    fn model_id(&self) -> &str;

    /// Returns the generated sequences in model ranking order.
    fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<Vec<GeneratedText>>;
}

// ─── ModelSource ──────────────────────────────────────────────────────────────
/// Access to the process-wide models.
///
/// Implementations load each model at most once and return the
/// same shared handle on every later call.
pub trait ModelSource {
    fn answer_model(&self) -> Result<Arc<dyn AnswerModel>, PipelineError>;

    fn question_generator(&self) -> Result<Arc<dyn QuestionGenerator>, PipelineError>;

    fn tokenizer(&self) -> Result<Arc<dyn ContextTokenizer>, PipelineError>;
}
