// ============================================================
// Layer 3 — Answer and Generated Question Types
// ============================================================
// The two results the pipeline can produce.
//
// Extractive QA points at a span that already exists in the
// context, so besides the answer text the model may report a
// confidence score and the character offsets of the span:
//
//   Context: "Paris is the capital of France."
//   Answer:  "Paris"  start = 0, end = 5, score ≈ 0.98
//
// Question generation produces free text, one string per
// returned beam, in the order the model ranked them.
//
// Reference: Rust Book §5 (Structs)

use serde::{Deserialize, Serialize};

/// Top answer span returned by an extractive QA model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerResult {
    /// The answer text as it appears in the context
    pub answer: String,

    /// Model confidence for this span, if reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,

    /// Character offset of the first answer character in the context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<usize>,

    /// Character offset one past the last answer character
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<usize>,
}

#[cfg(test)]
impl AnswerResult {
    /// An answer with only the text field populated
    pub fn text(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            score:  None,
            start:  None,
            end:    None,
        }
    }
}

/// One sequence returned by a text-generation model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedText {
    pub generated_text: String,
}

#[cfg(test)]
impl GeneratedText {
    pub fn new(text: impl Into<String>) -> Self {
        Self { generated_text: text.into() }
    }
}

/// Ordered candidate questions for one passage.
///
/// Order is the model's ranking. Entries are not deduplicated,
/// so near-identical questions may appear more than once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneratedQuestionSet {
    pub questions: Vec<String>,

    /// Whether the passage had to be cut to fit the token budget
    pub context_truncated: bool,
}

impl GeneratedQuestionSet {
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.questions.iter().map(String::as_str)
    }
}

#[cfg(test)]
impl GeneratedQuestionSet {
    pub fn len(&self) -> usize {
        self.questions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_result_parses_full_model_payload() {
        let json = r#"{"score":0.97,"start":0,"end":5,"answer":"Paris"}"#;
        let result: AnswerResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.answer, "Paris");
        assert_eq!(result.start, Some(0));
        assert_eq!(result.end, Some(5));
    }

    #[test]
    fn test_answer_result_only_requires_answer_text() {
        let result: AnswerResult = serde_json::from_str(r#"{"answer":"Paris"}"#).unwrap();
        assert_eq!(result, AnswerResult::text("Paris"));
    }
}
