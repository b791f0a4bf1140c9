// ============================================================
// Layer 2 — Answer Use Case
// ============================================================
// Answering Service: (question, context) → top answer span.
//
//   Step 1: Validate: both inputs non-blank, else a warning.
//           Nothing is loaded or called for invalid input.
//   Step 2: Get the QA model (loaded on first use)   (Layer 5)
//   Step 3: Invoke it once and return its top span
//
// Any model failure (e.g. the passage exceeds the model's
// maximum sequence length) ends the request. No retry, no
// fallback model.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;

use crate::domain::answer::AnswerResult;
use crate::domain::error::{PipelineError, ValidationError};
use crate::domain::traits::ModelSource;

/// Both fields must contain something other than whitespace.
pub fn validate(question: &str, context: &str) -> Result<(), ValidationError> {
    if context.trim().is_empty() {
        return Err(ValidationError::MissingContext);
    }
    if question.trim().is_empty() {
        return Err(ValidationError::MissingQuestion);
    }
    Ok(())
}

pub struct AnswerUseCase {
    models: Arc<dyn ModelSource>,
}

impl AnswerUseCase {
    pub fn new(models: Arc<dyn ModelSource>) -> Self {
        Self { models }
    }

    pub fn answer(&self, question: &str, context: &str) -> Result<AnswerResult, PipelineError> {
        validate(question, context)?;

        let model = self.models.answer_model()?;
        tracing::info!(
            "Answering with '{}' ({} context chars)",
            model.model_id(),
            context.chars().count()
        );

        let started = Instant::now();
        let result  = model
            .answer(question, context)
            .context("question-answering request")
            .map_err(PipelineError::invocation)?;

        tracing::debug!(
            "Answer '{}' (score {:?}) in {:?}",
            result.answer,
            result.score,
            started.elapsed()
        );
        Ok(result)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeAnswerModel, StubModels};

    fn use_case() -> (Arc<StubModels>, AnswerUseCase) {
        let models = Arc::new(StubModels::new());
        (models.clone(), AnswerUseCase::new(models))
    }

    #[test]
    fn test_answers_capital_of_france() {
        let (models, uc) = use_case();
        let result = uc
            .answer("What is the capital of France?", "Paris is the capital of France.")
            .unwrap();

        assert!(result.answer.contains("Paris"));
        assert_eq!(models.answer_calls(), 1);
    }

    #[test]
    fn test_empty_context_warns_without_model_call() {
        let (models, uc) = use_case();
        let err = uc.answer("anything", "").unwrap_err();

        assert!(err.is_validation());
        assert_eq!(models.answer_calls(), 0);
        // Validation happens before the model is even requested
        assert_eq!(models.load_count(), 0);
    }

    #[test]
    fn test_blank_question_warns_without_model_call() {
        let (models, uc) = use_case();
        let err = uc.answer("   \n", "Paris is the capital of France.").unwrap_err();

        assert!(matches!(err, PipelineError::Validation(ValidationError::MissingQuestion)));
        assert_eq!(models.answer_calls(), 0);
    }

    #[test]
    fn test_whitespace_context_is_empty() {
        assert_eq!(validate("q", " \t\n"), Err(ValidationError::MissingContext));
        assert_eq!(validate("q", "c"), Ok(()));
    }

    #[test]
    fn test_model_failure_propagates_as_invocation_error() {
        let mut stub = StubModels::new();
        stub.answerer = Arc::new(FakeAnswerModel { fail: true, ..Default::default() });
        let uc = AnswerUseCase::new(Arc::new(stub));

        let err = uc.answer("q", "Some context").unwrap_err();
        assert!(matches!(err, PipelineError::ModelInvocation(_)));
        assert!(err.to_string().contains("maximum sequence length"));
    }
}
