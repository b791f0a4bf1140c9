// ============================================================
// Layer 2 — Generate Questions Use Case
// ============================================================
// Question-Generation Service: context → up to N questions.
//
//   Step 1: Validate: blank context is a warning; nothing is
//           loaded or called
//   Step 2: Truncate the context to the token budget and
//           prefix it with the task marker          (Layer 4)
//   Step 3: Invoke the generation model with the fixed beam
//           search parameters                       (Layer 5)
//   Step 4: Keep at most num_return_sequences results, in
//           model order, trimmed
//
// Generated questions are NOT deduplicated; near-identical
// beams come back as separate entries.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;

use crate::data::truncator::{ContextTruncator, TruncationConfig};
use crate::domain::answer::GeneratedQuestionSet;
use crate::domain::error::{PipelineError, ValidationError};
use crate::domain::generation::GenerationParams;
use crate::domain::traits::ModelSource;

pub struct GenerateUseCase {
    models:     Arc<dyn ModelSource>,
    params:     GenerationParams,
    truncation: TruncationConfig,
}

impl GenerateUseCase {
    pub fn new(
        models:     Arc<dyn ModelSource>,
        params:     GenerationParams,
        truncation: TruncationConfig,
    ) -> Self {
        Self { models, params, truncation }
    }

    pub fn generate(&self, context: &str) -> Result<GeneratedQuestionSet, PipelineError> {
        if context.trim().is_empty() {
            return Err(ValidationError::MissingContext.into());
        }

        let truncator      = ContextTruncator::new(self.models.tokenizer()?, self.truncation.clone());
        let (prompt, kept) = truncator.prompt(context)?;

        let generator = self.models.question_generator()?;
        tracing::info!(
            "Generating {} questions with '{}' ({} prompt tokens)",
            self.params.num_return_sequences,
            generator.model_id(),
            kept.token_count
        );

        let started = Instant::now();
        let outputs = generator
            .generate(&prompt, &self.params)
            .context("question-generation request")
            .map_err(PipelineError::invocation)?;
        tracing::debug!("{} sequences in {:?}", outputs.len(), started.elapsed());

        let questions = outputs
            .into_iter()
            .take(self.params.num_return_sequences)
            .map(|g| g.generated_text.trim().to_string())
            .collect();

        Ok(GeneratedQuestionSet {
            questions,
            context_truncated: kept.truncated,
        })
    }
}
