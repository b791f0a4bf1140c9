// ============================================================
// Layer 4 — Context Truncator
// ============================================================
// Bounds a passage to the question-generation model's input
// budget before it is turned into a prompt.
//
// Truncation is done in TOKEN space with the generation model's
// own tokenizer. Cutting characters instead would either feed
// the model more tokens than it accepts or throw away text that
// would have fit, because token boundaries are model-specific.
//
// Policy:
//   1. Encode the context, keeping the leading `max_input_tokens`
//      ids (special tokens added by the tokenizer count too)
//   2. Decode the kept ids with special tokens stripped
//   3. Prepend the fixed prompt prefix the QG model was trained
//      with ("generate questions: ")
//
// There is no sentence-boundary logic and no summarisation: the
// tail of a long document is simply dropped.
//
// Reference: Raffel et al. (2020) T5 task prefixes

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::error::PipelineError;
use crate::domain::traits::ContextTokenizer;

pub const DEFAULT_MAX_INPUT_TOKENS: usize = 512;
pub const DEFAULT_PROMPT_PREFIX: &str = "generate questions: ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TruncationConfig {
    /// Token budget for the passage (prefix not included)
    pub max_input_tokens: usize,

    /// Instruction marker placed in front of the passage
    pub prompt_prefix: String,
}

impl Default for TruncationConfig {
    fn default() -> Self {
        Self {
            max_input_tokens: DEFAULT_MAX_INPUT_TOKENS,
            prompt_prefix:    DEFAULT_PROMPT_PREFIX.to_string(),
        }
    }
}

/// A passage after token-aware truncation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruncatedContext {
    /// Re-decoded text of the kept tokens
    pub text: String,

    /// Number of tokens kept (never above the budget)
    pub token_count: usize,

    /// Whether anything was dropped
    pub truncated: bool,
}

pub struct ContextTruncator {
    tokenizer: Arc<dyn ContextTokenizer>,
    config:    TruncationConfig,
}

impl ContextTruncator {
    pub fn new(tokenizer: Arc<dyn ContextTokenizer>, config: TruncationConfig) -> Self {
        Self { tokenizer, config }
    }

    /// Keep the leading tokens of `context` up to the budget.
    pub fn truncate(&self, context: &str) -> Result<TruncatedContext, PipelineError> {
        let budget = self.config.max_input_tokens;

        let window = self
            .tokenizer
            .encode(context, budget)
            .map_err(PipelineError::tokenizer)?;
        let text = self
            .tokenizer
            .decode(&window.ids)
            .map_err(PipelineError::tokenizer)?;

        if window.truncated {
            tracing::info!("Context truncated to {} tokens (budget {})", window.ids.len(), budget);
        } else {
            tracing::debug!("Context fits budget: {} tokens", window.ids.len());
        }

        Ok(TruncatedContext {
            text,
            token_count: window.ids.len(),
            truncated:   window.truncated,
        })
    }

    /// The full generation prompt: prefix followed by the
    /// truncated passage.
    pub fn prompt(&self, context: &str) -> Result<(String, TruncatedContext), PipelineError> {
        let truncated = self.truncate(context)?;
        let prompt    = format!("{}{}", self.config.prompt_prefix, truncated.text);
        Ok((prompt, truncated))
    }
}
