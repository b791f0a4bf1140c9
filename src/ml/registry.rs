// ============================================================
// Layer 5 — Model Registry (lazy, process-wide)
// ============================================================
// Holds the loaded models for the lifetime of the process.
//
// Nothing is loaded when the registry is built. Each model is
// created the first time a request needs it and the same shared
// handle is returned on every later call:
//
//   first  answer_model()  → build HTTP client → build QA model
//   second answer_model()  → cached Arc, no work
//
// LazyModel guards initialisation with a mutex so a model is
// never built twice, and does NOT cache failures: if loading
// the tokenizer fails (e.g. offline), the next request tries
// again.
//
// Handles are read-only after initialisation. Whether the
// underlying model runtime tolerates concurrent calls is the
// runtime's business; this registry only shares the handles.
//
// Reference: std::sync::OnceLock, Rust Book §16 (Shared State)

use std::sync::{Arc, Mutex, OnceLock};

use anyhow::{anyhow, Result};

use crate::domain::error::PipelineError;
use crate::domain::traits::{AnswerModel, ContextTokenizer, ModelSource, QuestionGenerator};
use crate::infra::config::AppConfig;
use crate::infra::tokenizer_store::{HfTokenizer, TokenizerStore};
use crate::ml::answerer::HostedAnswerModel;
use crate::ml::generator::HostedQuestionGenerator;
use crate::ml::hosted::HostedInference;

/// A value built on first use and shared afterwards.
pub struct LazyModel<T: ?Sized> {
    cell: OnceLock<Arc<T>>,
    init: Mutex<()>,
}

impl<T: ?Sized> Default for LazyModel<T> {
    fn default() -> Self {
        Self {
            cell: OnceLock::new(),
            init: Mutex::new(()),
        }
    }
}

impl<T: ?Sized> LazyModel<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value, running `load` first if there is none.
    pub fn get_or_load<F>(&self, load: F) -> Result<Arc<T>>
    where
        F: FnOnce() -> Result<Arc<T>>,
    {
        if let Some(value) = self.cell.get() {
            return Ok(value.clone());
        }

        let _guard = self
            .init
            .lock()
            .map_err(|_| anyhow!("model initialisation lock poisoned"))?;

        // Another caller may have finished loading while we waited
        if let Some(value) = self.cell.get() {
            return Ok(value.clone());
        }

        let value = load()?;
        let _ = self.cell.set(value.clone());
        Ok(value)
    }
}

pub struct ModelRegistry {
    config:       AppConfig,
    answer_model: String,
    hosted:       LazyModel<HostedInference>,
    answerer:     LazyModel<dyn AnswerModel>,
    generator:    LazyModel<dyn QuestionGenerator>,
    tokenizer:    LazyModel<dyn ContextTokenizer>,
}

impl ModelRegistry {
    /// A registry that answers with the front-end QA model.
    pub fn new(config: AppConfig) -> Self {
        let answer_model = config.models.answer_model.clone();
        Self {
            config,
            answer_model,
            hosted:    LazyModel::new(),
            answerer:  LazyModel::new(),
            generator: LazyModel::new(),
            tokenizer: LazyModel::new(),
        }
    }

    /// Answer with a different QA model id (the standalone service).
    pub fn with_answer_model(mut self, model: impl Into<String>) -> Self {
        self.answer_model = model.into();
        self
    }

    fn hosted(&self) -> Result<Arc<HostedInference>, PipelineError> {
        self.hosted
            .get_or_load(|| Ok(Arc::new(HostedInference::new(&self.config.endpoint)?)))
            .map_err(|e| PipelineError::model_load("inference client", e))
    }
}

impl ModelSource for ModelRegistry {
    fn answer_model(&self) -> Result<Arc<dyn AnswerModel>, PipelineError> {
        let hosted = self.hosted()?;
        self.answerer
            .get_or_load(|| {
                tracing::info!("Loading question-answering model '{}'", self.answer_model);
                let model: Arc<dyn AnswerModel> =
                    Arc::new(HostedAnswerModel::new(hosted, self.answer_model.clone()));
                Ok(model)
            })
            .map_err(|e| PipelineError::model_load(&self.answer_model, e))
    }

    fn question_generator(&self) -> Result<Arc<dyn QuestionGenerator>, PipelineError> {
        let hosted = self.hosted()?;
        let model  = &self.config.models.question_model;
        self.generator
            .get_or_load(|| {
                tracing::info!("Loading question-generation model '{}'", model);
                let generator: Arc<dyn QuestionGenerator> =
                    Arc::new(HostedQuestionGenerator::new(hosted, model.clone()));
                Ok(generator)
            })
            .map_err(|e| PipelineError::model_load(model, e))
    }

    fn tokenizer(&self) -> Result<Arc<dyn ContextTokenizer>, PipelineError> {
        let source = &self.config.models.tokenizer;
        self.tokenizer
            .get_or_load(|| {
                let loaded = TokenizerStore::new(source.clone()).load()?;
                let budget = self.config.truncation.max_input_tokens;
                let tokenizer: Arc<dyn ContextTokenizer> = Arc::new(HfTokenizer::new(loaded, budget)?);
                Ok(tokenizer)
            })
            .map_err(|e| PipelineError::model_load(&format!("tokenizer '{source}'"), e))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
impl<T: ?Sized> LazyModel<T> {
    fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}
