// ============================================================
// Layer 6 — Application Configuration
// ============================================================
// Everything the pipeline treats as a policy value lives here:
// which hosted models to call, where the inference endpoint is,
// the decoding parameters, and the truncation budget.
//
// The defaults reproduce the behaviour of the demo exactly, so
// running without a config file is the normal case. A JSON file
// only needs the fields it changes: every struct is
// #[serde(default)] and fills the rest in.
//
// The API token is never written to or read from the file. It
// arrives through --api-token or the HF_API_TOKEN variable.
//
// Reference: serde documentation (field attributes)
//            Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::data::truncator::TruncationConfig;
use crate::domain::generation::GenerationParams;

pub const DEFAULT_ENDPOINT: &str = "https://router.huggingface.co/hf-inference/models";
pub const DEFAULT_PREVIEW_CHARS: usize = 3000;

/// Hosted model ids (or, for the tokenizer, a local path).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Extractive QA model used by the front-end
    pub answer_model: String,

    /// Extractive QA model used by the standalone `answer` command
    pub service_answer_model: String,

    /// Text-to-text model prompted with "generate questions: …"
    pub question_model: String,

    /// Tokenizer matching `question_model`: hub id or local path
    pub tokenizer: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            answer_model:         "deepset/roberta-base-squad2".to_string(),
            service_answer_model: "bert-large-uncased-whole-word-masking-finetuned-squad".to_string(),
            question_model:       "valhalla/t5-base-qg-hl".to_string(),
            tokenizer:            "t5-base".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Model ids are appended to this as `{base_url}/{model}`
    pub base_url: String,

    #[serde(skip)]
    pub api_token: Option<String>,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url:  DEFAULT_ENDPOINT.to_string(),
            api_token: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub models:        ModelConfig,
    pub endpoint:      EndpointConfig,
    pub generation:    GenerationParams,
    pub truncation:    TruncationConfig,

    /// Characters of extracted text shown after an upload
    pub preview_chars: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            models:        ModelConfig::default(),
            endpoint:      EndpointConfig::default(),
            generation:    GenerationParams::default(),
            truncation:    TruncationConfig::default(),
            preview_chars: DEFAULT_PREVIEW_CHARS,
        }
    }
}

impl AppConfig {
    /// Read a JSON config file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Cannot read config from '{}'", path.display()))?;

        let cfg: Self = serde_json::from_str(&json)
            .with_context(|| format!("Invalid config in '{}'", path.display()))?;

        tracing::debug!("Loaded config from '{}'", path.display());
        Ok(cfg)
    }

    /// Defaults, or the file's values if a path was given.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None    => Ok(Self::default()),
        }
    }

    /// Write the config as pretty JSON (the API token is skipped).
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;

        fs::write(path, json)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;

        tracing::info!("Wrote config to '{}'", path.display());
        Ok(())
    }
}
