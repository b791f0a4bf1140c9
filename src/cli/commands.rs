// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the subcommands and their flags:
//
//   answer:    standalone Answer Extraction Service
//   ask:       answer a question about a document or passage
//   generate:  generate questions from a document or passage
//   session:   interactive front-end
//   config:    write / show the JSON configuration
//
// The application layer never sees clap types: the flags that
// override configuration are folded into AppConfig here.
//
// Reference: Rust Book §12 (Building a CLI Program)

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use std::{fs, path::PathBuf};

use crate::data::extractor::load_upload;
use crate::domain::error::PipelineError;
use crate::domain::traits::TextExtractor;
use crate::infra::config::AppConfig;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Answer a question about a passage (standalone answer service)
    Answer(AnswerArgs),

    /// Answer a question about an uploaded document or a typed passage
    Ask(AskArgs),

    /// Generate candidate questions from a document or a passage
    Generate(GenerateArgs),

    /// Interactive session: upload/enter a passage, ask, generate
    Session(SessionArgs),

    /// Manage the JSON configuration file
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Where the context comes from: exactly one of the two.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct ContextSource {
    /// Document to extract the context from (.pdf, .docx, .txt)
    #[arg(long)]
    pub document: Option<PathBuf>,

    /// Passage text to use as the context
    #[arg(long)]
    pub passage: Option<String>,
}

impl ContextSource {
    /// The context string, extracting it from the document if one
    /// was given.
    pub fn resolve(&self, extractor: &impl TextExtractor) -> Result<String, PipelineError> {
        match (&self.document, &self.passage) {
            (Some(path), _)    => extractor.extract_text(&load_upload(path)?),
            (None, Some(text)) => Ok(text.clone()),
            (None, None)       => Ok(String::new()),
        }
    }
}

/// Context for the standalone answer service: inline or a file.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct ServiceContext {
    /// Context passage
    #[arg(long)]
    pub context: Option<String>,

    /// Read the context passage from a UTF-8 text file
    #[arg(long)]
    pub context_file: Option<PathBuf>,
}

impl ServiceContext {
    pub fn read(&self) -> Result<String> {
        match (&self.context, &self.context_file) {
            (Some(text), _)    => Ok(text.clone()),
            (None, Some(path)) => fs::read_to_string(path)
                .with_context(|| format!("Cannot read context from '{}'", path.display())),
            (None, None)       => Ok(String::new()),
        }
    }
}

#[derive(Args, Debug)]
pub struct AnswerArgs {
    /// The natural language question to answer
    #[arg(long)]
    pub question: String,

    #[command(flatten)]
    pub context: ServiceContext,

    /// QA model id (defaults to the configured service model)
    #[arg(long)]
    pub model: Option<String>,

    /// Also print the confidence score and character span
    #[arg(long, short)]
    pub verbose: bool,
}

#[derive(Args, Debug)]
pub struct AskArgs {
    /// The natural language question to answer
    #[arg(long)]
    pub question: String,

    #[command(flatten)]
    pub source: ContextSource,

    /// Also print the confidence score and character span
    #[arg(long, short)]
    pub verbose: bool,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub source: ContextSource,

    #[command(flatten)]
    pub generation: GenerationArgs,
}

#[derive(Args, Debug)]
pub struct SessionArgs {
    #[command(flatten)]
    pub generation: GenerationArgs,

    /// Also print the confidence score and character span
    #[arg(long, short)]
    pub verbose: bool,
}

/// Overrides for the question-generation policy values.
/// Unset flags keep the configured (default) values.
#[derive(Args, Debug, Default)]
pub struct GenerationArgs {
    /// Beam width
    #[arg(long)]
    pub num_beams: Option<usize>,

    /// Maximum generated tokens per question
    #[arg(long)]
    pub max_length: Option<usize>,

    /// Number of questions to return
    #[arg(long)]
    pub num_return_sequences: Option<usize>,

    /// Token budget for the passage before generation
    #[arg(long)]
    pub max_input_tokens: Option<usize>,
}

impl GenerationArgs {
    pub fn apply(&self, cfg: &mut AppConfig) {
        if let Some(v) = self.num_beams {
            cfg.generation.num_beams = v;
        }
        if let Some(v) = self.max_length {
            cfg.generation.max_length = v;
        }
        if let Some(v) = self.num_return_sequences {
            cfg.generation.num_return_sequences = v;
        }
        if let Some(v) = self.max_input_tokens {
            cfg.truncation.max_input_tokens = v;
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Write the default configuration as JSON
    Init {
        #[arg(long, default_value = "passage-qa.json")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration
    Show,
}
