// ============================================================
// Layer 6 — Tokenizer Store
// ============================================================
// Loads the question-generation model's tokenizer and adapts it
// to the ContextTokenizer trait used by the Context Truncator.
//
// The configured source is either:
//   - a local tokenizer.json file, or a directory containing one
//   - a Hugging Face hub model id, fetched with from_pretrained
//
// Truncation is configured on the tokenizer itself so that the
// special tokens it appends (T5 appends </s>) are counted inside
// the budget, exactly as the model will see them. A budget that
// cannot hold those tokens plus at least one word is rejected.
//
// Reference: huggingface/tokenizers Rust crate documentation

use anyhow::{anyhow, bail, Context, Result};
use std::path::{Path, PathBuf};
use tokenizers::{PostProcessor, Tokenizer, TruncationParams};

use crate::domain::traits::{ContextTokenizer, TokenWindow};

pub struct TokenizerStore {
    source: String,
}

impl TokenizerStore {
    pub fn new(source: impl Into<String>) -> Self {
        Self { source: source.into() }
    }

    /// A local tokenizer.json path for the source, if one exists
    fn local_file(&self) -> Option<PathBuf> {
        let path = Path::new(&self.source);
        let file = if path.is_dir() { path.join("tokenizer.json") } else { path.to_path_buf() };
        file.is_file().then_some(file)
    }

    /// Load from disk if the source names a local file, otherwise
    /// fetch it from the hub.
    pub fn load(&self) -> Result<Tokenizer> {
        match self.local_file() {
            Some(path) => {
                tracing::info!("Loading tokenizer from '{}'", path.display());
                Tokenizer::from_file(&path).map_err(|e| {
                    anyhow!("Cannot load tokenizer from '{}': {}", path.display(), e)
                })
            }
            None => {
                tracing::info!("Fetching tokenizer '{}' from the hub", self.source);
                Tokenizer::from_pretrained(&self.source, None)
                    .map_err(|e| anyhow!("Cannot fetch tokenizer '{}': {}", self.source, e))
            }
        }
    }
}

/// A `tokenizers::Tokenizer` pre-configured for one token budget.
pub struct HfTokenizer {
    inner:  Tokenizer,
    budget: usize,
}

impl HfTokenizer {
    pub fn new(mut inner: Tokenizer, budget: usize) -> Result<Self> {
        set_truncation(&mut inner, budget)?;
        Ok(Self { inner, budget })
    }
}

fn set_truncation(tokenizer: &mut Tokenizer, max_length: usize) -> Result<()> {
    let added = tokenizer
        .get_post_processor()
        .map_or(0, |p| p.added_tokens(false));
    if max_length <= added {
        bail!(
            "Token budget {max_length} is too small: the tokenizer adds {added} special token(s), \
             so the budget must be at least {}",
            added + 1
        );
    }

    tokenizer
        .with_truncation(Some(TruncationParams {
            max_length,
            ..TruncationParams::default()
        }))
        .map_err(|e| anyhow!("Cannot set truncation to {max_length} tokens: {e}"))?;
    Ok(())
}

impl ContextTokenizer for HfTokenizer {
    fn encode(&self, text: &str, max_tokens: usize) -> Result<TokenWindow> {
        let encoding = if max_tokens == self.budget {
            self.inner.encode(text, true)
        } else {
            // Only reached when a caller asks for a different budget
            // than the one this tokenizer was built for
            let mut resized = self.inner.clone();
            set_truncation(&mut resized, max_tokens)?;
            resized.encode(text, true)
        }
        .map_err(|e| anyhow!("Tokenisation failed: {e}"))?;

        Ok(TokenWindow {
            ids:       encoding.get_ids().to_vec(),
            truncated: !encoding.get_overflowing().is_empty(),
        })
    }

    fn decode(&self, ids: &[u32]) -> Result<String> {
        self.inner
            .decode(ids, true)
            .map_err(|e| anyhow!("{e}"))
            .context("Cannot decode truncated context")
    }
}
