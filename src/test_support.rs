// ============================================================
// Test Support — Deterministic Fake Collaborators
// ============================================================
// Stand-ins for the tokenizer and the hosted models so that the
// services and the session can be tested without network access
// or model weights. Every fake counts its calls, which is how the
// tests prove that validation stops a request BEFORE a model is
// loaded or invoked.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, bail, Result};

use crate::domain::answer::{AnswerResult, GeneratedText};
use crate::domain::error::PipelineError;
use crate::domain::generation::GenerationParams;
use crate::domain::traits::{
    AnswerModel, ContextTokenizer, ModelSource, QuestionGenerator, TokenWindow,
};

/// "w0 w1 … w{n-1}": a passage of exactly `n` word tokens.
pub fn words(n: usize) -> String {
    (0..n).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ")
}

// ─── WordTokenizer ────────────────────────────────────────────────────────────
/// One token per whitespace-separated word, plus a trailing
/// end-of-sequence id that counts towards the limit (like T5).
pub struct WordTokenizer {
    vocab: Mutex<Vec<String>>,
    fail:  bool,
}

impl WordTokenizer {
    pub const EOS: &'static str = "</s>";
    const EOS_ID: u32 = 0;

    pub fn new() -> Self {
        Self {
            vocab: Mutex::new(vec![Self::EOS.to_string()]),
            fail:  false,
        }
    }

    pub fn failing() -> Self {
        Self { fail: true, ..Self::new() }
    }

    fn id_for(&self, word: &str) -> u32 {
        let mut vocab = self.vocab.lock().unwrap();
        match vocab.iter().position(|w| w == word) {
            Some(id) => id as u32,
            None => {
                vocab.push(word.to_string());
                (vocab.len() - 1) as u32
            }
        }
    }
}

impl ContextTokenizer for WordTokenizer {
    fn encode(&self, text: &str, max_tokens: usize) -> Result<TokenWindow> {
        if self.fail {
            bail!("tokenizer unavailable");
        }
        if max_tokens < 2 {
            bail!("Token budget {max_tokens} is too small: the budget must be at least 2");
        }
        let all: Vec<&str> = text.split_whitespace().collect();
        let keep           = all.len().min(max_tokens.saturating_sub(1));

        let mut ids: Vec<u32> = all[..keep].iter().map(|w| self.id_for(w)).collect();
        ids.push(Self::EOS_ID);

        Ok(TokenWindow { ids, truncated: keep < all.len() })
    }

    fn decode(&self, ids: &[u32]) -> Result<String> {
        let vocab = self.vocab.lock().unwrap();
        let words: Vec<&str> = ids
            .iter()
            .filter(|&&id| id != Self::EOS_ID)
            .map(|&id| vocab.get(id as usize).map(String::as_str).ok_or_else(|| anyhow!("unknown id {id}")))
            .collect::<Result<_>>()?;
        Ok(words.join(" "))
    }
}

// ─── FakeAnswerModel ──────────────────────────────────────────────────────────
/// Answers with the first capitalised context word that the
/// question does not already mention.
#[derive(Default)]
pub struct FakeAnswerModel {
    pub calls: AtomicUsize,
    pub fail:  bool,
}

impl AnswerModel for FakeAnswerModel {
    fn model_id(&self) -> &str {
        "fake-qa"
    }

    fn answer(&self, question: &str, context: &str) -> Result<AnswerResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            bail!("input exceeds maximum sequence length");
        }

        let q = question.to_lowercase();
        let mut offset = 0;
        for word in context.split(' ') {
            let clean = word.trim_matches(|c: char| !c.is_alphanumeric());
            let start = offset;
            offset += word.len() + 1;
            if clean.chars().next().is_some_and(char::is_uppercase) && !q.contains(&clean.to_lowercase()) {
                return Ok(AnswerResult {
                    answer: clean.to_string(),
                    score:  Some(0.9),
                    start:  Some(start),
                    end:    Some(start + clean.len()),
                });
            }
        }
        Ok(AnswerResult::text(""))
    }
}

// ─── FakeQuestionGenerator ────────────────────────────────────────────────────
/// Returns `num_return_sequences + extra` numbered questions and
/// remembers the last prompt it saw.
#[derive(Default)]
pub struct FakeQuestionGenerator {
    pub calls:       AtomicUsize,
    pub last_prompt: Mutex<Option<String>>,
    pub extra:       usize,
    pub fail:        bool,
}

impl QuestionGenerator for FakeQuestionGenerator {
    fn model_id(&self) -> &str {
        "fake-qg"
    }

    fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<Vec<GeneratedText>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        if self.fail {
            bail!("model is overloaded");
        }

        Ok((1..=params.num_return_sequences + self.extra)
            .map(|i| GeneratedText::new(format!("  Question number {i}?  ")))
            .collect())
    }
}

// ─── StubModels ───────────────────────────────────────────────────────────────
/// A ModelSource over the fakes that also counts loads.
pub struct StubModels {
    pub answerer:  Arc<FakeAnswerModel>,
    pub generator: Arc<FakeQuestionGenerator>,
    pub tokenizer: Arc<WordTokenizer>,
    pub loads:     AtomicUsize,
}

impl StubModels {
    pub fn new() -> Self {
        Self {
            answerer:  Arc::new(FakeAnswerModel::default()),
            generator: Arc::new(FakeQuestionGenerator::default()),
            tokenizer: Arc::new(WordTokenizer::new()),
            loads:     AtomicUsize::new(0),
        }
    }

    pub fn answer_calls(&self) -> usize {
        self.answerer.calls.load(Ordering::SeqCst)
    }

    pub fn generate_calls(&self) -> usize {
        self.generator.calls.load(Ordering::SeqCst)
    }

    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl ModelSource for StubModels {
    fn answer_model(&self) -> Result<Arc<dyn AnswerModel>, PipelineError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(self.answerer.clone())
    }

    fn question_generator(&self) -> Result<Arc<dyn QuestionGenerator>, PipelineError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(self.generator.clone())
    }

    fn tokenizer(&self) -> Result<Arc<dyn ContextTokenizer>, PipelineError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(self.tokenizer.clone())
    }
}
