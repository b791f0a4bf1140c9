// ============================================================
// Layer 5 — Hosted Extractive QA Model
// ============================================================
// Request:  { "inputs": { "question": …, "context": … } }
// Response: { "answer": …, "score": …, "start": …, "end": … }
//           or a list of those, best first
//
// Whatever the model returns is passed through: no retry, no
// fallback model, no post-processing of the span.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::answer::AnswerResult;
use crate::domain::traits::AnswerModel;
use crate::ml::hosted::{HostedInference, RequestOptions};

#[derive(Debug, Serialize)]
struct QaInputs<'a> {
    question: &'a str,
    context:  &'a str,
}

#[derive(Debug, Serialize)]
struct QaRequest<'a> {
    inputs:  QaInputs<'a>,
    options: RequestOptions,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum QaResponse {
    Single(AnswerResult),
    Ranked(Vec<AnswerResult>),
}

impl QaResponse {
    fn into_top(self) -> Result<AnswerResult> {
        match self {
            Self::Single(answer) => Ok(answer),
            Self::Ranked(answers) => answers
                .into_iter()
                .next()
                .ok_or_else(|| anyhow!("model returned no answer candidates")),
        }
    }
}

pub struct HostedAnswerModel {
    hosted: Arc<HostedInference>,
    model:  String,
}

impl HostedAnswerModel {
    pub fn new(hosted: Arc<HostedInference>, model: impl Into<String>) -> Self {
        Self { hosted, model: model.into() }
    }
}

impl AnswerModel for HostedAnswerModel {
    fn model_id(&self) -> &str {
        &self.model
    }

    fn answer(&self, question: &str, context: &str) -> Result<AnswerResult> {
        let request = QaRequest {
            inputs:  QaInputs { question, context },
            options: RequestOptions::default(),
        };

        let response: QaResponse = self.hosted.post(&self.model, &request)?;
        response.into_top()
    }
}
