// ============================================================
// Layer 5 — Hosted Question-Generation Model
// ============================================================
// Request:  { "inputs": "generate questions: …",
//             "parameters": { max_length, do_sample, top_k,
//                             num_beams, num_return_sequences } }
// Response: [ { "generated_text": … }, … ]  in beam order
//
// The prompt arrives already truncated and prefixed; this
// module only ships it and the decoding parameters.

use anyhow::Result;
use serde::Serialize;
use std::sync::Arc;

use crate::domain::answer::GeneratedText;
use crate::domain::generation::GenerationParams;
use crate::domain::traits::QuestionGenerator;
use crate::ml::hosted::{HostedInference, RequestOptions};

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    inputs:     &'a str,
    parameters: &'a GenerationParams,
    options:    RequestOptions,
}

pub struct HostedQuestionGenerator {
    hosted: Arc<HostedInference>,
    model:  String,
}

impl HostedQuestionGenerator {
    pub fn new(hosted: Arc<HostedInference>, model: impl Into<String>) -> Self {
        Self { hosted, model: model.into() }
    }
}

impl QuestionGenerator for HostedQuestionGenerator {
    fn model_id(&self) -> &str {
        &self.model
    }

    fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<Vec<GeneratedText>> {
        let request = GenerationRequest {
            inputs:     prompt,
            parameters: params,
            options:    RequestOptions::default(),
        };

        self.hosted.post(&self.model, &request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_carries_decoding_parameters() {
        let params  = GenerationParams::default();
        let request = GenerationRequest {
            inputs:     "generate questions: Paris is the capital of France.",
            parameters: &params,
            options:    RequestOptions::default(),
        };
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["inputs"], "generate questions: Paris is the capital of France.");
        assert_eq!(json["parameters"]["max_length"], 64);
        assert_eq!(json["parameters"]["do_sample"], false);
        assert_eq!(json["parameters"]["top_k"], 50);
        assert_eq!(json["parameters"]["num_beams"], 5);
        assert_eq!(json["parameters"]["num_return_sequences"], 5);
    }

    #[test]
    fn test_response_keeps_model_order() {
        let json = r#"[
            {"generated_text": "What is the capital of France?"},
            {"generated_text": "Which city is the capital of France?"}
        ]"#;
        let out: Vec<GeneratedText> = serde_json::from_str(json).unwrap();
        assert_eq!(out[0].generated_text, "What is the capital of France?");
        assert_eq!(out.len(), 2);
    }
}
