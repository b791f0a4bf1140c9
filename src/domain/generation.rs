// ============================================================
// Layer 3 — Generation Parameters
// ============================================================
// Decoding settings handed to the question-generation model.
//
// The defaults are the behaviour users of the demo rely on:
//   - deterministic beam search (no sampling)
//   - 5 beams, 5 returned sequences
//   - at most 64 generated tokens per question
//
// `top_k` only matters when sampling is on; it is carried so the
// request the model sees is the same one it always saw.
//
// Reference: Rust Book §5 (Structs), serde derive

use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_LENGTH: usize = 64;
pub const DEFAULT_NUM_BEAMS: usize = 5;
pub const DEFAULT_NUM_RETURN_SEQUENCES: usize = 5;
pub const DEFAULT_TOP_K: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationParams {
    /// Upper bound on generated tokens per sequence
    pub max_length: usize,

    /// Random sampling instead of beam search
    pub do_sample: bool,

    /// Sampling pool size (inert while `do_sample` is false)
    pub top_k: usize,

    /// Beam width
    pub num_beams: usize,

    /// How many finished beams to return
    pub num_return_sequences: usize,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_length:           DEFAULT_MAX_LENGTH,
            do_sample:            false,
            top_k:                DEFAULT_TOP_K,
            num_beams:            DEFAULT_NUM_BEAMS,
            num_return_sequences: DEFAULT_NUM_RETURN_SEQUENCES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_deterministic_beam_search() {
        let p = GenerationParams::default();
        assert!(!p.do_sample);
        assert_eq!(p.num_beams, 5);
        assert_eq!(p.max_length, 64);
        assert_eq!(p.num_return_sequences, 5);
        assert_eq!(p.top_k, 50);
    }

    #[test]
    fn test_partial_json_keeps_remaining_defaults() {
        let p: GenerationParams = serde_json::from_str(r#"{"num_beams": 8}"#).unwrap();
        assert_eq!(p.num_beams, 8);
        assert_eq!(p.num_return_sequences, 5);
        assert!(!p.do_sample);
    }
}
