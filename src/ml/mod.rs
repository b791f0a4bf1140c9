// ============================================================
// Layer 5 — Model Layer (hosted inference)
// ============================================================
// This layer contains ALL code that talks to the pre-trained
// models. No other layer imports reqwest.
//
// The models themselves are black boxes running behind a hosted
// inference endpoint; this crate never holds weights.
//
//   hosted.rs:     Blocking JSON-over-HTTP client shared by the
//                  models. No timeout, no retries.
//
//   answerer.rs:   Extractive QA model: (question, context) →
//                  top answer span
//
//   generator.rs:  Text-to-text model: prompt + beam-search
//                  parameters → ranked generated questions
//
//   registry.rs:   Builds each of the above on first use and
//                  shares it for the rest of the process
//
// Reference: Rust Book §16 (Shared-State Concurrency)
//            reqwest blocking client documentation

/// Blocking client for the hosted inference endpoint
pub mod hosted;

/// Hosted extractive question-answering model
pub mod answerer;

/// Hosted question-generation model
pub mod generator;

/// Lazy, process-wide model registry
pub mod registry;
