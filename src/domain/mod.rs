// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs, enums, and traits that define what the
// pipeline works with:
//
//   uploaded document ─► context ─► answer / generated questions
//
// Rules for this layer:
//   - NO HTTP clients, tokenizer crates, or document parsers
//   - NO file I/O
//   - Only values, the error taxonomy, and the collaborator traits
//
// Every model, tokenizer, and parser is reached through a trait
// declared in traits.rs, so tests can swap in deterministic fakes.
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

/// An uploaded document and its format hint
pub mod document;

/// Answer results and generated question sets
pub mod answer;

/// Decoding parameters for question generation
pub mod generation;

/// Validation / extraction / model error taxonomy
pub mod error;

/// Collaborator abstractions implemented by the outer layers
pub mod traits;
