// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers to serve the two user actions.
//
// Rules for this layer:
//   - No HTTP or tokenizer code here (that's Layers 5 and 6)
//   - No printing here (that's Layer 1)
//   - Validation of user input happens HERE, before any model
//     is loaded or invoked
//
//   answer_use_case.rs:    Answering Service
//   generate_use_case.rs:  Question-Generation Service
//   session.rs:            front-end state: input mode, context,
//                          question, and the two actions
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

/// Question answering over a context
pub mod answer_use_case;

/// Question generation from a context
pub mod generate_use_case;

/// Interactive front-end state
pub mod session;
