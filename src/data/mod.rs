// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between the raw upload and the model prompt:
//
//   uploaded bytes (pdf / docx / txt)
//       │
//       ▼
//   extractor     → plain-text context, pages in order
//       │
//       ├──► preview      → normalised, cut text for display only
//       │
//       ▼
//   truncator     → leading tokens up to the budget,
//                   re-decoded and prefixed for the QG model
//
// Each module is responsible for exactly one step.
//
// Reference: Rust Book §13 (Iterators and Closures)

/// Document bytes → plain text
pub mod extractor;

/// Display preview of extracted text
pub mod preview;

/// Token-aware truncation of the generation prompt
pub mod truncator;
