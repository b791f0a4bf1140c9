// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns that don't belong to any one use case:
//
//   config.rs:           AppConfig: model ids, endpoint, decoding
//                        parameters, truncation budget. Loaded
//                        from an optional JSON file, defaults
//                        reproduce the demo.
//
//   tokenizer_store.rs:  Loads the generation model's tokenizer
//                        (local tokenizer.json or hub id) and
//                        adapts it to the ContextTokenizer trait.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Application configuration file
pub mod config;

/// Tokenizer loading and truncation-aware encoding
pub mod tokenizer_store;
