//! Fallback reply-generation library.
//!
//! This crate turns a prompt into an assistant reply without a trained
//! neural model. A reply is produced by the first stage that has something
//! to say:
//! - Creator-identity answer
//! - Optional external generation service (Ollama-compatible)
//! - Code snippet templates
//! - Order-2 Markov generation over an offline-built artifact
//! - Nearest-sentence retrieval over a knowledge corpus
//! - Deterministic templates and a hashed fallback pool
//!
//! The entry point is [`engine::ReplyEngine`].

/// Reply orchestration (the fallback chain).
pub mod engine;

/// Engine configuration loaded from the environment.
pub mod config;

/// Error type shared by the fallible internals.
pub mod error;

/// Optional call to an external text-generation service.
pub mod external;

/// Keyword-driven intent classification.
pub mod intent;

/// Runtime artifacts: Markov model, knowledge corpus and their cache.
pub mod model;

/// Tokenization and language detection.
pub mod text;

/// Deterministic template replies and phrase banks.
pub mod template;

/// File helpers (snapshot paths, artifact decoding).
///
/// Not exposed
pub(crate) mod io;

pub use config::EngineConfig;
pub use engine::ReplyEngine;
pub use error::{ReplyError, Result};
pub use text::Lang;
