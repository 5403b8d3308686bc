//! LLM Client - Ollama model client adapter
//!
//! Wraps a local Ollama-compatible inference server behind a small,
//! availability-aware client: connect once, probe the model catalog,
//! pull the default model when it is missing, then issue deterministic
//! generation requests.

pub mod config;
pub mod error;
pub mod ollama;

pub use config::OllamaConfig;
pub use error::OllamaError;
pub use ollama::OllamaClient;
