//! Ollama-compatible server client
//!
//! Talks directly to the Ollama HTTP API (`/api/tags`, `/api/pull`,
//! `/api/generate`).

mod client;

pub use client::OllamaClient;
