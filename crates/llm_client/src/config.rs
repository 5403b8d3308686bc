//! Configuration for the Ollama client

use serde::{Deserialize, Serialize};

/// Configuration for [`OllamaClient`](crate::OllamaClient)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Base URL of the Ollama server
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model pulled at connect time when absent from the server catalog
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "deepseek-r1:7b".to_string()
}

const fn default_timeout_ms() -> u64 {
    120_000 // pulls and cold model loads are slow
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            default_model: default_model(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl OllamaConfig {
    /// Create a config for a non-default endpoint
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }
}
