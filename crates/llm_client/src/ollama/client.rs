//! Ollama client implementation

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::config::OllamaConfig;
use crate::error::OllamaError;

/// Client for an Ollama-compatible inference server.
///
/// [`connect`](Self::connect) probes the server once and never fails;
/// a failed probe leaves the client in an unavailable state instead.
/// Requests against an unavailable client return
/// [`OllamaError::Unavailable`] without touching the network.
#[derive(Debug)]
pub struct OllamaClient {
    config: OllamaConfig,
    state: ClientState,
}

/// Connect-time outcome, fixed for the lifetime of the client
#[derive(Debug)]
enum ClientState {
    Ready { http: Client },
    Unavailable { reason: String },
}

/// Ollama models list response (`GET /api/tags`)
#[derive(Debug, Deserialize)]
struct ModelsResponse {
    models: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    name: String,
}

/// Ollama generation request (`POST /api/generate`)
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
}

/// Ollama generation response
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Ollama pull request (`POST /api/pull`)
#[derive(Debug, Serialize)]
struct PullRequest<'a> {
    name: &'a str,
    stream: bool,
}

impl OllamaClient {
    /// Connect to the configured server and probe the model catalog.
    ///
    /// Lists the available models, pulls the configured default model if
    /// none of the catalog entries matches it, and logs the resulting
    /// catalog. Any probe error (unreachable server, malformed list
    /// response, failed pull) degrades the client to the unavailable
    /// state and is reported through two warning lines; no error escapes
    /// construction.
    #[instrument(skip(config), fields(endpoint = %config.endpoint))]
    pub async fn connect(config: OllamaConfig) -> Self {
        let state = match probe(&config).await {
            Ok(http) => ClientState::Ready { http },
            Err(e) => {
                let reason = e.to_string();
                warn!(error = %reason, "Ollama not available");
                warn!(
                    endpoint = %config.endpoint,
                    "Ensure the Ollama server is running and accessible at the configured endpoint"
                );
                ClientState::Unavailable { reason }
            },
        };

        Self { config, state }
    }

    /// Send a deterministic generation request and return the generated
    /// text.
    ///
    /// The prompt is trimmed and decoding runs at temperature zero, so
    /// repeated calls with the same input select the same output. Server
    /// errors propagate untranslated; there is no retry.
    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len()))]
    pub async fn generate(&self, model: &str, prompt: &str) -> Result<String, OllamaError> {
        let http = self.ready()?;

        let request = GenerateRequest {
            model,
            prompt: prompt.trim(),
            stream: false,
            options: GenerateOptions { temperature: 0.0 },
        };

        debug!("Sending generate request");

        let response = http
            .post(api_url(&self.config.endpoint, "generate"))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Generate request failed");
            return Err(OllamaError::ServerError(format!("Status {status}: {body}")));
        }

        let generated: GenerateResponse = response
            .json()
            .await
            .map_err(|e| OllamaError::InvalidResponse(e.to_string()))?;

        Ok(generated.response)
    }

    /// List the models currently reported by the server.
    ///
    /// The catalog is fetched fresh on every call.
    #[instrument(skip(self))]
    pub async fn list_models(&self) -> Result<Vec<String>, OllamaError> {
        let http = self.ready()?;
        fetch_models(http, &self.config.endpoint).await
    }

    /// Whether the connect-time probe succeeded
    pub const fn is_available(&self) -> bool {
        matches!(self.state, ClientState::Ready { .. })
    }

    /// Why the client is unavailable, if it is
    pub fn unavailable_reason(&self) -> Option<&str> {
        match &self.state {
            ClientState::Ready { .. } => None,
            ClientState::Unavailable { reason } => Some(reason),
        }
    }

    /// Configured server endpoint
    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    /// Model pulled at connect time when missing from the catalog
    pub fn default_model(&self) -> &str {
        &self.config.default_model
    }

    fn ready(&self) -> Result<&Client, OllamaError> {
        match &self.state {
            ClientState::Ready { http } => Ok(http),
            ClientState::Unavailable { reason } => Err(OllamaError::Unavailable(reason.clone())),
        }
    }
}

/// Run the connect-time probe: list models, pull the default model when
/// it is missing, and log the catalog.
async fn probe(config: &OllamaConfig) -> Result<Client, OllamaError> {
    let http = Client::builder()
        .timeout(Duration::from_millis(config.timeout_ms))
        .build()
        .map_err(|e| OllamaError::ConnectionFailed(e.to_string()))?;

    let mut models = fetch_models(&http, &config.endpoint).await?;

    if !models.iter().any(|name| name.starts_with(&config.default_model)) {
        info!(model = %config.default_model, "Pulling default model");
        pull_model(&http, &config.endpoint, &config.default_model).await?;
        // A failed re-list keeps the pre-pull catalog.
        if let Ok(refreshed) = fetch_models(&http, &config.endpoint).await {
            models = refreshed;
        }
    }

    let names = models
        .iter()
        .map(|name| short_name(name))
        .collect::<Vec<_>>()
        .join(", ");
    info!(models = %names, "Ollama available");

    Ok(http)
}

async fn fetch_models(http: &Client, endpoint: &str) -> Result<Vec<String>, OllamaError> {
    let response = http.get(api_url(endpoint, "tags")).send().await?;

    if !response.status().is_success() {
        return Err(OllamaError::ServerError(response.status().to_string()));
    }

    let catalog: ModelsResponse = response
        .json()
        .await
        .map_err(|e| OllamaError::InvalidResponse(e.to_string()))?;

    Ok(catalog.models.into_iter().map(|m| m.name).collect())
}

async fn pull_model(http: &Client, endpoint: &str, name: &str) -> Result<(), OllamaError> {
    let response = http
        .post(api_url(endpoint, "pull"))
        .json(&PullRequest { name, stream: false })
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(OllamaError::ServerError(format!("Status {status}: {body}")));
    }

    Ok(())
}

/// Build the API URL for a given path
fn api_url(endpoint: &str, path: &str) -> String {
    format!("{}/api/{path}", endpoint.trim_end_matches('/'))
}

/// Truncate a model name to its first two colon-separated components,
/// e.g. `deepseek-r1:7b:extra` becomes `deepseek-r1:7b`.
fn short_name(name: &str) -> &str {
    match name.match_indices(':').nth(1) {
        Some((idx, _)) => &name[..idx],
        None => name,
    }
}
