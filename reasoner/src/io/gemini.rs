//! Blocking HTTP client for the Gemini `generateContent` API.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::io::config::GeminiConfig;
use crate::io::credentials::ApiKey;
use crate::io::generator::{GenerationError, Generator};

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct Tool {
    code_execution: CodeExecution,
}

#[derive(Debug, Serialize)]
struct CodeExecution {}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

/// Only text parts are kept; executable code and execution results are
/// echoed by the model in its text anyway.
#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Gemini backend. One HTTP request per [`Generator::generate`] call.
#[derive(Debug)]
pub struct GeminiGenerator {
    http: Client,
    api_key: ApiKey,
    base_url: String,
    model: String,
    code_execution: bool,
}

impl GeminiGenerator {
    pub fn new(api_key: ApiKey, config: &GeminiConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("build http client")?;
        Ok(Self {
            http,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            code_execution: config.code_execution,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    fn request_body<'a>(&self, prompt: &'a str) -> GenerateRequest<'a> {
        let tools = if self.code_execution {
            vec![Tool {
                code_execution: CodeExecution {},
            }]
        } else {
            Vec::new()
        };
        GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            tools,
        }
    }
}

impl Generator for GeminiGenerator {
    #[instrument(skip_all, fields(model = %self.model, prompt_bytes = prompt.len()))]
    fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", self.api_key.expose())
            .json(&self.request_body(prompt))
            .send()?;

        let status = response.status().as_u16();
        if status >= 400 {
            let body = response.text().unwrap_or_else(|_| "(no body)".into());
            warn!(status, "gemini request failed");
            return Err(GenerationError::Api {
                status,
                message: body,
            });
        }

        let body: GenerateResponse = response.json().map_err(|e| {
            GenerationError::InvalidResponse(format!("failed to parse response: {e}"))
        })?;
        extract_text(body)
    }
}

fn extract_text(response: GenerateResponse) -> Result<String, GenerationError> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| GenerationError::InvalidResponse("no candidates".to_string()))?;
    debug!(finish_reason = ?candidate.finish_reason, "gemini candidate received");

    let text: String = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();
    Ok(text)
}
