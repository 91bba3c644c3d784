use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::RETRY_AFTER, Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::error::{GenerationError, Result};
use crate::prompt::GenerationPayload;

pub const DEMO_KEY: &str = "DEMO_KEY";

/// One network exchange with the generative model per call.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Returns the model's raw output text, still unvalidated.
    async fn generate(&self, payload: &GenerationPayload) -> Result<String>;
}

pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            api_key: config.api_key.clone(),
            base_url: config.api_base.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            timeout: config.request_timeout,
        }
    }

    pub fn is_demo(&self) -> bool {
        self.api_key == DEMO_KEY
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent?key={}", self.base_url, self.model, self.api_key)
    }

    async fn perform_api_call(&self, payload: &GenerationPayload) -> Result<String> {
        let url = self.endpoint();
        info!("🔗 Making request to: {}", url.replace(&self.api_key, "***"));

        let request_body = json!({
            "contents": [{
                "role": "user",
                "parts": [{"text": payload.instruction}]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": payload.response_schema,
                "candidateCount": 1
            }
        });
        debug!("📤 Request body: {}", request_body);

        let response = self
            .client
            .post(&url)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| classify_send_error(&e))?;

        let status = response.status();
        info!("📥 Response status: {}", status);

        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_secs);

        let response_text = response
            .text()
            .await
            .map_err(|e| classify_send_error(&e))?;

        if !status.is_success() {
            error!("❌ Gemini API error response: {}", response_text);
            return Err(classify_status(status, retry_after, &response_text));
        }

        debug!("📥 Raw Gemini API response: {}", response_text);
        extract_candidate_text(&response_text)
    }

    /// Canned, schema-conforming body so the app works without credentials.
    fn demo_body(payload: &GenerationPayload) -> String {
        let product = &payload.product_name;
        let mut tags = vec![product.to_lowercase(), "tiendanube".to_string(), "envío a todo el país".to_string()];
        tags.extend(
            payload
                .keywords
                .split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_lowercase),
        );
        json!({
            "title": format!("{product} | Calidad y estilo para tu día a día"),
            "longDescription": format!(
                "Descubrí {product}, pensado para quienes buscan practicidad sin resignar diseño.\n\n\
                Modo demo: configurá GEMINI_API_KEY para obtener descripciones generadas por IA."
            ),
            "shortDescription": format!("{product}: la opción ideal para tu tienda online."),
            "tags": tags,
        })
        .to_string()
    }
}

#[async_trait]
impl GenerationClient for GeminiClient {
    async fn generate(&self, payload: &GenerationPayload) -> Result<String> {
        if self.is_demo() {
            info!("Using demo mode - returning canned description");
            return Ok(Self::demo_body(payload));
        }

        info!("Generating description with Gemini API...");
        // Bounds the whole exchange, body read included.
        match tokio::time::timeout(self.timeout, self.perform_api_call(payload)).await {
            Ok(result) => result,
            Err(_) => {
                warn!("⏱️ Gemini request exceeded {:?}", self.timeout);
                Err(GenerationError::transport(format!("timed out after {:?}", self.timeout)))
            }
        }
    }
}

fn classify_send_error(e: &reqwest::Error) -> GenerationError {
    GenerationError::Transport { status: e.status().map(|s| s.as_u16()), message: e.to_string() }
}

fn classify_status(status: StatusCode, retry_after: Option<Duration>, body: &str) -> GenerationError {
    let envelope: Option<ErrorEnvelope> = serde_json::from_str(body).ok();
    let throttled = status == StatusCode::TOO_MANY_REQUESTS
        || envelope
            .as_ref()
            .is_some_and(|e| e.error.status.as_deref() == Some("RESOURCE_EXHAUSTED"));
    if throttled {
        return GenerationError::RateLimit { retry_after };
    }
    let message = envelope
        .and_then(|e| e.error.message)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
    GenerationError::Transport { status: Some(status.as_u16()), message }
}

fn extract_candidate_text(body: &str) -> Result<String> {
    let parsed: GeminiResponse = serde_json::from_str(body)
        .map_err(|e| GenerationError::MalformedResponse(format!("unreadable Gemini envelope: {e}")))?;

    if let Some(reason) = parsed.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(GenerationError::MalformedResponse(format!("prompt blocked: {reason}")));
    }

    let text: String = parsed
        .candidates
        .first()
        .map(|c| c.content.parts.iter().filter_map(|p| p.text.as_deref()).collect())
        .unwrap_or_default();

    if text.is_empty() {
        return Err(GenerationError::MalformedResponse("no text content in response".into()));
    }
    Ok(text)
}

// --- Response Parsing Helpers ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

#[derive(Debug, Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    status: Option<String>,
}
