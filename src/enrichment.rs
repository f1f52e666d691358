use crate::types::{AggregatorError, EnrichmentResult, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://api.deepseek.com";
const DEFAULT_MODEL: &str = "deepseek-chat";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
const EXCERPT_MAX_LEN: usize = 300;

/// Returns true if the text contains CJK ideographs — the "already in the
/// target language" heuristic. No external language detection.
pub fn is_cjk(text: &str) -> bool {
    text.chars().any(|c| ('\u{4e00}'..='\u{9fff}').contains(&c))
}

/// Optional translate + classify capability. The pipeline must run
/// correctly with every implementation failing, and with none configured.
#[async_trait]
pub trait Enricher: Send + Sync {
    /// Translate the title and a body excerpt into Chinese and suggest a
    /// category label for the story.
    async fn enrich(&self, title: &str, body: &str) -> Result<EnrichmentResult>;

    /// Free-form completion returning a JSON object; used by the daily
    /// brief generator.
    async fn complete_json(&self, _system: &str, _user: &str) -> Result<serde_json::Value> {
        Err(AggregatorError::Enrichment(
            "completion not supported by this enricher".to_string(),
        ))
    }
}

/// Enrichment is configured through two externally-supplied values, both
/// absent by default. No credential means the capability is disabled.
#[derive(Debug, Clone, Default)]
pub struct EnrichmentCapability {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

impl EnrichmentCapability {
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("LLM_API_KEY").ok().filter(|k| !k.is_empty()),
            base_url: std::env::var("LLM_BASE_URL").ok().filter(|u| !u.is_empty()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    /// Resolve the capability once per service, not per item.
    pub fn resolve(&self) -> Option<Arc<dyn Enricher>> {
        let api_key = self.api_key.clone()?;
        let base_url = self
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        match LlmEnricher::new(api_key, base_url) {
            Ok(enricher) => Some(Arc::new(enricher)),
            Err(e) => {
                warn!("Failed to build enrichment client, running without: {}", e);
                None
            }
        }
    }
}

/// Enrichment over an OpenAI-compatible chat completion endpoint.
pub struct LlmEnricher {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct EnrichedPayload {
    title: Option<String>,
    summary: Option<String>,
    category: Option<String>,
}

const ENRICH_SYSTEM_PROMPT: &str = "You are a professional translator and tech news editor. \
Translate the given news title and summary into concise Chinese (keep them unchanged if they \
are already Chinese), and pick exactly one category for the story from this list: \
LLM, Computer Vision, Industry, Research, Tools. \
Respond with pure JSON (no markdown code fences) of the form \
{\"title\": \"...\", \"summary\": \"...\", \"category\": \"...\"}. Do not add any explanations.";

impl LlmEnricher {
    pub fn new(api_key: String, base_url: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: DEFAULT_MODEL.to_string(),
        })
    }

    async fn chat(&self, system: &str, user: String, temperature: f32) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature,
            response_format: ResponseFormat { kind: "json_object" },
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AggregatorError::Enrichment(format!(
                "completion endpoint returned HTTP {}",
                status
            )));
        }

        let body: ChatResponse = response.json().await?;
        body.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|content| !content.is_empty())
            .ok_or_else(|| AggregatorError::Enrichment("empty completion response".to_string()))
    }
}

#[async_trait]
impl Enricher for LlmEnricher {
    async fn enrich(&self, title: &str, body: &str) -> Result<EnrichmentResult> {
        // Cost control: only a bounded prefix of the body goes to the model.
        let excerpt: String = body.chars().take(EXCERPT_MAX_LEN).collect();

        // Already in the target language: no call, no category suggestion.
        // The caller classifies the text by rule.
        if is_cjk(title) && (excerpt.is_empty() || is_cjk(&excerpt)) {
            debug!("Skipping enrichment for CJK item: {}", title);
            return Ok(EnrichmentResult {
                title: title.to_string(),
                summary: excerpt,
                category_label: String::new(),
            });
        }

        let user = format!("Title: {}\n\nSummary: {}", title, excerpt);
        let content = self.chat(ENRICH_SYSTEM_PROMPT, user, 0.3).await?;

        let payload: EnrichedPayload = serde_json::from_str(&content)
            .map_err(|e| AggregatorError::Enrichment(format!("malformed completion: {}", e)))?;

        Ok(EnrichmentResult {
            title: payload.title.unwrap_or_else(|| title.to_string()),
            summary: payload.summary.unwrap_or(excerpt),
            category_label: payload.category.unwrap_or_default(),
        })
    }

    async fn complete_json(&self, system: &str, user: &str) -> Result<serde_json::Value> {
        let content = self.chat(system, user.to_string(), 0.5).await?;
        serde_json::from_str(&content)
            .map_err(|e| AggregatorError::Enrichment(format!("malformed completion: {}", e)))
    }
}
