use crate::domain::model::{CityExtraction, NO_CITY_SENTINEL};
use crate::domain::ports::{CityExtractor, ConfigProvider};
use crate::utils::error::{ChatbotError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const SYSTEM_PROMPT: &str = "You are a Property assistant named PropGPT. \
Respond to greeting messages with your name and appropriate greetings.\n\n\
You are an NER agent. Your task is to extract only the city name from the \
request query. If the query does not contain a city name, explicitly mention \
'City not found in the query'. Just give the name of the city. Give the \
correct response.";

const TEMPERATURE: f32 = 1.0;
const MAX_TOKENS: u32 = 1024;

/// Chat-completion client narrowing a hosted LLM down to city-name
/// extraction. Every failure is folded into [`CityExtraction::TransportError`]
/// so the pipeline never sees a hard error from this stage.
pub struct GroqClient {
    http: Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
}

#[derive(Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}

impl GroqClient {
    pub fn new(config: &impl ConfigProvider) -> Self {
        Self {
            http: Client::new(),
            base_url: config.llm_api_url().trim_end_matches('/').to_string(),
            api_key: config.llm_api_key().to_string(),
            model: config.llm_model().to_string(),
        }
    }

    async fn complete(&self, query: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: query,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        tracing::debug!(model = %self.model, "sending chat completion request");

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ChatbotError::LlmError {
                message: format!("chat completion returned status {}", response.status()),
            });
        }

        let completion: ChatResponse = response.json().await?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|text| text.trim().to_string())
            .ok_or_else(|| ChatbotError::LlmError {
                message: "completion contained no message content".to_string(),
            })
    }
}

#[async_trait]
impl CityExtractor for GroqClient {
    async fn extract_city(&self, query: &str) -> CityExtraction {
        match self.complete(query).await {
            Ok(text) if text.contains(NO_CITY_SENTINEL) => CityExtraction::NotFound(text),
            Ok(text) => CityExtraction::Found(text),
            Err(e) => {
                tracing::error!("chat completion failed: {}", e);
                CityExtraction::TransportError(format!("Error with language model API: {}", e))
            }
        }
    }
}
