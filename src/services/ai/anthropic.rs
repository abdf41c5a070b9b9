use async_trait::async_trait;
use reqwest::Client;
use crate::enums::ai_provider_error::AiProviderError;
use crate::structs::ai::anthropic::anthropic_message::AnthropicMessage;
use crate::structs::ai::anthropic::anthropic_message_request::AnthropicMessageRequest;
use crate::structs::ai::anthropic::anthropic_message_response::AnthropicMessageResponse;
use crate::structs::config::ai_config::AiConfig;
use crate::traits::ai_provider::AiProvider;

#[derive(Clone)]
pub struct AnthropicProvider {
    api_key: String,
    base_url: String,
    client: Client,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl AnthropicProvider {
    pub fn new(api_key: String, config: &AiConfig) -> Self {
        Self {
            api_key,
            base_url: "https://api.anthropic.com/v1".to_string(),
            client: Client::new(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }

    fn get_anthropic_messages(&self, user_prompts: Vec<String>) -> Vec<AnthropicMessage> {
        user_prompts
            .into_iter()
            .map(|msg| AnthropicMessage {
                role: String::from("user"),
                content: msg,
            })
            .collect()
    }

    fn get_request(
        &self,
        system_prompt: String,
        messages: Vec<AnthropicMessage>,
    ) -> AnthropicMessageRequest {
        AnthropicMessageRequest {
            model: self.model.clone(),
            system: system_prompt,
            max_tokens: self.max_tokens,
            temperature: Some(self.temperature),
            messages,
            stream: false,
        }
    }

    async fn make_request(
        &self,
        url: String,
        request_body: AnthropicMessageRequest,
    ) -> Result<reqwest::Response, AiProviderError> {
        log::debug!("📦 Request model: {}", request_body.model);

        self.client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| AiProviderError::NetworkError(e.to_string()))
    }
}

#[async_trait]
impl AiProvider for AnthropicProvider {
    async fn chat(
        &self,
        system_prompt: String,
        user_prompts: Vec<String>,
    ) -> Result<String, AiProviderError> {
        let url = format!("{}/messages", self.base_url);
        let anthropic_messages = self.get_anthropic_messages(user_prompts);
        let request_body = self.get_request(system_prompt, anthropic_messages);

        let response = self.make_request(url, request_body).await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            log::error!("❌ API Error Response: {}", error_text);

            return Err(match status.as_u16() {
                401 => AiProviderError::AuthenticationError(error_text),
                _ => AiProviderError::ApiError(format!("HTTP {}: {}", status, error_text)),
            });
        }

        let message: AnthropicMessageResponse = response
            .json()
            .await
            .map_err(|e| AiProviderError::SerializationError(e.to_string()))?;

        message
            .first_text()
            .ok_or_else(|| AiProviderError::ApiError("Response contained no text content".to_string()))
    }
}
