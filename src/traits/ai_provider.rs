use async_trait::async_trait;
use crate::enums::ai_provider_error::AiProviderError;

#[async_trait]
pub trait AiProvider: Send + Sync {
    async fn chat(
        &self,
        system_prompt: String,
        user_prompts: Vec<String>,
    ) -> Result<String, AiProviderError>;
}
