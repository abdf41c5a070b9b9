use serde::Deserialize;
use crate::structs::ai::anthropic::anthropic_content_block::AnthropicContentBlock;
use crate::structs::ai::anthropic::anthropic_usage::AnthropicUsage;

#[derive(Deserialize)]
pub struct AnthropicMessageResponse {
    pub id: Option<String>,
    pub model: Option<String>,
    pub content: Vec<AnthropicContentBlock>,
    pub stop_reason: Option<String>,
    pub usage: Option<AnthropicUsage>,
}

impl AnthropicMessageResponse {
    /// Text of the first text content block, the explanation proper.
    pub fn first_text(&self) -> Option<String> {
        self.content
            .iter()
            .find(|block| block.content_type == "text")
            .and_then(|block| block.text.clone())
    }
}
