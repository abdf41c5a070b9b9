use serde::Serialize;

#[derive(Serialize)]
pub struct AnthropicMessage {
    pub role: String,
    pub content: String,
}
