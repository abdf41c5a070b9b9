pub mod anthropic_content_block;
pub mod anthropic_message;
pub mod anthropic_message_request;
pub mod anthropic_message_response;
pub mod anthropic_usage;
