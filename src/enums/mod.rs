pub mod ai_provider_error;
pub mod commands;
pub mod contract_source;
pub mod impact;
pub mod scan_outcome;
