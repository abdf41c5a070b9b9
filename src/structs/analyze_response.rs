use serde::{Deserialize, Serialize};

/// Success body of `POST /analyze`.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub analysis: String,
}
