use std::path::PathBuf;

pub struct ConfigHelper;

impl ConfigHelper {
    pub fn default_slither_path() -> String {
        "slither".to_string()
    }

    pub fn default_solc_path() -> String {
        "solc".to_string()
    }

    pub fn default_temp_dir() -> PathBuf {
        std::env::temp_dir().join("solaudit")
    }

    pub fn default_provider() -> String {
        "anthropic".to_string()
    }

    pub fn default_model() -> String {
        "claude-3-5-sonnet-20241022".to_string()
    }

    pub fn default_max_tokens() -> u32 {
        8192
    }

    pub fn default_temperature() -> f32 {
        0.0
    }

    pub fn default_host() -> String {
        "0.0.0.0".to_string()
    }

    pub fn default_port() -> u16 {
        5001
    }

    pub fn default_allowed_origin() -> String {
        "http://localhost:3000".to_string()
    }
}
