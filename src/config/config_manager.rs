use std::fs;
use std::path::PathBuf;
use crate::config::constants::{
    ANTHROPIC_API_KEY_ENV, CONFIG_DIR_NAME, CONFIG_FILE_NAME, SLITHER_PATH_ENV, SOLC_PATH_ENV,
};
use crate::errors::{AuditError, AuditResult};
use crate::structs::config::config::Config;

pub struct ConfigManager;

impl ConfigManager {
    /// Load `~/solaudit/config.toml`, falling back to full defaults when the
    /// file is absent. Environment overrides are applied on top either way.
    pub fn load() -> AuditResult<Config> {
        let config_path = Self::config_file_path();

        let mut config = if config_path.exists() {
            log::info!("📋 Loading config from: {}", config_path.display());
            let content = fs::read_to_string(&config_path).map_err(|e| {
                AuditError::config_file_error(&config_path.display().to_string(), &e.to_string())
            })?;
            toml::from_str(&content).map_err(|e| {
                AuditError::config_file_error(&config_path.display().to_string(), e.message())
            })?
        } else {
            Config::default()
        };

        Self::apply_env_overrides(&mut config);
        Ok(config)
    }

    fn apply_env_overrides(config: &mut Config) {
        if let Ok(path) = std::env::var(SLITHER_PATH_ENV) {
            if !path.is_empty() {
                config.analyzer.slither_path = path;
            }
        }
        if let Ok(path) = std::env::var(SOLC_PATH_ENV) {
            if !path.is_empty() {
                config.analyzer.solc_path = path;
            }
        }
    }

    pub fn create_sample_config() -> AuditResult<PathBuf> {
        let sample_config = r#"# Solaudit Configuration

[analyzer]
# Slither executable; a bare name resolves through PATH.
# Overridden by the SLITHER_PATH environment variable.
slither_path = "slither"

# Solidity compiler passed to Slither via --solc.
# Overridden by the SOLC_PATH environment variable.
solc_path = "solc"

# Directory for per-request contract copies and analyzer reports.
# temp_dir = "/tmp/solaudit"

[ai]
provider = "anthropic"
model = "claude-3-5-sonnet-20241022"
max_tokens = 8192
temperature = 0.0

# The credential is read from this environment variable, never from this file.
api_key_env = "ANTHROPIC_API_KEY"

[server]
host = "0.0.0.0"
port = 5001

# The single origin allowed to call /analyze cross-origin.
allowed_origin = "http://localhost:3000"
"#;

        let config_dir = Self::config_dir_path();
        let config_path = Self::config_file_path();
        fs::create_dir_all(&config_dir).map_err(|e| {
            AuditError::file_error(&config_dir.display().to_string(), "create", &e.to_string())
        })?;
        fs::write(&config_path, sample_config).map_err(|e| {
            AuditError::file_error(&config_path.display().to_string(), "write", &e.to_string())
        })?;
        log::info!("✅ Created sample config at: {}", config_path.display());
        Ok(config_path)
    }

    pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if config.analyzer.slither_path.is_empty() {
            errors.push("analyzer.slither_path must not be empty".to_string());
        }
        if config.analyzer.slither_path.contains('/')
            && !PathBuf::from(&config.analyzer.slither_path).exists()
        {
            errors.push(format!(
                "Slither executable not found at: {}",
                config.analyzer.slither_path
            ));
        }

        if config.server.port == 0 {
            errors.push("server.port must not be 0".to_string());
        }
        if !config.server.allowed_origin.starts_with("http") {
            errors.push(format!(
                "server.allowed_origin does not look like an origin: {}",
                config.server.allowed_origin
            ));
        }

        let env_name = config
            .ai
            .api_key_env
            .clone()
            .unwrap_or_else(|| ANTHROPIC_API_KEY_ENV.to_string());
        if std::env::var(&env_name).is_err() {
            errors.push(format!("API credential variable {} is not set", env_name));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn config_dir_path() -> PathBuf {
        dirs::home_dir()
            .map(|d| d.join(CONFIG_DIR_NAME))
            .unwrap_or_default()
    }

    fn config_file_path() -> PathBuf {
        Self::config_dir_path().join(CONFIG_FILE_NAME)
    }
}
