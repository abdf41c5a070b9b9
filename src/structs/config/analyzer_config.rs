use std::path::PathBuf;
use serde::{Deserialize, Serialize};
use crate::helpers::config_helper::ConfigHelper;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AnalyzerConfig {
    /// Slither executable; a bare name resolves through PATH.
    #[serde(default = "ConfigHelper::default_slither_path")]
    pub slither_path: String,

    /// Solidity compiler handed to the analyzer via `--solc`.
    #[serde(default = "ConfigHelper::default_solc_path")]
    pub solc_path: String,

    /// Directory for per-request contract copies and analyzer reports.
    #[serde(default = "ConfigHelper::default_temp_dir")]
    pub temp_dir: PathBuf,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            slither_path: ConfigHelper::default_slither_path(),
            solc_path: ConfigHelper::default_solc_path(),
            temp_dir: ConfigHelper::default_temp_dir(),
        }
    }
}
