pub const CONFIG_DIR_NAME: &str = "solaudit";
pub const CONFIG_FILE_NAME: &str = "config.toml";

pub const ANTHROPIC_API_KEY_ENV: &str = "ANTHROPIC_API_KEY";
pub const SLITHER_PATH_ENV: &str = "SLITHER_PATH";
pub const SOLC_PATH_ENV: &str = "SOLC_PATH";

pub const MAX_CONTRACT_BYTES: u64 = 2 * 1024 * 1024;

pub const SERVER_SHUTDOWN_GRACE_PERIOD_MS: u64 = 100;
