use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use crate::config::config_manager::ConfigManager;
use crate::config::constants::ANTHROPIC_API_KEY_ENV;
use crate::enums::commands::Commands;
use crate::errors::{AuditError, AuditResult};
use crate::logger::report_logger::ReportLogger;
use crate::server::analyze_server::AnalyzeServer;
use crate::services::ai::anthropic::AnthropicProvider;
use crate::services::audit_service::AuditService;
use crate::services::slither_runner::SlitherRunner;
use crate::structs::config::config::Config;
use crate::traits::ai_provider::AiProvider;

pub struct CommandRunner {
    start_time: Option<Instant>,
}

impl CommandRunner {
    pub fn new() -> Self {
        Self { start_time: None }
    }

    pub async fn run_command(&mut self, command: Commands) -> AuditResult<()> {
        self.start_time = Some(Instant::now());

        let result = match command {
            Commands::Init => self.init_command().await,
            Commands::Audit { contract } => self.audit_command(&contract).await,
            Commands::Serve { port } => self.serve_command(port).await,
            Commands::Validate => self.validate_command().await,
        };

        if let Some(start) = self.start_time {
            let duration = start.elapsed();
            log::info!("⏱️  Command completed in {:.2}s", duration.as_secs_f64());
        }

        result
    }

    async fn init_command(&self) -> AuditResult<()> {
        log::info!("🚀 Initializing solaudit configuration...");

        match ConfigManager::create_sample_config() {
            Ok(_) => {
                log::info!("✅ Configuration file created successfully!");
                log::info!("📝 Edit the configuration file to match your toolchain.");
                log::info!("🔧 Run 'solaudit validate' to check your configuration.");
            }
            Err(e) => {
                log::error!("❌ Failed to create configuration: {}", e);
                return Err(e);
            }
        }

        Ok(())
    }

    async fn audit_command(&self, contract: &str) -> AuditResult<()> {
        log::info!("🔍 Running Solidity security scan...");

        let contract_path = Path::new(contract);
        if !contract_path.exists() {
            return Err(AuditError::invalid_request(&format!(
                "Contract file not found: {}",
                contract
            )));
        }

        let config = ConfigManager::load()?;
        let service = Self::build_audit_service(&config)?;

        let report = service.audit_contract(contract_path).await?;

        ReportLogger::print_security_report(&report.outcome);
        ReportLogger::print_explanation(&report.explanation);

        Ok(())
    }

    async fn serve_command(&self, port: Option<u16>) -> AuditResult<()> {
        let mut config = ConfigManager::load()?;
        if let Some(port) = port {
            config.server.port = port;
        }

        let service = Arc::new(Self::build_audit_service(&config)?);
        let mut server = AnalyzeServer::new(service, config.server.clone());

        let addr = server.start().await?;
        log::info!("🚀 Analysis endpoint available at: http://{}/analyze", addr);
        log::info!("⏹️ Press Ctrl+C to stop the server");

        tokio::signal::ctrl_c()
            .await
            .map_err(|e| AuditError::system_error("signal", &e.to_string()))?;

        server.shutdown().await
    }

    async fn validate_command(&self) -> AuditResult<()> {
        log::info!("🔍 Validating solaudit configuration...");

        let config = match ConfigManager::load() {
            Ok(config) => {
                log::info!("✅ Configuration loaded successfully");
                config
            }
            Err(e) => {
                log::error!("❌ Failed to load configuration: {}", e);
                log::error!("💡 Run 'solaudit init' to create a configuration file.");
                return Err(e);
            }
        };

        if let Err(issues) = ConfigManager::validate_config(&config) {
            log::error!("❌ Issues found:");
            for issue in &issues {
                log::error!("   - {}", issue);
            }
            return Err(AuditError::config_error(
                &issues.join("; "),
                None,
                Some("Fix the configuration file or environment and re-run 'solaudit validate'"),
            ));
        }

        log::info!("✅ Configuration is valid");
        log::info!("   🔧 Slither: {}", config.analyzer.slither_path);
        log::info!("   🔧 Solc: {}", config.analyzer.solc_path);
        log::info!("   🤖 Model: {}", config.ai.model);
        log::info!("   🌐 Server: {}:{}", config.server.host, config.server.port);

        Ok(())
    }

    fn build_audit_service(config: &Config) -> AuditResult<AuditService> {
        let env_name = config
            .ai
            .api_key_env
            .clone()
            .unwrap_or_else(|| ANTHROPIC_API_KEY_ENV.to_string());

        let api_key = std::env::var(&env_name).map_err(|_| {
            AuditError::config_error(
                &format!("API credential variable {} is not set", env_name),
                Some("ai.api_key_env"),
                Some("export the variable with your completion API key"),
            )
        })?;

        let ai_provider: Arc<dyn AiProvider> = Arc::new(AnthropicProvider::new(api_key, &config.ai));
        let runner = SlitherRunner::new(config.analyzer.clone());

        Ok(AuditService::new(runner, ai_provider))
    }
}
