use std::fs;
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;
use crate::constants::prompts::{NO_FINDINGS_MESSAGE, SYSTEM_PROMPT};
use crate::enums::contract_source::ContractSource;
use crate::enums::scan_outcome::ScanOutcome;
use crate::errors::{AuditError, AuditResult};
use crate::helpers::prompt_generator;
use crate::services::slither_runner::SlitherRunner;
use crate::structs::audit_report::AuditReport;
use crate::traits::ai_provider::AiProvider;

/// The full pipeline shared by the CLI and the HTTP endpoint: run the
/// analyzer, then turn its findings into an explanation.
pub struct AuditService {
    runner: SlitherRunner,
    ai_provider: Arc<dyn AiProvider>,
}

impl AuditService {
    pub fn new(runner: SlitherRunner, ai_provider: Arc<dyn AiProvider>) -> Self {
        Self { runner, ai_provider }
    }

    pub async fn audit_contract(&self, contract_path: &Path) -> AuditResult<AuditReport> {
        let outcome = self.runner.scan(contract_path)?;
        let explanation = self.explain(&outcome).await?;
        Ok(AuditReport { outcome, explanation })
    }

    /// Audit a contract that arrived over HTTP: write it to a per-request
    /// temp path, audit it, and delete the copy whatever the result was.
    pub async fn audit_source(&self, source: ContractSource) -> AuditResult<AuditReport> {
        let temp_dir = self.runner.temp_dir().to_path_buf();
        fs::create_dir_all(&temp_dir)?;

        let contract_path = temp_dir.join(format!("contract-{}.{}", Uuid::new_v4(), source.extension()));
        fs::write(&contract_path, source.contents()).map_err(|e| {
            AuditError::file_error(&contract_path.display().to_string(), "write", &e.to_string())
        })?;

        let result = self.audit_contract(&contract_path).await;

        if let Err(e) = fs::remove_file(&contract_path) {
            log::warn!("⚠️ Failed to remove temp contract {}: {}", contract_path.display(), e);
        }

        result
    }

    /// Turn a scan outcome into explanation text. A clean scan short-circuits
    /// and never reaches the completion API.
    pub async fn explain(&self, outcome: &ScanOutcome) -> AuditResult<String> {
        let findings = outcome.findings();
        if findings.is_empty() {
            return Ok(NO_FINDINGS_MESSAGE.to_string());
        }

        let prompt = prompt_generator::generate_prompt(findings);
        let explanation = self
            .ai_provider
            .chat(SYSTEM_PROMPT.to_string(), vec![prompt])
            .await?;

        Ok(explanation)
    }
}
