use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tempfile::TempDir;

use solaudit_cli::enums::ai_provider_error::AiProviderError;
use solaudit_cli::enums::contract_source::ContractSource;
use solaudit_cli::enums::impact::Impact;
use solaudit_cli::enums::scan_outcome::ScanOutcome;
use solaudit_cli::errors::AuditError;
use solaudit_cli::server::analyze_server::AnalyzeServer;
use solaudit_cli::services::audit_service::AuditService;
use solaudit_cli::services::slither_runner::SlitherRunner;
use solaudit_cli::structs::analyze_response::AnalyzeResponse;
use solaudit_cli::structs::config::analyzer_config::AnalyzerConfig;
use solaudit_cli::structs::config::server_config::ServerConfig;
use solaudit_cli::traits::ai_provider::AiProvider;

const TEST_CONTRACT: &str = r#"
// SPDX-License-Identifier: MIT
pragma solidity ^0.8.20;

contract Vault {
    mapping(address => uint256) public balances;

    function withdraw(uint256 amount) external {
        require(balances[msg.sender] >= amount, "Insufficient balance");
        (bool ok, ) = msg.sender.call{value: amount}("");
        require(ok, "Transfer failed");
        balances[msg.sender] -= amount;
    }
}
"#;

/// Fake analyzer that writes a two-detector report to the `--json` path.
const REPORT_SCRIPT: &str = r#"#!/bin/sh
cat > "$3" <<'JSON'
{
  "success": true,
  "error": null,
  "results": {
    "detectors": [
      {
        "check": "reentrancy-eth",
        "description": "Reentrancy in Vault.withdraw()",
        "impact": "High",
        "source_mapping": { "lines": [10, 11, 12] }
      },
      {
        "check": "low-level-calls",
        "description": "Low level call in Vault.withdraw()",
        "impact": "Informational"
      }
    ]
  }
}
JSON
exit 0
"#;

/// Same report, but the analyzer exits non-zero after writing it.
const REPORT_NONZERO_SCRIPT: &str = r#"#!/bin/sh
cat > "$3" <<'JSON'
{
  "success": true,
  "error": null,
  "results": {
    "detectors": [
      {
        "check": "timestamp",
        "description": "Use of block.timestamp",
        "impact": "Low",
        "source_mapping": { "lines": [7] }
      }
    ]
  }
}
JSON
exit 3
"#;

const CLEAN_REPORT_SCRIPT: &str = r#"#!/bin/sh
printf '%s' '{ "success": true, "error": null, "results": {} }' > "$3"
exit 0
"#;

const FAILURE_SCRIPT: &str = r#"#!/bin/sh
echo "slither exploded" >&2
exit 1
"#;

const SILENT_SCRIPT: &str = r#"#!/bin/sh
exit 0
"#;

fn write_fake_analyzer(dir: &Path, script: &str) -> PathBuf {
    let path = dir.join("fake-slither.sh");
    fs::write(&path, script).expect("write fake analyzer");
    let mut perms = fs::metadata(&path).expect("stat fake analyzer").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).expect("chmod fake analyzer");
    path
}

fn write_contract(dir: &Path) -> PathBuf {
    let path = dir.join("Vault.sol");
    fs::write(&path, TEST_CONTRACT).expect("write contract");
    path
}

fn analyzer_config(slither_path: &Path, temp_dir: &Path) -> AnalyzerConfig {
    AnalyzerConfig {
        slither_path: slither_path.display().to_string(),
        solc_path: "solc".to_string(),
        temp_dir: temp_dir.to_path_buf(),
    }
}

fn server_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        allowed_origin: "http://localhost:3000".to_string(),
    }
}

struct CountingProvider {
    calls: AtomicUsize,
    reply: String,
}

impl CountingProvider {
    fn new(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            reply: reply.to_string(),
        })
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AiProvider for CountingProvider {
    async fn chat(
        &self,
        _system_prompt: String,
        _user_prompts: Vec<String>,
    ) -> std::result::Result<String, AiProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.clone())
    }
}

struct FailingProvider;

#[async_trait]
impl AiProvider for FailingProvider {
    async fn chat(
        &self,
        _system_prompt: String,
        _user_prompts: Vec<String>,
    ) -> std::result::Result<String, AiProviderError> {
        Err(AiProviderError::NetworkError("connection refused".to_string()))
    }
}

fn build_service(script: &str, workspace: &TempDir, provider: Arc<dyn AiProvider>) -> AuditService {
    let slither = write_fake_analyzer(workspace.path(), script);
    let temp_dir = workspace.path().join("scratch");
    let runner = SlitherRunner::new(analyzer_config(&slither, &temp_dir));
    AuditService::new(runner, provider)
}

fn scratch_is_empty(workspace: &TempDir) -> bool {
    let scratch = workspace.path().join("scratch");
    match fs::read_dir(&scratch) {
        Ok(entries) => entries.count() == 0,
        Err(_) => true,
    }
}

#[test]
fn scan_maps_each_detector_to_a_finding() -> Result<()> {
    let workspace = TempDir::new()?;
    let slither = write_fake_analyzer(workspace.path(), REPORT_SCRIPT);
    let contract = write_contract(workspace.path());
    let runner = SlitherRunner::new(analyzer_config(&slither, &workspace.path().join("scratch")));

    let outcome = runner.scan(&contract)?;
    let findings = outcome.findings();

    assert_eq!(findings.len(), 2, "each detector entry should map to one finding");
    assert_eq!(findings[0].check, "reentrancy-eth");
    assert_eq!(findings[0].impact, Impact::High);
    assert_eq!(findings[0].lines_label(), "10, 11, 12");
    assert_eq!(findings[1].check, "low-level-calls");
    assert_eq!(findings[1].impact, Impact::Informational);
    assert_eq!(findings[1].lines_label(), "Unknown");

    Ok(())
}

#[test]
fn scan_removes_the_report_file_after_reading_it() -> Result<()> {
    let workspace = TempDir::new()?;
    let slither = write_fake_analyzer(workspace.path(), REPORT_SCRIPT);
    let contract = write_contract(workspace.path());
    let scratch = workspace.path().join("scratch");
    let runner = SlitherRunner::new(analyzer_config(&slither, &scratch));

    runner.scan(&contract)?;

    let leftovers: Vec<_> = fs::read_dir(&scratch)?.collect();
    assert!(leftovers.is_empty(), "report file should be deleted after a successful read");

    Ok(())
}

#[test]
fn tool_failure_without_report_surfaces_stderr() -> Result<()> {
    let workspace = TempDir::new()?;
    let slither = write_fake_analyzer(workspace.path(), FAILURE_SCRIPT);
    let contract = write_contract(workspace.path());
    let runner = SlitherRunner::new(analyzer_config(&slither, &workspace.path().join("scratch")));

    let err = runner.scan(&contract).expect_err("non-zero exit without a report is a failure");

    match &err {
        AuditError::ToolInvocationFailed { stderr } => {
            assert!(stderr.contains("slither exploded"), "stderr should pass through unchanged");
        }
        other => panic!("expected ToolInvocationFailed, got {:?}", other),
    }
    assert!(err.user_message().contains("slither exploded"));

    Ok(())
}

#[test]
fn zero_exit_without_report_is_output_missing() -> Result<()> {
    let workspace = TempDir::new()?;
    let slither = write_fake_analyzer(workspace.path(), SILENT_SCRIPT);
    let contract = write_contract(workspace.path());
    let runner = SlitherRunner::new(analyzer_config(&slither, &workspace.path().join("scratch")));

    let err = runner.scan(&contract).expect_err("missing report must not be a success");
    assert!(matches!(err, AuditError::OutputMissing { .. }));

    Ok(())
}

#[test]
fn nonzero_exit_with_report_is_accepted() -> Result<()> {
    let workspace = TempDir::new()?;
    let slither = write_fake_analyzer(workspace.path(), REPORT_NONZERO_SCRIPT);
    let contract = write_contract(workspace.path());
    let runner = SlitherRunner::new(analyzer_config(&slither, &workspace.path().join("scratch")));

    let outcome = runner.scan(&contract)?;
    assert_eq!(outcome.findings().len(), 1);
    assert_eq!(outcome.findings()[0].check, "timestamp");

    Ok(())
}

#[test]
fn report_without_detector_tree_is_the_clean_sentinel() -> Result<()> {
    let workspace = TempDir::new()?;
    let slither = write_fake_analyzer(workspace.path(), CLEAN_REPORT_SCRIPT);
    let contract = write_contract(workspace.path());
    let runner = SlitherRunner::new(analyzer_config(&slither, &workspace.path().join("scratch")));

    let outcome = runner.scan(&contract)?;
    assert!(outcome.is_clean(), "empty detector tree is a success, not an error");

    Ok(())
}

#[tokio::test]
async fn clean_scan_never_contacts_the_api() -> Result<()> {
    let workspace = TempDir::new()?;
    let provider = CountingProvider::new("should never be seen");
    let service = build_service(CLEAN_REPORT_SCRIPT, &workspace, provider.clone());

    let explanation = service.explain(&ScanOutcome::Clean).await?;

    assert_eq!(provider.call_count(), 0, "clean outcome must short-circuit");
    assert!(explanation.contains("No vulnerabilities found"));

    Ok(())
}

#[tokio::test]
async fn findings_reach_the_provider_exactly_once() -> Result<()> {
    let workspace = TempDir::new()?;
    let contract = write_contract(workspace.path());
    let provider = CountingProvider::new("Use checks-effects-interactions.");
    let service = build_service(REPORT_SCRIPT, &workspace, provider.clone());

    let report = service.audit_contract(&contract).await?;

    assert_eq!(provider.call_count(), 1);
    assert_eq!(report.explanation, "Use checks-effects-interactions.");
    assert_eq!(report.outcome.findings().len(), 2);

    Ok(())
}

#[tokio::test]
async fn audit_source_removes_the_temp_contract() -> Result<()> {
    let workspace = TempDir::new()?;
    let provider = CountingProvider::new("explained");
    let service = build_service(REPORT_SCRIPT, &workspace, provider);

    service
        .audit_source(ContractSource::Inline {
            code: TEST_CONTRACT.to_string(),
        })
        .await?;

    assert!(scratch_is_empty(&workspace), "temp contract must be deleted after the audit");

    Ok(())
}

#[tokio::test]
async fn audit_source_removes_the_temp_contract_on_failure() -> Result<()> {
    let workspace = TempDir::new()?;
    let provider = CountingProvider::new("unused");
    let service = build_service(FAILURE_SCRIPT, &workspace, provider);

    let result = service
        .audit_source(ContractSource::Inline {
            code: TEST_CONTRACT.to_string(),
        })
        .await;

    assert!(result.is_err());
    assert!(scratch_is_empty(&workspace), "temp contract must be deleted even when the audit fails");

    Ok(())
}

#[tokio::test]
async fn analyze_without_contract_returns_400_with_error_key() -> Result<()> {
    let workspace = TempDir::new()?;
    let provider = CountingProvider::new("unused");
    let service = Arc::new(build_service(REPORT_SCRIPT, &workspace, provider));
    let routes = AnalyzeServer::routes(service, &server_config());

    let response = warp::test::request()
        .method("POST")
        .path("/analyze")
        .header("content-type", "application/x-www-form-urlencoded")
        .body("")
        .reply(&routes)
        .await;

    assert_eq!(response.status(), 400);
    let body: serde_json::Value = serde_json::from_slice(response.body())?;
    assert!(body.get("error").is_some(), "error body must carry an 'error' key");

    Ok(())
}

#[tokio::test]
async fn analyze_with_inline_code_returns_the_explanation() -> Result<()> {
    let workspace = TempDir::new()?;
    let provider = CountingProvider::new("Reentrancy explained.");
    let service = Arc::new(build_service(REPORT_SCRIPT, &workspace, provider.clone()));
    let routes = AnalyzeServer::routes(service, &server_config());

    let response = warp::test::request()
        .method("POST")
        .path("/analyze")
        .header("content-type", "application/x-www-form-urlencoded")
        .body("code=contract%20Demo%20%7B%7D")
        .reply(&routes)
        .await;

    assert_eq!(response.status(), 200);
    let body: AnalyzeResponse = serde_json::from_slice(response.body())?;
    assert_eq!(body.analysis, "Reentrancy explained.");
    assert_eq!(provider.call_count(), 1);
    assert!(scratch_is_empty(&workspace), "no temp files may survive the request");

    Ok(())
}

#[tokio::test]
async fn analyze_accepts_a_multipart_file_upload() -> Result<()> {
    let workspace = TempDir::new()?;
    let provider = CountingProvider::new("Upload explained.");
    let service = Arc::new(build_service(REPORT_SCRIPT, &workspace, provider));
    let routes = AnalyzeServer::routes(service, &server_config());

    let boundary = "----solaudit-test-boundary";
    let body = format!(
        "--{b}\r\ncontent-disposition: form-data; name=\"file\"; filename=\"Vault.sol\"\r\n\r\n{src}\r\n--{b}--\r\n",
        b = boundary,
        src = TEST_CONTRACT,
    );

    let response = warp::test::request()
        .method("POST")
        .path("/analyze")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(body)
        .reply(&routes)
        .await;

    assert_eq!(response.status(), 200);
    let body: AnalyzeResponse = serde_json::from_slice(response.body())?;
    assert_eq!(body.analysis, "Upload explained.");
    assert!(scratch_is_empty(&workspace));

    Ok(())
}

#[tokio::test]
async fn analyzer_failure_maps_to_500() -> Result<()> {
    let workspace = TempDir::new()?;
    let provider = CountingProvider::new("unused");
    let service = Arc::new(build_service(FAILURE_SCRIPT, &workspace, provider.clone()));
    let routes = AnalyzeServer::routes(service, &server_config());

    let response = warp::test::request()
        .method("POST")
        .path("/analyze")
        .header("content-type", "application/x-www-form-urlencoded")
        .body("code=contract%20Demo%20%7B%7D")
        .reply(&routes)
        .await;

    assert_eq!(response.status(), 500);
    let body: serde_json::Value = serde_json::from_slice(response.body())?;
    let message = body["error"].as_str().unwrap_or_default();
    assert!(message.contains("slither exploded"), "tool stderr must surface unchanged");
    assert_eq!(provider.call_count(), 0, "a failed scan must not reach the API");

    Ok(())
}

#[tokio::test]
async fn api_failure_maps_to_502() -> Result<()> {
    let workspace = TempDir::new()?;
    let service = Arc::new(build_service(REPORT_SCRIPT, &workspace, Arc::new(FailingProvider)));
    let routes = AnalyzeServer::routes(service, &server_config());

    let response = warp::test::request()
        .method("POST")
        .path("/analyze")
        .header("content-type", "application/x-www-form-urlencoded")
        .body("code=contract%20Demo%20%7B%7D")
        .reply(&routes)
        .await;

    assert_eq!(response.status(), 502);
    let body: serde_json::Value = serde_json::from_slice(response.body())?;
    let message = body["error"].as_str().unwrap_or_default();
    assert!(message.contains("connection refused"));
    assert!(scratch_is_empty(&workspace), "temp contract must be deleted on API failure too");

    Ok(())
}
