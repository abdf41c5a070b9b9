use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use bytes::BufMut;
use futures::TryStreamExt;
use serde_json::json;
use tokio::sync::oneshot;
use warp::http::StatusCode;
use warp::multipart::FormData;
use warp::{Filter, Rejection, Reply};
use crate::config::constants::{MAX_CONTRACT_BYTES, SERVER_SHUTDOWN_GRACE_PERIOD_MS};
use crate::enums::contract_source::ContractSource;
use crate::errors::{AuditError, AuditResult};
use crate::services::audit_service::AuditService;
use crate::structs::analyze_response::AnalyzeResponse;
use crate::structs::audit_report::AuditReport;
use crate::structs::config::server_config::ServerConfig;

pub struct AnalyzeServer {
    audit_service: Arc<AuditService>,
    config: ServerConfig,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl AnalyzeServer {
    pub fn new(audit_service: Arc<AuditService>, config: ServerConfig) -> Self {
        Self {
            audit_service,
            config,
            shutdown_tx: None,
        }
    }

    pub async fn start(&mut self) -> AuditResult<SocketAddr> {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .map_err(|e| {
                AuditError::config_error(
                    &format!("Invalid listen address: {}", e),
                    Some("server.host"),
                    None,
                )
            })?;

        self.check_port(addr).await?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        self.shutdown_tx = Some(shutdown_tx);

        let routes = Self::routes(Arc::clone(&self.audit_service), &self.config);

        let (bound_addr, server) = warp::serve(routes).bind_with_graceful_shutdown(addr, async {
            shutdown_rx.await.ok();
        });

        tokio::spawn(server);

        log::info!("🌐 Analysis server started on {}", bound_addr);
        Ok(bound_addr)
    }

    pub async fn shutdown(&mut self) -> AuditResult<()> {
        log::info!("🛑 Shutting down analysis server...");

        if let Some(shutdown_tx) = self.shutdown_tx.take() {
            shutdown_tx.send(()).map_err(|_| {
                AuditError::system_error("shutdown", "Failed to send shutdown signal")
            })?;
        }

        tokio::time::sleep(tokio::time::Duration::from_millis(SERVER_SHUTDOWN_GRACE_PERIOD_MS)).await;
        log::info!("✅ Analysis server shutdown complete");

        Ok(())
    }

    /// `POST /analyze` accepting a multipart `file`/`code` part or a
    /// urlencoded `code` field. Split into two filter chains so warp can
    /// pick by content type.
    pub fn routes(
        audit_service: Arc<AuditService>,
        config: &ServerConfig,
    ) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
        let service_filter = warp::any().map(move || Arc::clone(&audit_service));

        let multipart_route = warp::path("analyze")
            .and(warp::path::end())
            .and(warp::post())
            .and(warp::multipart::form().max_length(MAX_CONTRACT_BYTES))
            .and(service_filter.clone())
            .and_then(analyze_multipart_handler);

        let form_route = warp::path("analyze")
            .and(warp::path::end())
            .and(warp::post())
            .and(warp::body::content_length_limit(MAX_CONTRACT_BYTES))
            .and(warp::body::form::<HashMap<String, String>>())
            .and(service_filter)
            .and_then(analyze_form_handler);

        multipart_route
            .or(form_route)
            .recover(handle_rejection)
            .with(
                warp::cors()
                    .allow_origin(config.allowed_origin.as_str())
                    .allow_headers(vec!["content-type"])
                    .allow_methods(vec!["POST"]),
            )
    }

    async fn check_port(&self, addr: SocketAddr) -> AuditResult<()> {
        match tokio::net::TcpListener::bind(addr).await {
            Ok(listener) => {
                drop(listener);
                Ok(())
            }
            Err(e) => Err(AuditError::system_error(
                "bind",
                &format!("{} is not available: {}", addr, e),
            )),
        }
    }
}

async fn analyze_multipart_handler(
    form: FormData,
    audit_service: Arc<AuditService>,
) -> Result<impl Reply, Infallible> {
    match read_multipart_source(form).await {
        Ok(Some(source)) => Ok(audit_reply(audit_service.audit_source(source).await)),
        Ok(None) => {
            log::warn!("❌ No contract provided!");
            Ok(error_reply(StatusCode::BAD_REQUEST, "No contract provided."))
        }
        Err(e) => Ok(error_reply(
            StatusCode::BAD_REQUEST,
            &format!("Malformed upload: {}", e),
        )),
    }
}

async fn analyze_form_handler(
    body: HashMap<String, String>,
    audit_service: Arc<AuditService>,
) -> Result<impl Reply, Infallible> {
    match body.get("code").map(|code| code.trim()).filter(|code| !code.is_empty()) {
        Some(code) => {
            log::info!("📝 Received inline contract source");
            let source = ContractSource::Inline {
                code: code.to_string(),
            };
            Ok(audit_reply(audit_service.audit_source(source).await))
        }
        None => {
            log::warn!("❌ No contract provided!");
            Ok(error_reply(StatusCode::BAD_REQUEST, "No contract provided."))
        }
    }
}

/// Pull the `file` or `code` part out of a multipart body. An uploaded file
/// wins over pasted source when both are present.
async fn read_multipart_source(form: FormData) -> Result<Option<ContractSource>, warp::Error> {
    let parts: Vec<(String, Option<String>, Vec<u8>)> = form
        .and_then(|mut part| async move {
            let name = part.name().to_string();
            let filename = part.filename().map(|s| s.to_string());
            let mut contents: Vec<u8> = Vec::new();
            while let Some(buf) = part.data().await {
                contents.put(buf?);
            }
            Ok((name, filename, contents))
        })
        .try_collect()
        .await?;

    let mut file: Option<(String, Vec<u8>)> = None;
    let mut code: Option<String> = None;

    for (name, filename, contents) in parts {
        match name.as_str() {
            "file" => {
                let filename = filename.unwrap_or_else(|| "contract.sol".to_string());
                log::info!("📂 Received file: {} ({} bytes)", filename, contents.len());
                file = Some((filename, contents));
            }
            "code" => {
                code = Some(String::from_utf8_lossy(&contents).to_string());
            }
            _ => {}
        }
    }

    if let Some((filename, contents)) = file {
        return Ok(Some(ContractSource::File { filename, contents }));
    }
    if let Some(code) = code.filter(|code| !code.trim().is_empty()) {
        log::info!("📝 Received inline contract source");
        return Ok(Some(ContractSource::Inline { code }));
    }
    Ok(None)
}

fn audit_reply(result: AuditResult<AuditReport>) -> warp::reply::WithStatus<warp::reply::Json> {
    match result {
        Ok(report) => warp::reply::with_status(
            warp::reply::json(&AnalyzeResponse {
                analysis: report.explanation,
            }),
            StatusCode::OK,
        ),
        Err(e) => {
            log::error!("❌ Analysis request failed: {}", e.technical_details());
            error_reply(error_status(&e), &e.user_message())
        }
    }
}

fn error_reply(status: StatusCode, message: &str) -> warp::reply::WithStatus<warp::reply::Json> {
    warp::reply::with_status(warp::reply::json(&json!({ "error": message })), status)
}

/// Each failure class gets its own transport signal instead of riding inside
/// a 200 body.
fn error_status(error: &AuditError) -> StatusCode {
    match error {
        AuditError::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
        AuditError::ApiCallFailed { .. } => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    if err.is_not_found() {
        return Ok(error_reply(StatusCode::NOT_FOUND, "Not found"));
    }
    if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        return Ok(error_reply(StatusCode::PAYLOAD_TOO_LARGE, "Contract too large"));
    }
    if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        return Ok(error_reply(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed"));
    }
    Ok(error_reply(StatusCode::BAD_REQUEST, "No contract provided."))
}
