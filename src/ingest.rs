//! Ingestion boundary
//!
//! Decodes `{"path": "...", "level": "...", "msg": "..."}` requests and
//! forwards valid ones to the registry. Malformed bodies and requests
//! without a path or message are rejected and never reach a sink. With the
//! `http` feature, [`server`] exposes this as `POST /log`.

use crate::core::error::{LoggerError, Result};
use crate::core::log_level::LogLevel;
use crate::core::registry::Registry;
use serde::{Deserialize, Serialize};

pub const INVALID_JSON: &str = "invalid json";
pub const MISSING_FIELDS: &str = "missing path or msg";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogRequest {
    pub path: String,
    pub level: String,
    pub msg: String,
}

impl LogRequest {
    pub fn new(path: impl Into<String>, level: LogLevel, msg: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            level: level.to_str().to_lowercase(),
            msg: msg.into(),
        }
    }

    pub fn parse(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body).map_err(|_| LoggerError::invalid_request(INVALID_JSON))
    }

    pub fn validate(&self) -> Result<()> {
        if self.path.is_empty() || self.msg.is_empty() {
            return Err(LoggerError::invalid_request(MISSING_FIELDS));
        }
        Ok(())
    }

    /// Requested level; anything unrecognized is recorded at `Debug`
    pub fn level(&self) -> LogLevel {
        LogLevel::lenient(&self.level)
    }

    pub fn submit(&self, registry: &Registry) -> Result<()> {
        self.validate()?;
        registry.emit(&self.path, self.level(), self.msg.as_str());
        Ok(())
    }
}

/// Decode, validate and record one request body
pub fn ingest(registry: &Registry, body: &[u8]) -> Result<()> {
    LogRequest::parse(body)?.submit(registry)
}

#[cfg(feature = "http")]
pub mod server {
    //! HTTP front end for [`ingest`](super::ingest)

    use super::ingest;
    use crate::core::error::{LoggerError, Result};
    use crate::core::registry::Registry;
    use axum::{body::Bytes, extract::State, http::StatusCode, routing::post, Router};
    use std::net::SocketAddr;
    use std::sync::Arc;
    use tokio::sync::oneshot;

    pub const LOG_ROUTE: &str = "/log";

    /// Handle to control the running server
    pub struct ServerHandle {
        shutdown_tx: Option<oneshot::Sender<()>>,
        addr: SocketAddr,
    }

    impl ServerHandle {
        pub fn addr(&self) -> SocketAddr {
            self.addr
        }

        pub fn shutdown(mut self) {
            if let Some(tx) = self.shutdown_tx.take() {
                let _ = tx.send(());
            }
        }
    }

    pub fn router(registry: Arc<Registry>) -> Router {
        Router::new()
            .route(LOG_ROUTE, post(log_handler))
            .with_state(registry)
    }

    /// Bind `addr` and serve until the returned handle is shut down
    pub async fn start(addr: SocketAddr, registry: Arc<Registry>) -> Result<ServerHandle> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        let bound_addr = listener.local_addr()?;
        let app = router(registry);

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
            {
                eprintln!("[ERROR] Ingestion server stopped: {}", e);
            }
        });

        Ok(ServerHandle {
            shutdown_tx: Some(shutdown_tx),
            addr: bound_addr,
        })
    }

    /// POST /log
    ///
    /// File writes are synchronous, so emission runs on the blocking pool.
    async fn log_handler(
        State(registry): State<Arc<Registry>>,
        body: Bytes,
    ) -> (StatusCode, String) {
        let outcome = tokio::task::spawn_blocking(move || ingest(&registry, &body)).await;

        match outcome {
            Ok(Ok(())) => (StatusCode::OK, "ok".to_string()),
            Ok(Err(LoggerError::InvalidRequest(reason))) => (StatusCode::BAD_REQUEST, reason),
            Ok(Err(e)) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::LogConfig;
    use tempfile::tempdir;

    #[test]
    fn test_parse_rejects_malformed_body() {
        let err = LogRequest::parse(b"{not json").unwrap_err();
        assert_eq!(err.to_string(), INVALID_JSON);
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let request = LogRequest::parse(br#"{"msg":"no path"}"#).unwrap();
        assert_eq!(request.path, "");
        assert_eq!(request.validate().unwrap_err().to_string(), MISSING_FIELDS);

        let request = LogRequest::parse(br#"{"path":"/tmp/a.log"}"#).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_unknown_level_is_debug() {
        let request = LogRequest::parse(br#"{"path":"p","level":"loud","msg":"m"}"#).unwrap();
        assert_eq!(request.level(), LogLevel::Debug);

        let request = LogRequest::parse(br#"{"path":"p","msg":"m"}"#).unwrap();
        assert_eq!(request.level(), LogLevel::Debug);
    }

    #[test]
    fn test_ingest_forwards_to_registry() {
        let dir = tempdir().unwrap();
        let registry = Registry::new(LogConfig::default().with_status_dir(dir.path()));
        let path = dir.path().join("ingested.log");
        let body = serde_json::to_vec(&LogRequest::new(
            path.display().to_string(),
            LogLevel::Warn,
            "forwarded",
        ))
        .unwrap();

        ingest(&registry, &body).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let record: serde_json::Value = serde_json::from_str(content.trim_end()).unwrap();
        assert_eq!(record["level"], "WARN");
        assert_eq!(record["msg"], "forwarded");
    }

    #[test]
    fn test_rejected_request_creates_no_handle() {
        let registry = Registry::new(LogConfig::default());
        assert!(ingest(&registry, br#"{"path":"","msg":""}"#).is_err());
        assert!(registry.is_empty());
    }
}
