//! Client side of the ingestion endpoint
//!
//! Backs the `necrologctl` binary: builds a [`LogRequest`] from command-line
//! flags and posts it as JSON to a running [`server`](crate::ingest::server).

use crate::core::error::{LoggerError, Result};
use crate::ingest::LogRequest;
use clap::Parser;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080/log";
pub const DEFAULT_TARGET: &str = "/var/log/uah_log/edotensei/system_info.log";
pub const EMPTY_MESSAGE: &str = "log message cannot be empty";

#[derive(Debug, Clone, Parser)]
#[command(
    name = "necrologctl",
    version,
    about = "Post one event to a necrolog ingestion endpoint"
)]
pub struct PostArgs {
    /// Log file path
    #[arg(long, default_value = DEFAULT_TARGET)]
    pub path: String,

    /// Log level (debug|info|warn|error)
    #[arg(long, default_value = "info")]
    pub level: String,

    /// Log message
    #[arg(long, default_value = "")]
    pub msg: String,

    /// necrolog API endpoint
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,
}

impl PostArgs {
    /// Payload for these flags; the level is sent as given
    pub fn request(&self) -> Result<LogRequest> {
        if self.msg.is_empty() {
            return Err(LoggerError::invalid_request(EMPTY_MESSAGE));
        }
        Ok(LogRequest {
            path: self.path.clone(),
            level: self.level.clone(),
            msg: self.msg.clone(),
        })
    }
}

/// POST `request` to `endpoint` and return the raw response body, whatever
/// the status code.
pub async fn post(endpoint: &str, request: &LogRequest) -> Result<String> {
    let payload = serde_json::to_vec(request)?;
    let response = reqwest::Client::new()
        .post(endpoint)
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body(payload)
        .send()
        .await?;
    Ok(response.text().await?)
}
