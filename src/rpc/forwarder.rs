//! RPC forwarder: sends one JSON-RPC call to the daemon and hands back its raw reply.
//!
//! The forwarder knows nothing about the allow-list. It is a trusted transport
//! and must only be reached through the gateway's validation or from trusted
//! internal tooling.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{StatusCode, Url};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::config::GatewayConfig;
use crate::rpc::auth::build_auth_header;
use crate::rpc::envelope::{JsonRpcRequest, JsonRpcResponse};
use crate::utils::GatewayError;

#[derive(Error, Debug)]
pub enum ForwardError {
    /// The outbound request could not be built.
    #[error("request setup failed: {0}")]
    Setup(String),
    /// Network-level failure, nothing usable came back from the daemon.
    #[error("daemon unreachable: {0}")]
    Transport(String),
}

impl From<ForwardError> for GatewayError {
    fn from(e: ForwardError) -> Self {
        match e {
            ForwardError::Setup(msg) => GatewayError::Unexpected(msg),
            ForwardError::Transport(msg) => GatewayError::Transport(msg),
        }
    }
}

/// Whatever the daemon answered, untouched.
#[derive(Debug, Clone)]
pub struct DaemonReply {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

impl DaemonReply {
    pub fn is_success(&self) -> bool {
        self.status == StatusCode::OK
    }

    /// Decode the body as a JSON-RPC response and return its `result`.
    ///
    /// bitcoind-style daemons answer RPC errors with a non-200 status and an
    /// `error` object in the body, so the body is inspected before the status.
    pub fn into_result(self) -> Result<Value, GatewayError> {
        let resp: JsonRpcResponse = match serde_json::from_slice(&self.body) {
            Ok(r) => r,
            Err(_) if !self.is_success() => {
                return Err(GatewayError::Unexpected(format!("daemon returned status {}", self.status)));
            }
            Err(e) => return Err(e.into()),
        };
        if let Some(err) = resp.error {
            return Err(GatewayError::Daemon { code: err.code, message: err.message });
        }
        if !self.is_success() {
            return Err(GatewayError::Unexpected(format!("daemon returned status {}", self.status)));
        }
        Ok(resp.result.unwrap_or(Value::Null))
    }
}

/// Transport to the daemon's JSON-RPC interface.
/// `RpcForwarder` is the real implementation; tests plug in fakes.
#[async_trait]
pub trait DaemonRpc: Send + Sync + 'static {
    async fn call(&self, method: &str, params: Vec<Value>) -> Result<DaemonReply, ForwardError>;
}

/// Forwards calls over HTTP POST with the configured credentials.
#[derive(Clone)]
pub struct RpcForwarder {
    client: reqwest::Client,
    url: String,
    rpc_user: Option<String>,
    rpc_pass: Option<String>,
}

impl RpcForwarder {
    pub fn new(cfg: &GatewayConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: cfg.rpc_url(),
            rpc_user: cfg.rpc_user.clone(),
            rpc_pass: cfg.rpc_pass.clone(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl DaemonRpc for RpcForwarder {
    async fn call(&self, method: &str, params: Vec<Value>) -> Result<DaemonReply, ForwardError> {
        let url = Url::parse(&self.url).map_err(|e| ForwardError::Setup(format!("{}: {}", self.url, e)))?;
        let envelope = JsonRpcRequest::new(method, params);

        debug!(%url, method, "forwarding to daemon");
        let resp = self
            .client
            .post(url)
            .headers(build_auth_header(self.rpc_user.as_deref(), self.rpc_pass.as_deref()))
            .json(&envelope)
            .send()
            .await
            .map_err(|e| {
                if e.is_builder() {
                    ForwardError::Setup(e.to_string())
                } else {
                    ForwardError::Transport(e.to_string())
                }
            })?;

        let status = resp.status();
        let content_type = resp.headers().get(CONTENT_TYPE).cloned();
        let body = resp.bytes().await.map_err(|e| ForwardError::Transport(e.to_string()))?;
        Ok(DaemonReply { status, content_type, body })
    }
}
