//! Wire types: the inbound gateway body and the outbound JSON-RPC 2.0 envelope.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::rpc::allowlist::AllowedMethods;
use crate::utils::{GatewayError, Result};

/// Constant request id; calls are never pipelined so no correlation is needed.
pub const ENVELOPE_ID: u64 = 1;

/// JSON-RPC 2.0 request sent to the daemon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    pub params: Vec<Value>,
    pub id: u64,
}

impl JsonRpcRequest {
    pub fn new(method: impl Into<String>, params: Vec<Value>) -> Self {
        Self { jsonrpc: "2.0".into(), method: method.into(), params, id: ENVELOPE_ID }
    }
}

/// JSON-RPC 2.0 response from the daemon (bitcoind style: both fields may be present, one null)
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<JsonRpcError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
}

/// Body accepted on `POST /rpc`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GatewayRequest {
    pub method: Option<String>,
    pub params: Option<Vec<Value>>,
}

/// A request that passed validation and may be sent to the daemon.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardRequest {
    /// As the client cased it; only the allow-list check is case-insensitive.
    pub method: String,
    pub params: Vec<Value>,
}

impl GatewayRequest {
    /// An empty body parses as `{}`, so it is rejected later as a missing method.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        Ok(serde_json::from_slice(body)?)
    }

    /// Presence check, allow-list check, then params defaulting.
    pub fn validate(self, allowed: &AllowedMethods) -> Result<ForwardRequest> {
        let method = self.method.ok_or(GatewayError::MissingMethod)?;
        if !allowed.contains(&method) {
            return Err(GatewayError::ForbiddenMethod(method));
        }
        Ok(ForwardRequest { method, params: self.params.unwrap_or_default() })
    }
}
