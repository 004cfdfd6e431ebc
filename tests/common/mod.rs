//! Mock phored daemon: records every JSON-RPC call and answers with a canned reply.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use parking_lot::Mutex;
use phored_gateway::GatewayConfig;
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct MockState {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    status: StatusCode,
    body: &'static str,
}

pub struct MockDaemon {
    pub addr: SocketAddr,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockDaemon {
    pub async fn start(status: StatusCode, body: &'static str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let calls = Arc::new(Mutex::new(Vec::new()));
        let state = MockState { calls: calls.clone(), status, body };

        tokio::spawn(async move {
            let app = Router::new().fallback(handle).with_state(state);
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("mock daemon error: {e}");
            }
        });

        Self { addr, calls }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    /// Gateway config pointing at this daemon under `/wallet`.
    pub fn config(&self, user: Option<&str>, pass: Option<&str>) -> GatewayConfig {
        GatewayConfig {
            rpc_user: user.map(str::to_string),
            rpc_pass: pass.map(str::to_string),
            phored_host: "http://127.0.0.1".into(),
            phored_rpc_port: self.addr.port(),
            phored_rpc_path: "/wallet".into(),
            ..GatewayConfig::default()
        }
    }
}

async fn handle(State(state): State<MockState>, uri: Uri, headers: HeaderMap, body: Bytes) -> Response {
    let header_str = |name: header::HeaderName| headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_string);
    state.calls.lock().push(RecordedCall {
        path: uri.path().to_string(),
        authorization: header_str(header::AUTHORIZATION),
        content_type: header_str(header::CONTENT_TYPE),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    });
    (state.status, [(header::CONTENT_TYPE, "application/json")], state.body).into_response()
}

/// A local port with nothing listening on it.
pub async fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap().port()
}
