use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header::CONTENT_TYPE, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::rpc::allowlist::AllowedMethods;
use crate::rpc::envelope::GatewayRequest;
use crate::rpc::forwarder::{DaemonReply, DaemonRpc, ForwardError};
use crate::utils::metrics::{self, METRICS};
use crate::utils::GatewayError;

/// Method used by the health check on every unrouted GET.
pub const HEALTH_CHECK_METHOD: &str = "ping";

/// Shared per-router state; everything behind it is immutable.
struct GatewayState<D: DaemonRpc> {
    daemon: Arc<D>,
    allowed: Arc<AllowedMethods>,
}

impl<D: DaemonRpc> Clone for GatewayState<D> {
    fn clone(&self) -> Self {
        Self { daemon: self.daemon.clone(), allowed: self.allowed.clone() }
    }
}

/// HTTP front of the gateway: validates calls and relays them to the daemon.
pub struct GatewayServer<D: DaemonRpc> {
    daemon: Arc<D>,
    allowed: Arc<AllowedMethods>,
}

impl<D: DaemonRpc> GatewayServer<D> {
    pub fn new(daemon: Arc<D>, allowed: AllowedMethods) -> Self {
        Self { daemon, allowed: Arc::new(allowed) }
    }

    /// `POST /rpc` for calls, any other GET is a health check.
    pub fn router(&self) -> Router {
        let state = GatewayState { daemon: self.daemon.clone(), allowed: self.allowed.clone() };
        Router::new()
            .route("/rpc", post(rpc_endpoint::<D>).get(health_check::<D>))
            .fallback(fallback::<D>)
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Serve on `listener` until `shutdown` flips to true.
    pub async fn serve(self, listener: TcpListener, mut shutdown: watch::Receiver<bool>) -> anyhow::Result<()> {
        let app = self.router();
        info!("App is running on port {}", listener.local_addr()?.port());
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.wait_for(|stop| *stop).await;
            })
            .await?;
        Ok(())
    }
}

async fn rpc_endpoint<D: DaemonRpc>(State(state): State<GatewayState<D>>, body: Bytes) -> Response {
    match forward_call(&state, &body).await {
        Ok(resp) => resp,
        Err(e) => {
            match &e {
                GatewayError::MissingMethod | GatewayError::ForbiddenMethod(_) => {
                    METRICS.inc_counter(metrics::REQUESTS_REJECTED);
                    warn!("rejected: {}", e);
                }
                GatewayError::Transport(msg) => {
                    METRICS.inc_counter(metrics::TRANSPORT_FAILURES);
                    error!("daemon unreachable: {}", msg);
                }
                other => error!("request failed: {}", other),
            }
            e.into_response()
        }
    }
}

async fn forward_call<D: DaemonRpc>(state: &GatewayState<D>, body: &[u8]) -> Result<Response, GatewayError> {
    let call = GatewayRequest::from_slice(body)?.validate(&state.allowed)?;
    info!("Sending {} with params: {}", call.method, describe_params(&call.params));
    let reply = state.daemon.call(&call.method, call.params).await?;
    METRICS.inc_counter(metrics::REQUESTS_FORWARDED);
    Ok(relay(reply))
}

async fn health_check<D: DaemonRpc>(State(state): State<GatewayState<D>>) -> Response {
    info!("Health check");
    METRICS.inc_counter(metrics::HEALTH_CHECKS);
    match state.daemon.call(HEALTH_CHECK_METHOD, Vec::new()).await {
        Ok(reply) => relay(reply),
        Err(ForwardError::Transport(msg)) => {
            METRICS.inc_counter(metrics::TRANSPORT_FAILURES);
            error!("health check: daemon unreachable: {}", msg);
            StatusCode::BAD_REQUEST.into_response()
        }
        Err(e @ ForwardError::Setup(_)) => {
            error!("health check: {}", e);
            (StatusCode::REQUEST_TIMEOUT, e.to_string()).into_response()
        }
    }
}

async fn fallback<D: DaemonRpc>(method: Method, state: State<GatewayState<D>>) -> Response {
    if method == Method::GET || method == Method::HEAD {
        health_check(state).await
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

/// Daemon status and body go back to the client as-is.
fn relay(reply: DaemonReply) -> Response {
    let mut resp = Response::new(Body::from(reply.body));
    *resp.status_mut() = reply.status;
    if let Some(ct) = reply.content_type {
        resp.headers_mut().insert(CONTENT_TYPE, ct);
    }
    resp
}

fn describe_params(params: &[Value]) -> String {
    if params.is_empty() {
        "empty".into()
    } else {
        Value::Array(params.to_vec()).to_string()
    }
}
