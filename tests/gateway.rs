//! End-to-end gateway tests against a mock daemon.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use phored_gateway::node::ServiceHandle;
use phored_gateway::{AllowedMethods, GatewayConfig, GatewayServer, RpcForwarder};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use common::{closed_port, MockDaemon};

fn gateway(cfg: &GatewayConfig) -> axum::Router {
    GatewayServer::new(Arc::new(RpcForwarder::new(cfg)), AllowedMethods::default()).router()
}

fn post_rpc(body: String) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/rpc")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

async fn body_string(resp: Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_success_body_relayed_verbatim() {
    let daemon = MockDaemon::start(StatusCode::OK, r#"{"result":42}"#).await;
    let app = gateway(&daemon.config(None, None));

    let resp = app.oneshot(post_rpc(json!({"method": "getblockcount"}).to_string())).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["content-type"], "application/json");
    assert_eq!(body_string(resp).await, r#"{"result":42}"#);

    let calls = daemon.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].path, "/wallet");
    assert_eq!(calls[0].content_type.as_deref(), Some("application/json"));
    assert_eq!(calls[0].body, json!({"jsonrpc": "2.0", "method": "getblockcount", "params": [], "id": 1}));
}

#[tokio::test]
async fn test_params_and_casing_forwarded_as_given() {
    let daemon = MockDaemon::start(StatusCode::OK, r#"{"result":"00ab"}"#).await;
    let app = gateway(&daemon.config(None, None));

    let body = json!({"method": "GetBlockHash", "params": [1000]}).to_string();
    let resp = app.oneshot(post_rpc(body)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let calls = daemon.calls();
    assert_eq!(calls[0].body["method"], "GetBlockHash");
    assert_eq!(calls[0].body["params"], json!([1000]));
}

#[tokio::test]
async fn test_every_disallowed_method_is_403_without_daemon_contact() {
    let daemon = MockDaemon::start(StatusCode::OK, r#"{"result":null}"#).await;
    let cfg = daemon.config(Some("user"), Some("pass"));

    for method in ["stop", "dumpprivkey", "sendtoaddress", "DumpWallet", "getblock2"] {
        let resp = gateway(&cfg).oneshot(post_rpc(json!({"method": method}).to_string())).await.unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN, "{method}");
    }
    assert!(daemon.calls().is_empty());
}

#[tokio::test]
async fn test_missing_method_is_400_without_daemon_contact() {
    let daemon = MockDaemon::start(StatusCode::OK, r#"{"result":null}"#).await;
    let resp = gateway(&daemon.config(None, None)).oneshot(post_rpc("{}".into())).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(daemon.calls().is_empty());
}

#[tokio::test]
async fn test_upstream_status_and_body_passed_through() {
    let error_body = r#"{"result":null,"error":{"code":-8,"message":"Block height out of range"},"id":1}"#;
    let daemon = MockDaemon::start(StatusCode::INTERNAL_SERVER_ERROR, error_body).await;
    let app = gateway(&daemon.config(None, None));

    let resp = app.oneshot(post_rpc(json!({"method": "getblockhash", "params": [-1]}).to_string())).await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_string(resp).await, error_body);
}

#[tokio::test]
async fn test_unreachable_daemon_is_400() {
    let cfg = GatewayConfig { phored_rpc_port: closed_port().await, ..GatewayConfig::default() };

    let resp = gateway(&cfg).oneshot(post_rpc(json!({"method": "getinfo"}).to_string())).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_string(resp).await.is_empty());

    let req = Request::builder().uri("/").body(Body::empty()).unwrap();
    let resp = gateway(&cfg).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_credentials_injected_only_when_configured() {
    let daemon = MockDaemon::start(StatusCode::OK, r#"{"result":true}"#).await;

    let anon = gateway(&daemon.config(None, None));
    anon.oneshot(post_rpc(json!({"method": "ping"}).to_string())).await.unwrap();

    let half = gateway(&daemon.config(Some("user"), None));
    half.oneshot(post_rpc(json!({"method": "ping"}).to_string())).await.unwrap();

    let authed = gateway(&daemon.config(Some("user"), Some("pass")));
    authed.oneshot(post_rpc(json!({"method": "ping"}).to_string())).await.unwrap();

    let calls = daemon.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0].authorization, None);
    assert_eq!(calls[1].authorization, None);
    assert_eq!(calls[2].authorization.as_deref(), Some("Basic dXNlcjpwYXNz"));
}

#[tokio::test]
async fn test_health_check_forwards_ping_for_any_path() {
    let daemon = MockDaemon::start(StatusCode::OK, r#"{"result":null}"#).await;
    let cfg = daemon.config(None, None);

    for uri in ["/", "/anything", "/a/b/c"] {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let resp = gateway(&cfg).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let calls = daemon.calls();
    assert_eq!(calls.len(), 3);
    for call in calls {
        assert_eq!(call.body, json!({"jsonrpc": "2.0", "method": "ping", "params": [], "id": 1}));
    }
}

#[tokio::test]
async fn test_served_gateway_over_tcp() {
    let daemon = MockDaemon::start(StatusCode::OK, r#"{"result":7}"#).await;
    let server = GatewayServer::new(Arc::new(RpcForwarder::new(&daemon.config(None, None))), AllowedMethods::default());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (mut handle, shutdown_rx) = ServiceHandle::new();
    handle.attach(tokio::spawn(server.serve(listener, shutdown_rx)));

    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/rpc"))
        .json(&json!({"method": "getconnectioncount"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), r#"{"result":7}"#);

    handle.shutdown().await.unwrap();
    assert_eq!(daemon.calls().len(), 1);
}
