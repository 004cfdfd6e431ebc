//! RPC module
//!
//! - `POST /rpc` relays allow-listed JSON-RPC calls to the daemon
//! - any other GET is a health check that forwards `ping`
//! - daemon credentials are injected here, clients never hold them
//!
//! To integrate: build an `RpcForwarder` from the `GatewayConfig` (or any other
//! `DaemonRpc` implementation) and pass it to `GatewayServer::new()`.

pub mod allowlist;
pub mod auth;
pub mod envelope;
pub mod forwarder;
pub mod server;

pub use allowlist::{AllowedMethods, DEFAULT_ALLOWED_METHODS};
pub use auth::build_auth_header;
pub use envelope::{ForwardRequest, GatewayRequest, JsonRpcRequest};
pub use forwarder::{DaemonReply, DaemonRpc, ForwardError, RpcForwarder};
pub use server::GatewayServer;
