//! phored-gateway
//!
//! Restricted HTTP gateway in front of the phored JSON-RPC interface. Clients
//! call an allow-listed subset of daemon methods without ever holding the
//! daemon's credentials.

pub mod config;
pub mod node;
pub mod rpc;
pub mod tools;
pub mod utils;

pub use config::GatewayConfig;
pub use rpc::{AllowedMethods, DaemonRpc, GatewayServer, RpcForwarder};
pub use utils::{GatewayError, Result};
