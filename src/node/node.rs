//! Process wiring: config -> forwarder -> gateway server, spawned under a ServiceHandle.

use anyhow::Result;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::config::GatewayConfig;
use crate::node::service_handle::ServiceHandle;
use crate::rpc::{AllowedMethods, GatewayServer, RpcForwarder};

/// Main Node object
pub struct Node {
    cfg: GatewayConfig,
}

impl Node {
    pub fn new(cfg: GatewayConfig) -> Self {
        Self { cfg }
    }

    /// Bind the listener, spawn the gateway and return a ServiceHandle for graceful shutdown.
    pub async fn start(self) -> Result<ServiceHandle> {
        let (mut svc_handle, shutdown_rx) = ServiceHandle::new();

        debug!(
            redis = %format!("{}:{}", self.cfg.redis_host, self.cfg.redis_port),
            data_dir = %self.cfg.phored_data_dir,
            con_port = self.cfg.phored_con_port,
            start_from_beginning = self.cfg.start_from_beginning,
            "collaborator settings"
        );
        if !self.cfg.has_credentials() {
            info!("RPC_USER/RPC_PASS not set, daemon calls will be unauthenticated");
        }

        let forwarder = Arc::new(RpcForwarder::new(&self.cfg));
        info!("Forwarding to daemon at {}", forwarder.url());
        let server = GatewayServer::new(forwarder, AllowedMethods::default());

        let listener = tokio::net::TcpListener::bind(self.cfg.listen_addr()).await?;
        let h: JoinHandle<anyhow::Result<()>> = tokio::spawn(async move {
            if let Err(e) = server.serve(listener, shutdown_rx).await {
                error!("gateway server failed: {:?}", e);
                return Err(e);
            }
            Ok(())
        });
        svc_handle.attach(h);

        Ok(svc_handle)
    }
}
