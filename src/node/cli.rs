use clap::{Parser, Subcommand};
use anyhow::Result;
use tracing::info;

use crate::config::GatewayConfig;
use crate::node::Node;
use crate::rpc::RpcForwarder;
use crate::tools;
use crate::utils::metrics::{self, METRICS};
use crate::utils::init_logging;

/// CLI for the gateway and the trusted daemon helpers.
#[derive(Parser)]
#[clap(name = "phored-gateway", version)]
pub struct Cli {
    /// Override PHORED_HOST
    #[clap(long)]
    pub host: Option<String>,

    #[clap(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand)]
pub enum Cmd {
    /// Run the HTTP gateway
    Serve {
        /// Override PHORED_WEB_PORT
        #[clap(long)]
        web_port: Option<u16>,
    },
    /// Fetch a block straight from the daemon (no allow-list)
    Block {
        hash: String,
    },
    /// Fetch a verbose raw transaction straight from the daemon (no allow-list)
    Tx {
        hash: String,
    },
    /// Hex conversion helpers
    Hex {
        #[clap(subcommand)]
        op: HexOp,
    },
}

#[derive(Subcommand)]
pub enum HexOp {
    /// Print the hex encoding of a UTF-8 string's bytes
    Encode { value: String },
    /// Decode hex and print the byte values
    Decode { value: String },
}

pub async fn run_cli() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mut cfg = GatewayConfig::from_env()?;
    if let Some(host) = cli.host {
        cfg.phored_host = host;
    }

    match cli.cmd {
        Cmd::Serve { web_port } => {
            if let Some(port) = web_port {
                cfg.phored_web_port = port;
            }
            let svc = Node::new(cfg).start().await?;
            // Wait for Ctrl+C
            tokio::signal::ctrl_c().await?;
            info!("Shutting down gateway...");
            svc.shutdown().await?;
            info!(
                forwarded = METRICS.counter(metrics::REQUESTS_FORWARDED),
                rejected = METRICS.counter(metrics::REQUESTS_REJECTED),
                transport_failures = METRICS.counter(metrics::TRANSPORT_FAILURES),
                health_checks = METRICS.counter(metrics::HEALTH_CHECKS),
                "Gateway stopped"
            );
            Ok(())
        }
        Cmd::Block { hash } => {
            let daemon = RpcForwarder::new(&cfg);
            let block = tools::download_block(&daemon, &hash).await?;
            println!("{}", serde_json::to_string_pretty(&block)?);
            Ok(())
        }
        Cmd::Tx { hash } => {
            let daemon = RpcForwarder::new(&cfg);
            let tx = tools::download_raw_transaction_verbose(&daemon, &hash).await?;
            println!("{}", serde_json::to_string_pretty(&tx)?);
            Ok(())
        }
        Cmd::Hex { op } => {
            match op {
                HexOp::Encode { value } => println!("{}", tools::bytes_to_hex(value.as_bytes())),
                HexOp::Decode { value } => println!("{:?}", tools::hex_to_bytes(&value)?),
            }
            Ok(())
        }
    }
}
