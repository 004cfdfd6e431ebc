//! Gateway configuration resolved from environment variables.
//!
//! Everything is read once at startup into an immutable [`GatewayConfig`] which
//! is then handed to the forwarder and the server. Nothing in request handling
//! looks at the environment.

use std::net::SocketAddr;
use std::str::FromStr;

use crate::utils::{GatewayError, Result};

pub const ENV_RPC_USER: &str = "RPC_USER";
pub const ENV_RPC_PASS: &str = "RPC_PASS";
pub const ENV_PHORED_HOST: &str = "PHORED_HOST";
pub const ENV_PHORED_RPC_PORT: &str = "PHORED_RPC_PORT";
pub const ENV_PHORED_RPC_PATH: &str = "PHORED_RPC_PATH";
pub const ENV_PHORED_WEB_PORT: &str = "PHORED_WEB_PORT";
pub const ENV_PHORED_PORT: &str = "PHORED_PORT";
pub const ENV_PHORED_DATA_DIR: &str = "PHORED_DATA_DIR";
pub const ENV_START_FROM_BEGINNING: &str = "START_FROM_BEGINNING";
pub const ENV_REDIS_HOST: &str = "REDIS_HOST";
pub const ENV_REDIS_PORT: &str = "REDIS_PORT";
pub const ENV_BACKUP_S3_DIR: &str = "PHORED_BACKUP_S3_DIR";
pub const ENV_BACKUP_S3_REGION: &str = "PHORED_BACKUP_S3_REGION";
pub const ENV_BACKUP_S3_INFO: &str = "PHORED_BACKUP_S3_INFO";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    // daemon credentials, absent means unauthenticated calls
    pub rpc_user: Option<String>,
    pub rpc_pass: Option<String>,

    pub phored_host: String,
    pub phored_rpc_port: u16,
    pub phored_rpc_path: String,
    pub phored_web_port: u16,

    // used by the ingestion and backup tooling, not by the gateway
    pub phored_con_port: u16,
    pub phored_data_dir: String,
    pub start_from_beginning: bool,
    pub redis_host: String,
    pub redis_port: u16,
    pub backup_s3_dir: String,
    pub backup_s3_region: String,
    pub backup_config_s3_file: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            rpc_user: None,
            rpc_pass: None,
            phored_host: "http://127.0.0.1".into(),
            phored_rpc_port: 11772,
            phored_rpc_path: String::new(),
            phored_web_port: 80,
            phored_con_port: 11771,
            phored_data_dir: "/root/.phore".into(),
            start_from_beginning: false,
            redis_host: "127.0.0.1".into(),
            redis_port: 6379,
            backup_s3_dir: "phored-db-backup".into(),
            backup_s3_region: "us-east-1".into(),
            backup_config_s3_file: "newest_prefix".into(),
        }
    }
}

impl GatewayConfig {
    /// Resolve from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve every key through `lookup`, falling back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let d = Self::default();
        Ok(Self {
            rpc_user: lookup(ENV_RPC_USER),
            rpc_pass: lookup(ENV_RPC_PASS),
            phored_host: lookup(ENV_PHORED_HOST).unwrap_or(d.phored_host),
            phored_rpc_port: parse_or(&lookup, ENV_PHORED_RPC_PORT, d.phored_rpc_port)?,
            phored_rpc_path: lookup(ENV_PHORED_RPC_PATH).unwrap_or(d.phored_rpc_path),
            phored_web_port: parse_or(&lookup, ENV_PHORED_WEB_PORT, d.phored_web_port)?,
            phored_con_port: parse_or(&lookup, ENV_PHORED_PORT, d.phored_con_port)?,
            phored_data_dir: lookup(ENV_PHORED_DATA_DIR).unwrap_or(d.phored_data_dir),
            start_from_beginning: lookup(ENV_START_FROM_BEGINNING)
                .map(|v| parse_flag(&v))
                .unwrap_or(d.start_from_beginning),
            redis_host: lookup(ENV_REDIS_HOST).unwrap_or(d.redis_host),
            redis_port: parse_or(&lookup, ENV_REDIS_PORT, d.redis_port)?,
            backup_s3_dir: lookup(ENV_BACKUP_S3_DIR).unwrap_or(d.backup_s3_dir),
            backup_s3_region: lookup(ENV_BACKUP_S3_REGION).unwrap_or(d.backup_s3_region),
            backup_config_s3_file: lookup(ENV_BACKUP_S3_INFO).unwrap_or(d.backup_config_s3_file),
        })
    }

    /// Daemon JSON-RPC endpoint: `<host>:<rpc port><rpc path>`.
    pub fn rpc_url(&self) -> String {
        format!("{}:{}{}", self.phored_host, self.phored_rpc_port, self.phored_rpc_path)
    }

    /// Address the gateway listens on.
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.phored_web_port))
    }

    pub fn has_credentials(&self) -> bool {
        self.rpc_user.is_some() && self.rpc_pass.is_some()
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| GatewayError::Config(format!("{key} has invalid value {raw:?}"))),
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes")
}
