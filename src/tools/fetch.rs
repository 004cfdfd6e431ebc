use serde_json::{json, Value};
use tracing::debug;

use crate::rpc::DaemonRpc;
use crate::utils::Result;

/// `getblock <hash>`, returns the decoded `result`.
pub async fn download_block<D: DaemonRpc + ?Sized>(daemon: &D, block_hash: &str) -> Result<Value> {
    debug!(block_hash, "downloading block");
    daemon.call("getblock", vec![json!(block_hash)]).await?.into_result()
}

/// `getrawtransaction <hash> 1`, the verbose (decoded) form.
pub async fn download_raw_transaction_verbose<D: DaemonRpc + ?Sized>(daemon: &D, tx_hash: &str) -> Result<Value> {
    debug!(tx_hash, "downloading raw transaction");
    daemon.call("getrawtransaction", vec![json!(tx_hash), json!(1)]).await?.into_result()
}
