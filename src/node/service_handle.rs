use tokio::sync::watch;
use tokio::task::JoinHandle;
use anyhow::Result;

/// Holds running tasks and the shutdown channel for the gateway.
/// Call `shutdown()` to gracefully stop services.
pub struct ServiceHandle {
    shutdown_tx: watch::Sender<bool>,
    join_handles: Vec<JoinHandle<anyhow::Result<()>>>,
}

impl ServiceHandle {
    /// Create a new ServiceHandle and return it together with a Receiver clonable by tasks.
    pub fn new() -> (Self, watch::Receiver<bool>) {
        let (tx, rx) = watch::channel(false);
        let handle = ServiceHandle { shutdown_tx: tx, join_handles: vec![] };
        (handle, rx)
    }

    /// Attach a background task handle (so we wait on it on shutdown).
    pub fn attach(&mut self, h: JoinHandle<anyhow::Result<()>>) {
        self.join_handles.push(h);
    }

    /// Signal shutdown to all tasks and wait for them to drain.
    pub async fn shutdown(self) -> Result<()> {
        let _ = self.shutdown_tx.send(true);

        for res in futures::future::join_all(self.join_handles).await {
            match res {
                Ok(Ok(())) => {}
                Ok(Err(e)) => tracing::error!("service task returned error: {:?}", e),
                Err(e) => tracing::error!("task join error: {:?}", e),
            }
        }
        Ok(())
    }
}
