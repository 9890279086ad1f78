//! Graceful shutdown coordination for the gateway server, with a unified shutdown future
// Runtime module - shutdown coordination shared by the serve command and embedding code
use std::future::Future;
use tokio::signal;
use tokio::sync::watch;

/// Lightweight coordination for gateway shutdown
#[derive(Clone)]
pub struct GatewayRuntime {
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
}

impl GatewayRuntime {
    pub fn new() -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Self {
            shutdown_tx,
            shutdown_rx,
        }
    }

    /// Trigger a programmatic shutdown
    pub fn trigger_shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }

    /// Future resolving on Ctrl+C or programmatic shutdown
    /// Use this with axum's `with_graceful_shutdown()`
    pub fn create_shutdown_future(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut shutdown_rx = self.shutdown_rx.clone();

        async move {
            let requested = async {
                loop {
                    let stop = *shutdown_rx.borrow_and_update();
                    if stop {
                        return;
                    }
                    if shutdown_rx.changed().await.is_err() {
                        // Every sender is gone, only Ctrl+C can stop us now
                        std::future::pending::<()>().await;
                    }
                }
            };

            tokio::select! {
                _ = signal::ctrl_c() => {
                    log::info!("Shutdown signal (Ctrl+C) received");
                }
                _ = requested => {
                    log::info!("Shutdown requested");
                }
            }
        }
    }
}

impl Default for GatewayRuntime {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{sleep, timeout, Duration};

    #[tokio::test]
    async fn test_shutdown_future_completes_when_triggered() {
        let runtime = GatewayRuntime::new();
        let shutdown = runtime.create_shutdown_future();
        runtime.trigger_shutdown();

        timeout(Duration::from_secs(1), shutdown)
            .await
            .expect("shutdown future should resolve");
    }

    #[tokio::test]
    async fn test_shutdown_triggered_from_another_task() {
        let runtime = GatewayRuntime::new();
        let shutdown = runtime.create_shutdown_future();

        let trigger = runtime.clone();
        tokio::spawn(async move {
            sleep(Duration::from_millis(50)).await;
            trigger.trigger_shutdown();
        });

        timeout(Duration::from_secs(1), shutdown)
            .await
            .expect("shutdown future should resolve");
    }
}
