use crate::core::handler::RackHandler;
use crate::utils::error::{RackError, Result};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use url::Url;

/// 在指定位址上服務一個 RackHandler；埠號 0 表示由系統挑選
pub struct ExampleServer {
    local_addr: SocketAddr,
    base_url: Url,
    shutdown: Option<oneshot::Sender<()>>,
    join: Option<JoinHandle<std::io::Result<()>>>,
}

impl ExampleServer {
    pub async fn start(handler: RackHandler, addr: SocketAddr) -> Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;
        let base_url = Url::parse(&format!("http://{}", local_addr))?;
        let mount = handler.mount().prefix().to_string();
        let router = handler.into_router();

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let join = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await
        });

        tracing::info!("🚀 Serving {}/* on {}", mount, local_addr);

        Ok(Self {
            local_addr,
            base_url,
            shutdown: Some(shutdown_tx),
            join: Some(join),
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn port(&self) -> u16 {
        self.local_addr.port()
    }

    pub fn url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// 停止接受連線並等待進行中的請求完成
    pub async fn stop(mut self) -> Result<()> {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(join) = self.join.take() {
            join.await.map_err(|e| RackError::ApplicationError {
                message: format!("Server task failed: {}", e),
            })??;
        }
        tracing::info!("🛑 Server on {} stopped", self.local_addr);
        Ok(())
    }
}

impl Drop for ExampleServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(join) = self.join.take() {
            join.abort();
        }
    }
}
