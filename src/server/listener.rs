use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::http::connection::handle_connection;

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.server.listen_addr).await?;
    info!("Listening on {}", listener.local_addr()?);
    serve(listener, cfg).await
}

/// Accepts connections forever, one request each.
pub async fn serve(listener: TcpListener, cfg: &Config) -> anyhow::Result<()> {
    let site = Arc::new(cfg.site.clone());

    loop {
        let (socket, peer) = listener.accept().await?;
        info!("Accepted connection from {}", peer);

        if cfg.server.concurrent {
            let site = Arc::clone(&site);
            tokio::spawn(async move {
                if let Err(e) = handle_connection(socket, &site).await {
                    tracing::error!("Connection error from {}: {:#}", peer, e);
                }
            });
        } else if let Err(e) = handle_connection(socket, &site).await {
            tracing::error!("Connection error from {}: {:#}", peer, e);
        }
    }
}
