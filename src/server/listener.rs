use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, Instrument};

use crate::config::Config;
use crate::http::connection::handle;

pub async fn run(cfg: Arc<Config>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.listen_addr).await?;
    info!(
        "Listening on {} (document root {})",
        cfg.listen_addr,
        cfg.document_root.display()
    );

    serve(listener, cfg).await
}

/// Accepts connections forever, one task per connection.
pub async fn serve(listener: TcpListener, cfg: Arc<Config>) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = listener.accept().await?;
        info!("Accepted connection from {}", peer);

        let config = cfg.clone();
        tokio::spawn(
            handle(socket, config).instrument(tracing::info_span!("conn", %peer)),
        );
    }
}
