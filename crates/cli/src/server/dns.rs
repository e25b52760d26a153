use djdns_domain::Config;
use djdns_infrastructure::dns::{DnsServer, DnsServerHandler};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Serves DNS until Ctrl-C.
pub async fn start_dns_server(config: &Config, handler: DnsServerHandler) -> anyhow::Result<()> {
    let bind_addr = config.server.dns_address();
    let server = Arc::new(
        DnsServer::new(Arc::new(handler))
            .with_tcp_idle_timeout(Duration::from_secs(config.server.tcp_idle_timeout_secs)),
    );

    {
        let server = server.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "Failed to listen for Ctrl-C");
                return;
            }
            info!("Shutdown signal received");
            server.close();
        });
    }

    info!(bind_address = %bind_addr, "Starting DNS server");
    server.run(&bind_addr).await?;
    Ok(())
}
