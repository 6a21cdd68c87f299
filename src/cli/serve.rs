use crate::{config::Config, info, server::start_server};

/// Starts the web server, optionally on a different address than configured.
pub async fn serve(mut config: Config, addr: Option<String>, open_browser: bool) {
    if let Some(addr) = addr {
        config.server_addr = addr;
    }

    info!(
        "Using {} ({} charts, image fallback {:?})",
        config.api_url, config.chart_period, config.image_fallback
    );
    start_server(config, open_browser).await;
}
