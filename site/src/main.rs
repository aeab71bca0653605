use binaa_axum::binaa_router;

mod server;

use crate::server::{TlsFiles, http_port, init_tracing, spawn_http_server, spawn_https_server};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // rustls needs a process-level CryptoProvider before any TLS config is built
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| "Failed to install default CryptoProvider")?;

    dotenvy::dotenv().ok();
    init_tracing(env!("CARGO_CRATE_NAME"));

    binaa_axum::init().await?;

    let app = binaa_router();

    let http_server = spawn_http_server(http_port(), app.clone());
    match TlsFiles::from_env() {
        Some(tls) => {
            let https_server = spawn_https_server(tls, app).await?;
            let (http, https) = tokio::try_join!(http_server, https_server)?;
            http?;
            https?;
        }
        None => http_server.await??,
    }

    Ok(())
}
