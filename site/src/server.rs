use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use std::net::SocketAddr;
use tokio::task::JoinHandle;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Certificate and key for the optional HTTPS listener
pub(crate) struct TlsFiles {
    pub(crate) port: u16,
    pub(crate) cert_path: String,
    pub(crate) key_path: String,
}

impl TlsFiles {
    /// Reads `HTTPS_PORT`, `TLS_CERT_PATH` and `TLS_KEY_PATH`; HTTPS stays off unless all are set
    pub(crate) fn from_env() -> Option<Self> {
        let port = std::env::var("HTTPS_PORT").ok()?.parse().ok()?;
        Some(Self {
            port,
            cert_path: std::env::var("TLS_CERT_PATH").ok()?,
            key_path: std::env::var("TLS_KEY_PATH").ok()?,
        })
    }
}

pub(crate) fn http_port() -> u16 {
    std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3001)
}

pub(crate) fn spawn_http_server(port: u16, app: Router) -> JoinHandle<std::io::Result<()>> {
    tokio::spawn(async move {
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        tracing::info!("HTTP server listening on {}", addr);
        axum_server::bind(addr).serve(app.into_make_service()).await
    })
}

pub(crate) async fn spawn_https_server(
    tls: TlsFiles,
    app: Router,
) -> std::io::Result<JoinHandle<std::io::Result<()>>> {
    let config = RustlsConfig::from_pem_file(&tls.cert_path, &tls.key_path).await?;

    let addr = SocketAddr::from(([0, 0, 0, 0], tls.port));
    tracing::info!("HTTPS server listening on {}", addr);
    Ok(tokio::spawn(async move {
        axum_server::bind_rustls(addr, config)
            .serve(app.into_make_service())
            .await
    }))
}

pub(crate) fn init_tracing(app_name: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        #[cfg(debug_assertions)]
        {
            format!("binaa_axum=trace,binaa=trace,{app_name}=trace,info").into()
        }

        #[cfg(not(debug_assertions))]
        {
            "info".into()
        }
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    #[cfg(debug_assertions)]
    tracing::info!("Debug build: detailed logs for {app_name} and the binaa crates");
    tracing::info!("Set RUST_LOG to change verbosity, e.g. RUST_LOG=debug");
}
