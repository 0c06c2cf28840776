#![forbid(unsafe_code)]

use std::env;
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use walletmatrix_ingest::{load_dataset, seed_catalog, IngestOptions, LoadOutcome};
use walletmatrix_server::{build_router, validate_startup_config, ApiConfig, AppState};
use walletmatrix_store::{CatalogStore, NewsletterStore};

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(default)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if env_bool("WALLETMATRIX_LOG_JSON", true) {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).expect("register SIGTERM");
        let mut sigint = signal(SignalKind::interrupt()).expect("register SIGINT");
        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    init_tracing();

    let bind_addr = env::var("WALLETMATRIX_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let wallets_dir = PathBuf::from(
        env::var("WALLETMATRIX_WALLETS_DIR").unwrap_or_else(|_| "data/wallets".to_string()),
    );
    let features_dir = PathBuf::from(
        env::var("WALLETMATRIX_FEATURES_DIR").unwrap_or_else(|_| "data/features".to_string()),
    );
    let newsletter_db = PathBuf::from(
        env::var("WALLETMATRIX_NEWSLETTER_DB")
            .unwrap_or_else(|_| "walletmatrix-newsletter.sqlite".to_string()),
    );

    let api = ApiConfig {
        max_body_bytes: env_usize("WALLETMATRIX_MAX_BODY_BYTES", 16 * 1024),
        max_uri_bytes: env_usize("WALLETMATRIX_MAX_URI_BYTES", 2048),
        catalog_ttl: Duration::from_secs(env_u64("WALLETMATRIX_CATALOG_TTL_SECS", 30)),
        enable_writes: env_bool("WALLETMATRIX_ENABLE_WRITES", true),
    };
    validate_startup_config(&api)?;

    let mut opts = IngestOptions::new(wallets_dir, features_dir);
    opts.max_document_bytes = env_u64("WALLETMATRIX_MAX_DOCUMENT_BYTES", opts.max_document_bytes);
    let catalog = match load_dataset(&opts).map_err(|e| format!("dataset load failed: {e}"))? {
        LoadOutcome::Loaded(load) => {
            for event in &load.events {
                debug!(stage = ?event.stage, name = %event.name, fields = ?event.fields, "ingest event");
            }
            for (kind, detail) in load.report.warnings() {
                warn!(kind = kind, detail = detail, "ingest warning");
            }
            info!(
                wallets = load.report.wallets_loaded,
                features = load.report.features_loaded,
                associations = load.report.associations_built,
                warnings = load.report.warning_count(),
                "dataset loaded"
            );
            load.catalog
        }
        LoadOutcome::NoData => {
            info!("no dataset documents found; serving the built-in seed dataset");
            seed_catalog()
        }
    };

    let newsletter = NewsletterStore::open(&newsletter_db)
        .map_err(|e| format!("newsletter store open failed: {e}"))?;
    let state = AppState::with_config(CatalogStore::new(catalog), newsletter, api);
    let app = build_router(state.clone());

    let addr: std::net::SocketAddr = bind_addr
        .parse()
        .map_err(|e| format!("invalid bind addr {bind_addr}: {e}"))?;
    let socket = if addr.is_ipv4() {
        tokio::net::TcpSocket::new_v4().map_err(|e| format!("socket v4 failed: {e}"))?
    } else {
        tokio::net::TcpSocket::new_v6().map_err(|e| format!("socket v6 failed: {e}"))?
    };
    socket
        .set_reuseaddr(true)
        .map_err(|e| format!("set_reuseaddr failed: {e}"))?;
    socket.bind(addr).map_err(|e| format!("bind failed: {e}"))?;
    let listener: TcpListener = socket
        .listen(1024)
        .map_err(|e| format!("listen failed: {e}"))?;
    info!("walletmatrix-server listening on {bind_addr}");
    let ready = state.ready.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            wait_for_shutdown_signal().await;
            // Stop advertising readiness first, then drain in-flight requests.
            ready.store(false, Ordering::Relaxed);
            let drain_ms = env_u64("WALLETMATRIX_SHUTDOWN_DRAIN_MS", 2000);
            tokio::time::sleep(Duration::from_millis(drain_ms)).await;
        })
        .await
        .map_err(|e| format!("server failed: {e}"))
}
