#![forbid(unsafe_code)]

//! axum service over the wallet catalog: router, handlers, shared app state
//! and validated configuration. The dataset is loaded once in `main`; the
//! handlers only talk to the stores.

pub mod config;

mod app;
mod handlers;
mod middleware;

pub use app::{build_router, AppState};
pub use config::{validate_startup_config, ApiConfig};

pub const CRATE_NAME: &str = "walletmatrix-server";
