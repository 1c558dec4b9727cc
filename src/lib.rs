//! Keystash - short secrets under a (service, account) identity in the
//! platform credential store
//!
//! Backends implement the four primitives of [`SecretStore`]; text and
//! single-key conveniences come from [`SecretStoreExt`] for every backend.
//! Backends are injected as `Arc<dyn SecretStore>` so tests can swap the
//! OS keychain for an in-memory store.

pub mod config;
pub mod mocks;
pub mod payload;
pub mod production;
pub mod state;
pub mod traits;

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use config::{BackendKind, ConfigError, StoreConfig};
pub use state::{build_store, shared};
pub use traits::{SecretStore, SecretStoreExt, StoreError};

/// Initialize logging to stdout and, when `log_dir` is given, a daily log file.
///
/// Keep the returned guard alive for as long as file logging is needed.
/// Calling this again after a subscriber is installed is a no-op.
pub fn init_logging(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "keystash=info".into()),
    );

    let (file_layer, guard) = match log_dir {
        Some(dir) => match std::fs::create_dir_all(dir) {
            Ok(()) => {
                let file_appender = rolling::daily(dir, "keystash.log");
                let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
                let layer = tracing_subscriber::fmt::layer()
                    .with_writer(non_blocking)
                    .with_ansi(false);
                (Some(layer), Some(guard))
            }
            Err(e) => {
                eprintln!("keystash: cannot create log dir {}: {e}", dir.display());
                (None, None)
            }
        },
        None => (None, None),
    };

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer()) // stdout
        .with(file_layer) // file
        .try_init()
        .is_ok();

    if installed {
        tracing::info!("Keystash logging initialized");
    }
    guard
}
