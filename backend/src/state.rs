//! Shared application state.
//!
//! - `AppContext`: configuration plus the two store handles. Every operation
//!   takes it by reference; it is cheap to clone into blocking tasks.
//! - `AppState`: the context plus the action gate, injected into actix as
//!   `web::Data` in `main.rs`.

use crate::config::AppConfig;
use crate::stores::{BlobStore, RowStore};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Configuration and store handles passed to every operation.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<AppConfig>,
    pub rows: Arc<dyn RowStore>,
    pub blobs: Arc<dyn BlobStore>,
}

impl AppContext {
    pub fn new(config: AppConfig, rows: Arc<dyn RowStore>, blobs: Arc<dyn BlobStore>) -> Self {
        AppContext {
            config: Arc::new(config),
            rows,
            blobs,
        }
    }
}

/// Per-server state shared by all actix workers.
#[derive(Clone)]
pub struct AppState {
    pub ctx: AppContext,

    /// Serialises actions: writing actions hold it exclusively, reading
    /// actions share it. Each action therefore runs to completion against
    /// the stores before a conflicting one starts.
    pub gate: Arc<RwLock<()>>,
}

impl AppState {
    pub fn new(ctx: AppContext) -> Self {
        AppState {
            ctx,
            gate: Arc::new(RwLock::new(())),
        }
    }
}
