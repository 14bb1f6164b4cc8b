use std::sync::Arc;

use crate::config::Config;
use crate::store::TalentStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Read-only staffing data source. Postgres in production, in-memory in tests.
    pub store: Arc<dyn TalentStore>,
    pub config: Config,
}
