//! HTTP handlers
//!
//! All API handlers share [`AppState`]; `/metrics` carries its own state.

pub mod chat;
pub mod feedback;
pub mod health;
pub mod metrics_handler;
pub mod plans;
pub mod select;

use std::sync::Arc;

use crate::catalog::CatalogCache;
use crate::feedback::FeedbackStore;

/// Shared state injected into every API handler
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogCache>,
    pub feedback: Arc<FeedbackStore>,
}

impl AppState {
    pub fn new(catalog: Arc<CatalogCache>, feedback: Arc<FeedbackStore>) -> Self {
        Self { catalog, feedback }
    }
}
