use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::sarans::handlers;
use crate::features::sarans::services::SaranService;

/// Create routes for the sarans feature
pub fn routes(service: Arc<SaranService>) -> Router {
    Router::new()
        .route(
            "/api/sarans",
            get(handlers::list_sarans).post(handlers::create_saran),
        )
        .with_state(service)
}
