//! HTTP surface
//!
//! | Method | Path | Success |
//! |---|---|---|
//! | GET | /data?refresh=true\|false | 200, JSON array of records |
//! | POST | /data | 201, confirmation text |
//! | PUT | /data/:id | 200, confirmation text |
//! | DELETE | /data/:id | 200, confirmation text |
//! | GET | /health | 200, store and cache status |

pub mod error;
pub mod handlers;

use axum::{
    Router,
    routing::{get, put},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::service::CacheAsideService;

/// Build the application router over a shared service
pub fn router(service: Arc<CacheAsideService>) -> Router {
    Router::new()
        .route(
            "/data",
            get(handlers::list_records).post(handlers::create_record),
        )
        .route(
            "/data/:id",
            put(handlers::update_record).delete(handlers::delete_record),
        )
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}
