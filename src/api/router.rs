//! API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Routes are nested under `/api/`; CORS and request tracing are applied as
//! outer layers.

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;

/// Build the API router.
pub fn api_router(ctx: ApiContext) -> Router {
    let routes = Router::new()
        .route("/login", post(endpoints::auth::login))
        .route(
            "/drugs",
            get(endpoints::drugs::list).post(endpoints::drugs::create),
        )
        .route("/prescriptions", post(endpoints::prescriptions::create))
        .route("/prescriptions/:id", get(endpoints::prescriptions::detail))
        .route(
            "/prescriptions/:id/status",
            put(endpoints::prescriptions::update_status),
        )
        .route(
            "/prescriptions/:id/labels",
            get(endpoints::prescriptions::labels),
        )
        .route(
            "/dashboard/notifications",
            get(endpoints::dashboard::notifications),
        )
        .route(
            "/dashboard/statistics/drugs",
            get(endpoints::dashboard::drug_statistics),
        )
        .with_state(ctx);

    Router::new()
        .nest("/api", routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
