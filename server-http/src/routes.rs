use crate::handlers;
use crate::middleware::require_token;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use shared::config::Config;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Build and configure the application router
pub fn build_router(state: AppState, config: &Config) -> Router {
    let auth = middleware::from_fn_with_state(state.clone(), require_token);

    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Object routes; reads by key stay unauthenticated
        .route(
            "/objects",
            get(handlers::list_objects).route_layer(auth.clone()),
        )
        .route(
            "/objects/{key}",
            post(handlers::upload_object)
                .route_layer(auth)
                .get(handlers::get_object),
        )
        // Middleware
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}
