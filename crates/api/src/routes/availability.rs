use axum::{
    middleware,
    routing::{delete, get},
    Router,
};
use std::sync::Arc;

use crate::{handlers, middleware::rate_limit::rate_limit, ApiState};

pub fn routes(state: Arc<ApiState>) -> Router<Arc<ApiState>> {
    // Only the public lookup is throttled
    let public = Router::new()
        .route(
            "/api/availability/slots",
            get(handlers::availability::get_slots),
        )
        .route_layer(middleware::from_fn_with_state(state, rate_limit));

    Router::new()
        .merge(public)
        .route(
            "/api/availability/windows",
            get(handlers::availability::list_windows)
                .post(handlers::availability::create_window)
                .put(handlers::availability::replace_windows),
        )
        .route(
            "/api/availability/windows/:id",
            delete(handlers::availability::delete_window),
        )
}
