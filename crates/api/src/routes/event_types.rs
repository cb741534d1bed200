use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/event-types",
            get(handlers::event_types::list_event_types)
                .post(handlers::event_types::create_event_type),
        )
        // GET takes a slug, PUT and DELETE take the id
        .route(
            "/api/event-types/:key",
            get(handlers::event_types::get_event_type)
                .put(handlers::event_types::update_event_type)
                .delete(handlers::event_types::delete_event_type),
        )
}
