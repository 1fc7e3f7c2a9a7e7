pub mod consoles;

use axum::routing::get;
use axum::Router;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        .route("/api/consoles", get(consoles::list).post(consoles::create))
        .route(
            "/api/consoles/{id}",
            get(consoles::get)
                .put(consoles::update)
                .delete(consoles::delete),
        )
        .route("/api/consoles/{id}/audit-logs", get(consoles::audit_logs))
}
