use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get},
    middleware,
};

use shared_utils::extractor::auth_middleware;
use shared_utils::AppState;

use crate::handlers;

pub fn patient_routes(state: Arc<AppState>) -> Router {
    // Patient records are doctor-only; the handlers check the role
    let protected_routes = Router::new()
        .route("/", get(handlers::list_patients).post(handlers::register_patient))
        .route("/{patient_id}", delete(handlers::delete_patient))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(protected_routes)
        .with_state(state)
}
