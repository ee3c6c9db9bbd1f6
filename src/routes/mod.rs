use axum::{Router, routing::get};

use crate::state::AppState;

pub mod doc;
pub mod health;
pub mod products;
pub mod users;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/products", products::router())
        .nest("/users", users::router())
        .nest("/authentication", users::authentication_router())
}
