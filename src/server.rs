//! Axum router and server setup.
//! Used by: main.

use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/metrics", get(handlers::metrics::metrics))
        .route("/user-login/", post(handlers::login::login))
        .route("/create-users/", post(handlers::register::create_user))
        .route("/protected-route", get(handlers::protected::protected))
        .route("/read-all-users", get(handlers::users::read_all))
        .route("/read-profile/:id", get(handlers::users::read_profile))
        .route("/users-update/:id", put(handlers::users::update_user))
        .route("/users-delete/:id", delete(handlers::users::delete_user))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run(state: AppState, addr: &str) -> std::io::Result<()> {
    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on {}", addr);
    axum::serve(listener, router).await
}
