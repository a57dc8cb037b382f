use axum::{
    Router,
    routing::{get, post},
};

pub mod auth;
pub mod notifications;
pub mod products;
pub mod realtime;
pub mod system;
pub mod users;

/// Router for all authenticated endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/auth/user", get(auth::current_user))
        .route("/auth/logout", post(auth::logout))
        .nest("/users", users::router())
        .nest("/products", products::router())
        .nest("/notifications", notifications::router())
}
