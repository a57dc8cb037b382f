use std::sync::Arc;

use axum::{
    Json,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
};

use stockroom_auth::{NewUser, User, UserRole};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::RegisterRequest>,
) -> axum::response::Response {
    if body.password.len() < 6 {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "password must be at least 6 characters",
        );
    }

    let role = match body.role.as_deref() {
        None => UserRole::Customer,
        Some(s) => match s.parse() {
            Ok(r) => r,
            Err(e) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_role", e),
        },
    };

    match services
        .users
        .find_by_username_or_email(&body.username, &body.email)
    {
        Ok(Some(_)) => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "user_exists",
                "username or email already in use",
            );
        }
        Ok(None) => {}
        Err(e) => return errors::store_error_to_response(e),
    }

    let password_hash = match services.hasher.hash(&body.password) {
        Ok(h) => h,
        Err(e) => {
            return errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "hash_error",
                e.to_string(),
            );
        }
    };

    let user = match User::create(NewUser {
        username: body.username,
        email: body.email,
        password_hash,
        first_name: body.first_name,
        last_name: body.last_name,
        phone: body.phone,
        role,
    }) {
        Ok(u) => u,
        Err(e) => return errors::domain_error_to_response(e),
    };

    if let Err(e) = services.users.insert(user.clone()) {
        return errors::store_error_to_response(e);
    }

    // Materialize default settings now so preference lookups and notification
    // fan-out see the account immediately.
    if let Err(e) = services.settings.get_or_default(user.id) {
        return errors::store_error_to_response(e);
    }

    let token = match services.tokens.issue(user.id, user.role) {
        Ok(t) => t,
        Err(e) => {
            return errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "token_error",
                e.to_string(),
            );
        }
    };

    tracing::info!(user_id = %user.id, role = %user.role, "user registered");

    (
        StatusCode::CREATED,
        Json(serde_json::json!({
            "token": token,
            "user": dto::user_to_json(&user),
        })),
    )
        .into_response()
}

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::LoginRequest>,
) -> axum::response::Response {
    // One failure message for unknown user and wrong password alike.
    let user = match services.users.find_by_username(&body.username) {
        Ok(Some(u)) => u,
        Ok(None) => {
            return errors::json_error(
                StatusCode::UNAUTHORIZED,
                "invalid_credentials",
                "invalid credentials",
            );
        }
        Err(e) => return errors::store_error_to_response(e),
    };

    match services.hasher.verify(&body.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            return errors::json_error(
                StatusCode::UNAUTHORIZED,
                "invalid_credentials",
                "invalid credentials",
            );
        }
        Err(e) => {
            return errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "hash_error",
                e.to_string(),
            );
        }
    }

    let token = match services.tokens.issue(user.id, user.role) {
        Ok(t) => t,
        Err(e) => {
            return errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "token_error",
                e.to_string(),
            );
        }
    };

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "token": token,
            "user": dto::user_to_json(&user),
        })),
    )
        .into_response()
}

pub async fn current_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<crate::context::ActorContext>,
) -> axum::response::Response {
    match services.users.get(&actor.user_id()) {
        Ok(Some(user)) => (StatusCode::OK, Json(dto::user_to_json(&user))).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "user not found"),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// Tokens are stateless: logout is a client-side discard. The endpoint exists
/// so clients have a uniform call.
pub async fn logout() -> axum::response::Response {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "message": "logged out" })),
    )
        .into_response()
}
