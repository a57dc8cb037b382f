use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};

use stockroom_core::DomainError;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::ActorContext;

pub fn router() -> Router {
    Router::new()
        .route("/profile", get(get_profile).put(update_profile))
        .route("/settings", get(get_settings).put(update_settings))
        .route("/change-password", put(change_password))
}

pub async fn get_profile(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<ActorContext>,
) -> axum::response::Response {
    match services.users.get(&actor.user_id()) {
        Ok(Some(user)) => (StatusCode::OK, Json(dto::user_to_json(&user))).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "user not found"),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn update_profile(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<ActorContext>,
    Json(body): Json<dto::UpdateProfileRequest>,
) -> axum::response::Response {
    let mut user = match services.users.get(&actor.user_id()) {
        Ok(Some(u)) => u,
        Ok(None) => return errors::json_error(StatusCode::NOT_FOUND, "not_found", "user not found"),
        Err(e) => return errors::store_error_to_response(e),
    };

    if let Some(email) = &body.email {
        if email.trim().is_empty() || !email.contains('@') {
            return errors::domain_error_to_response(DomainError::validation(
                "email is not valid",
            ));
        }
        user.email = email.trim().to_lowercase();
    }
    if let Some(first_name) = body.first_name {
        user.first_name = Some(first_name);
    }
    if let Some(last_name) = body.last_name {
        user.last_name = Some(last_name);
    }
    if let Some(phone) = body.phone {
        user.phone = Some(phone);
    }
    user.touch();

    if let Err(e) = services.users.update(user.clone()) {
        return errors::store_error_to_response(e);
    }

    (StatusCode::OK, Json(dto::user_to_json(&user))).into_response()
}

pub async fn get_settings(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<ActorContext>,
) -> axum::response::Response {
    match services.settings.get_or_default(actor.user_id()) {
        Ok(settings) => (StatusCode::OK, Json(dto::settings_to_json(&settings))).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn update_settings(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<ActorContext>,
    Json(body): Json<dto::UpdateSettingsRequest>,
) -> axum::response::Response {
    let mut settings = match services.settings.get_or_default(actor.user_id()) {
        Ok(s) => s,
        Err(e) => return errors::store_error_to_response(e),
    };

    if let Some(v) = body.low_stock_alerts {
        settings.low_stock_alerts = v;
    }
    if let Some(v) = body.stock_update_notifications {
        settings.stock_update_notifications = v;
    }
    if let Some(v) = body.dark_mode {
        settings.dark_mode = v;
    }
    if let Some(v) = body.language {
        settings.language = v;
    }
    if let Some(v) = body.currency {
        settings.currency = v;
    }
    settings.touch();

    if let Err(e) = services.settings.upsert(settings.clone()) {
        return errors::store_error_to_response(e);
    }

    (StatusCode::OK, Json(dto::settings_to_json(&settings))).into_response()
}

pub async fn change_password(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<ActorContext>,
    Json(body): Json<dto::ChangePasswordRequest>,
) -> axum::response::Response {
    if body.new_password.len() < 6 {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "password must be at least 6 characters",
        );
    }

    let mut user = match services.users.get(&actor.user_id()) {
        Ok(Some(u)) => u,
        Ok(None) => return errors::json_error(StatusCode::NOT_FOUND, "not_found", "user not found"),
        Err(e) => return errors::store_error_to_response(e),
    };

    match services
        .hasher
        .verify(&body.current_password, &user.password_hash)
    {
        Ok(true) => {}
        Ok(false) => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "invalid_password",
                "current password is incorrect",
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

    user.password_hash = match services.hasher.hash(&body.new_password) {
        Ok(h) => h,
        Err(e) => {
            return errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "hash_error",
                e.to_string(),
            );
        }
    };
    user.touch();

    if let Err(e) = services.users.update(user) {
        return errors::store_error_to_response(e);
    }

    (
        StatusCode::OK,
        Json(serde_json::json!({ "message": "password changed" })),
    )
        .into_response()
}
