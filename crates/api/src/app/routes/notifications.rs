use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, put},
};

use stockroom_core::NotificationId;
use stockroom_notifications::Notification;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::ActorContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list))
        .route("/count", get(unread_count))
        .route("/read-all", put(mark_all_read))
        .route("/:id/read", put(mark_read))
        .route("/:id", delete(remove))
}

fn parse_notification_id(id: &str) -> Result<NotificationId, axum::response::Response> {
    id.parse().map_err(|_| {
        errors::json_error(
            StatusCode::BAD_REQUEST,
            "invalid_id",
            "invalid notification id",
        )
    })
}

/// Fetch a notification and enforce that the actor owns it.
fn owned_notification(
    services: &AppServices,
    actor: &ActorContext,
    id: &NotificationId,
) -> Result<Notification, axum::response::Response> {
    let notification = services
        .notifications
        .get(id)
        .map_err(errors::store_error_to_response)?
        .ok_or_else(|| {
            errors::json_error(StatusCode::NOT_FOUND, "not_found", "notification not found")
        })?;

    if notification.user_id != actor.user_id() {
        return Err(errors::json_error(
            StatusCode::FORBIDDEN,
            "forbidden",
            "notification belongs to another user",
        ));
    }

    Ok(notification)
}

pub async fn list(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<ActorContext>,
    Query(query): Query<dto::NotificationListQuery>,
) -> axum::response::Response {
    let page = match services.notifications.for_user(
        &actor.user_id(),
        query.read,
        query.page.unwrap_or(1),
        query.limit.unwrap_or(20),
    ) {
        Ok(p) => p,
        Err(e) => return errors::store_error_to_response(e),
    };

    let items = page
        .items
        .iter()
        .map(dto::notification_to_json)
        .collect::<Vec<_>>();
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "items": items,
            "total": page.total,
            "page": page.page,
            "pages": page.pages,
        })),
    )
        .into_response()
}

pub async fn unread_count(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<ActorContext>,
) -> axum::response::Response {
    match services.notifications.unread_count(&actor.user_id()) {
        Ok(count) => (
            StatusCode::OK,
            Json(serde_json::json!({ "count": count })),
        )
            .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn mark_read(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<ActorContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_notification_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let mut notification = match owned_notification(&services, &actor, &id) {
        Ok(n) => n,
        Err(resp) => return resp,
    };

    notification.read = true;
    if let Err(e) = services.notifications.update(notification.clone()) {
        return errors::store_error_to_response(e);
    }

    (
        StatusCode::OK,
        Json(dto::notification_to_json(&notification)),
    )
        .into_response()
}

pub async fn mark_all_read(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<ActorContext>,
) -> axum::response::Response {
    match services.notifications.mark_all_read(&actor.user_id()) {
        Ok(updated) => (
            StatusCode::OK,
            Json(serde_json::json!({ "updated": updated })),
        )
            .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn remove(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<ActorContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_notification_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    if let Err(resp) = owned_notification(&services, &actor, &id) {
        return resp;
    }

    match services.notifications.delete(&id) {
        Ok(_) => (
            StatusCode::OK,
            Json(serde_json::json!({ "deleted": true })),
        )
            .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
