use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};

use stockroom_catalog::{NewProduct, Product, ProductPatch};
use stockroom_core::ProductId;
use stockroom_infra::ProductQuery;

use crate::app::services::{AppServices, StockUpdateMessage};
use crate::app::{dto, errors};
use crate::authz;
use crate::context::ActorContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/:id/inventory", put(update_inventory))
        .route("/:id/inventory-history", get(inventory_history))
}

fn parse_product_id(id: &str) -> Result<ProductId, axum::response::Response> {
    id.parse().map_err(|_| {
        errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id")
    })
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::ProductListQuery>,
) -> axum::response::Response {
    let query = ProductQuery {
        category: query.category,
        min_price: query.min_price,
        max_price: query.max_price,
        search: query.search,
        featured: query.featured,
        sort: query.sort,
        page: query.page.unwrap_or(1),
        limit: query.limit.unwrap_or(ProductQuery::DEFAULT_LIMIT),
    };

    let page = match services.products.query(&query) {
        Ok(p) => p,
        Err(e) => return errors::store_error_to_response(e),
    };

    let items = page.items.iter().map(dto::product_to_json).collect::<Vec<_>>();
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

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<ActorContext>,
    Json(body): Json<dto::CreateProductRequest>,
) -> axum::response::Response {
    if let Err(resp) = authz::require_role(&actor, authz::CATALOG_MANAGERS) {
        return resp;
    }

    let product = match Product::create(NewProduct {
        name: body.name,
        description: body.description.unwrap_or_default(),
        price: body.price,
        category: body.category,
        tags: body.tags.unwrap_or_default(),
        quantity: body.quantity.unwrap_or(0),
        low_stock_threshold: body.low_stock_threshold,
        featured: body.featured.unwrap_or(false),
    }) {
        Ok(p) => p,
        Err(e) => return errors::domain_error_to_response(e),
    };

    if let Err(e) = services.products.insert(product.clone()) {
        return errors::store_error_to_response(e);
    }

    // Initial stock lands in the audit trail as well.
    if let Err(e) = services
        .inventory
        .record_product_created(&product, actor.user_id())
    {
        return errors::inventory_error_to_response(e);
    }

    (StatusCode::CREATED, Json(dto::product_to_json(&product))).into_response()
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_product_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.products.get(&id) {
        Ok(Some(product)) => (StatusCode::OK, Json(dto::product_to_json(&product))).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found"),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<ActorContext>,
    Path(id): Path<String>,
    Json(patch): Json<ProductPatch>,
) -> axum::response::Response {
    if let Err(resp) = authz::require_role(&actor, authz::CATALOG_MANAGERS) {
        return resp;
    }
    let id = match parse_product_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let (product, record) = match services
        .inventory
        .apply_product_edit(&id, &patch, actor.user_id())
    {
        Ok(v) => v,
        Err(e) => return errors::inventory_error_to_response(e),
    };

    if record.is_some() {
        let _ = services.realtime_tx.send(StockUpdateMessage {
            product_id: product.id,
            product_name: product.name.clone(),
            quantity: product.quantity,
        });
    }

    (StatusCode::OK, Json(dto::product_to_json(&product))).into_response()
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<ActorContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(resp) = authz::require_role(&actor, authz::CATALOG_MANAGERS) {
        return resp;
    }
    let id = match parse_product_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.products.delete(&id) {
        Ok(true) => (
            StatusCode::OK,
            Json(serde_json::json!({ "deleted": true })),
        )
            .into_response(),
        Ok(false) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found"),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn update_inventory(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<ActorContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateInventoryRequest>,
) -> axum::response::Response {
    if let Err(resp) = authz::require_role(&actor, authz::INVENTORY_ADJUSTERS) {
        return resp;
    }
    let id = match parse_product_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let (product, record) = match services.inventory.adjust_stock(
        &id,
        body.quantity,
        actor.user_id(),
        body.notes,
    ) {
        Ok(v) => v,
        Err(e) => return errors::inventory_error_to_response(e),
    };

    let _ = services.realtime_tx.send(StockUpdateMessage {
        product_id: product.id,
        product_name: product.name.clone(),
        quantity: product.quantity,
    });

    let actor_user = services.users.get(&record.performed_by).ok().flatten();
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "product": dto::product_to_json(&product),
            "record": dto::history_record_to_json(&record, actor_user.as_ref()),
        })),
    )
        .into_response()
}

pub async fn inventory_history(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<ActorContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(resp) = authz::require_role(&actor, authz::INVENTORY_ADJUSTERS) {
        return resp;
    }
    let id = match parse_product_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    // 404 for an unknown product, empty list for a known one with no history.
    match services.products.get(&id) {
        Ok(Some(_)) => {}
        Ok(None) => {
            return errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found");
        }
        Err(e) => return errors::store_error_to_response(e),
    }

    let records = match services.history.for_product(&id) {
        Ok(r) => r,
        Err(e) => return errors::store_error_to_response(e),
    };

    let items = records
        .iter()
        .map(|r| {
            let performed_by = services.users.get(&r.performed_by).ok().flatten();
            dto::history_record_to_json(r, performed_by.as_ref())
        })
        .collect::<Vec<_>>();

    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}
