use reqwest::StatusCode;
use serde_json::json;

use stockroom_auth::{Hs256TokenCodec, UserRole};
use stockroom_core::UserId;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(jwt_secret: &str) -> Self {
        // Same router as prod, bound to an ephemeral port.
        let app = stockroom_api::app::build_app(jwt_secret.to_string());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Register an account and return its bearer token.
async fn register(
    client: &reqwest::Client,
    base_url: &str,
    username: &str,
    role: &str,
) -> String {
    let res = client
        .post(format!("{base_url}/auth/register"))
        .json(&json!({
            "username": username,
            "email": format!("{username}@example.com"),
            "password": "hunter2!",
            "role": role,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let body: serde_json::Value = res.json().await.unwrap();
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn("test-secret").await;

    let res = reqwest::Client::new()
        .get(format!("{}/health", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn auth_required_for_protected_endpoints() {
    let srv = TestServer::spawn("test-secret").await;
    let client = reqwest::Client::new();

    for path in ["/auth/user", "/products", "/notifications"] {
        let res = client
            .get(format!("{}{path}", srv.base_url))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "path {path}");
    }
}

#[tokio::test]
async fn register_then_login_round_trip() {
    let srv = TestServer::spawn("test-secret").await;
    let client = reqwest::Client::new();

    register(&client, &srv.base_url, "ada", "owner").await;

    let res = client
        .post(format!("{}/auth/login", srv.base_url))
        .json(&json!({ "username": "ada", "password": "hunter2!" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    let token = body["token"].as_str().unwrap();
    assert_eq!(body["user"]["username"], "ada");
    assert_eq!(body["user"]["role"], "owner");
    assert!(body["user"]["password_hash"].is_null());

    let res = client
        .get(format!("{}/auth/user", srv.base_url))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let me: serde_json::Value = res.json().await.unwrap();
    assert_eq!(me["username"], "ada");
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let srv = TestServer::spawn("test-secret").await;
    let client = reqwest::Client::new();

    register(&client, &srv.base_url, "ada", "owner").await;

    let res = client
        .post(format!("{}/auth/login", srv.base_url))
        .json(&json!({ "username": "ada", "password": "wrong" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn duplicate_registration_rejected() {
    let srv = TestServer::spawn("test-secret").await;
    let client = reqwest::Client::new();

    register(&client, &srv.base_url, "ada", "owner").await;

    let res = client
        .post(format!("{}/auth/register", srv.base_url))
        .json(&json!({
            "username": "ada",
            "email": "other@example.com",
            "password": "hunter2!",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "user_exists");
}

#[tokio::test]
async fn expired_token_rejected() {
    let jwt_secret = "test-secret";
    let srv = TestServer::spawn(jwt_secret).await;

    let stale = Hs256TokenCodec::with_ttl(jwt_secret.as_bytes(), chrono::Duration::minutes(-5))
        .issue(UserId::new(), UserRole::Owner)
        .unwrap();

    let res = reqwest::Client::new()
        .get(format!("{}/auth/user", srv.base_url))
        .bearer_auth(stale)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn customer_cannot_manage_products() {
    let srv = TestServer::spawn("test-secret").await;
    let client = reqwest::Client::new();

    let token = register(&client, &srv.base_url, "carol", "customer").await;

    let res = client
        .post(format!("{}/products", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({ "name": "Widget", "price": 1500, "category": "tools" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // Reads are open to any authenticated user.
    let res = client
        .get(format!("{}/products", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn inventory_adjustment_audits_and_notifies() {
    let srv = TestServer::spawn("test-secret").await;
    let client = reqwest::Client::new();

    let owner = register(&client, &srv.base_url, "olive", "owner").await;
    // Registered before the adjustment, so default settings opt them in.
    let keeper = register(&client, &srv.base_url, "kim", "storekeeper").await;

    // Create: quantity 10, default threshold 5.
    let res = client
        .post(format!("{}/products", srv.base_url))
        .bearer_auth(&owner)
        .json(&json!({
            "name": "Widget",
            "price": 1500,
            "category": "tools",
            "quantity": 10,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: serde_json::Value = res.json().await.unwrap();
    let id = created["id"].as_str().unwrap().to_string();

    // Adjust down to 3: a removal that also crosses the low-stock threshold.
    let res = client
        .put(format!("{}/products/{}/inventory", srv.base_url, id))
        .bearer_auth(&owner)
        .json(&json!({ "quantity": 3, "notes": "damaged in transit" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["product"]["quantity"], 3);
    assert_eq!(body["product"]["low_stock"], true);
    assert_eq!(body["record"]["action"], "stock_removed");
    assert_eq!(body["record"]["quantity"], 7);

    // Audit trail, newest first.
    let res = client
        .get(format!("{}/products/{}/inventory-history", srv.base_url, id))
        .bearer_auth(&owner)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let history: serde_json::Value = res.json().await.unwrap();
    let items = history["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["action"], "stock_removed");
    assert_eq!(items[0]["performed_by"]["username"], "olive");
    assert_eq!(items[1]["action"], "product_created");

    // The storekeeper received both the stock update and the low-stock alert.
    let res = client
        .get(format!("{}/notifications/count", srv.base_url))
        .bearer_auth(&keeper)
        .send()
        .await
        .unwrap();
    let count: serde_json::Value = res.json().await.unwrap();
    assert_eq!(count["count"], 2);

    let res = client
        .get(format!("{}/notifications", srv.base_url))
        .bearer_auth(&keeper)
        .send()
        .await
        .unwrap();
    let inbox: serde_json::Value = res.json().await.unwrap();
    let kinds: Vec<&str> = inbox["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["type"].as_str().unwrap())
        .collect();
    assert!(kinds.contains(&"stock_update"));
    assert!(kinds.contains(&"low_stock"));

    // Mark everything read.
    let res = client
        .put(format!("{}/notifications/read-all", srv.base_url))
        .bearer_auth(&keeper)
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["updated"], 2);

    let res = client
        .get(format!("{}/notifications/count", srv.base_url))
        .bearer_auth(&keeper)
        .send()
        .await
        .unwrap();
    let count: serde_json::Value = res.json().await.unwrap();
    assert_eq!(count["count"], 0);
}

#[tokio::test]
async fn notifications_are_private_to_their_owner() {
    let srv = TestServer::spawn("test-secret").await;
    let client = reqwest::Client::new();

    let owner = register(&client, &srv.base_url, "olive", "owner").await;
    let keeper = register(&client, &srv.base_url, "kim", "storekeeper").await;

    let res = client
        .post(format!("{}/products", srv.base_url))
        .bearer_auth(&owner)
        .json(&json!({ "name": "Widget", "price": 1500, "category": "tools", "quantity": 10 }))
        .send()
        .await
        .unwrap();
    let id = res.json::<serde_json::Value>().await.unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string();

    client
        .put(format!("{}/products/{}/inventory", srv.base_url, id))
        .bearer_auth(&owner)
        .json(&json!({ "quantity": 20 }))
        .send()
        .await
        .unwrap();

    let inbox: serde_json::Value = client
        .get(format!("{}/notifications", srv.base_url))
        .bearer_auth(&keeper)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let notification_id = inbox["items"][0]["id"].as_str().unwrap();

    // Another user cannot flip or delete it.
    let res = client
        .put(format!(
            "{}/notifications/{}/read",
            srv.base_url, notification_id
        ))
        .bearer_auth(&owner)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client
        .delete(format!("{}/notifications/{}", srv.base_url, notification_id))
        .bearer_auth(&owner)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn product_edit_routes_quantity_through_audit() {
    let srv = TestServer::spawn("test-secret").await;
    let client = reqwest::Client::new();

    let owner = register(&client, &srv.base_url, "olive", "owner").await;

    let res = client
        .post(format!("{}/products", srv.base_url))
        .bearer_auth(&owner)
        .json(&json!({ "name": "Widget", "price": 1500, "category": "tools", "quantity": 10 }))
        .send()
        .await
        .unwrap();
    let id = res.json::<serde_json::Value>().await.unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string();

    let res = client
        .put(format!("{}/products/{}", srv.base_url, id))
        .bearer_auth(&owner)
        .json(&json!({ "name": "Widget Mk2", "quantity": 4 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let product: serde_json::Value = res.json().await.unwrap();
    assert_eq!(product["name"], "Widget Mk2");
    assert_eq!(product["quantity"], 4);

    let history: serde_json::Value = client
        .get(format!("{}/products/{}/inventory-history", srv.base_url, id))
        .bearer_auth(&owner)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(history["items"][0]["action"], "stock_adjusted");
    assert_eq!(history["items"][0]["previous_quantity"], 10);
    assert_eq!(history["items"][0]["new_quantity"], 4);
}

#[tokio::test]
async fn settings_default_and_update() {
    let srv = TestServer::spawn("test-secret").await;
    let client = reqwest::Client::new();

    let token = register(&client, &srv.base_url, "kim", "storekeeper").await;

    let settings: serde_json::Value = client
        .get(format!("{}/users/settings", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(settings["low_stock_alerts"], true);
    assert_eq!(settings["stock_update_notifications"], true);
    assert_eq!(settings["language"], "en");
    assert_eq!(settings["currency"], "NGN");

    let updated: serde_json::Value = client
        .put(format!("{}/users/settings", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({ "low_stock_alerts": false, "dark_mode": true }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(updated["low_stock_alerts"], false);
    assert_eq!(updated["dark_mode"], true);
    // Untouched fields keep their values.
    assert_eq!(updated["stock_update_notifications"], true);
}
