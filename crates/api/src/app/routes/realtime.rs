use std::sync::Arc;

use axum::extract::Extension;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use serde::Deserialize;
use tokio::sync::broadcast::error::RecvError;

use stockroom_core::ProductId;

use crate::app::services::{AppServices, StockUpdateMessage};

/// Client-pushed frame; only `client_stock_update` is understood.
#[derive(Debug, Deserialize)]
struct ClientFrame {
    #[serde(rename = "type")]
    kind: String,
    product_id: ProductId,
    quantity: i64,
}

pub async fn ws(
    ws: WebSocketUpgrade,
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    ws.on_upgrade(move |socket| handle_socket(socket, services))
}

async fn handle_socket(mut socket: WebSocket, services: Arc<AppServices>) {
    let mut rx = services.realtime_tx.subscribe();

    let greeting = serde_json::json!({ "type": "connection_established" });
    if socket.send(Message::Text(greeting.to_string())).await.is_err() {
        return;
    }

    loop {
        tokio::select! {
            incoming = socket.recv() => {
                match incoming {
                    Some(Ok(Message::Text(text))) => {
                        handle_client_frame(&services, &text);
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(_)) => break,
                }
            }
            update = rx.recv() => {
                match update {
                    Ok(msg) => {
                        let frame = serde_json::json!({
                            "type": "stock_update",
                            "data": msg,
                        });
                        if socket.send(Message::Text(frame.to_string())).await.is_err() {
                            break;
                        }
                    }
                    // This consumer fell behind; skip the lost messages and
                    // pick the stream back up.
                    Err(RecvError::Lagged(_)) => continue,
                    Err(RecvError::Closed) => break,
                }
            }
        }
    }
}

/// Clients may push their own stock observations; these are re-broadcast to
/// every connection, with the product name resolved server-side.
fn handle_client_frame(services: &AppServices, text: &str) {
    let Ok(frame) = serde_json::from_str::<ClientFrame>(text) else {
        return;
    };
    if frame.kind != "client_stock_update" {
        return;
    }

    let Ok(Some(product)) = services.products.get(&frame.product_id) else {
        return;
    };

    let _ = services.realtime_tx.send(StockUpdateMessage {
        product_id: product.id,
        product_name: product.name,
        quantity: frame.quantity,
    });
}
