//! Payment provider webhook handler (stub).

use axum::Json;
use serde::Deserialize;
use serde_json::json;
use storefront_core::types::DbId;

/// Payload posted by the payment provider.
///
/// Both fields are optional so an unrecognized payload still gets an ack
/// instead of a 400 the provider would endlessly retry.
#[derive(Debug, Deserialize)]
pub struct PaymentWebhook {
    pub order_id: Option<DbId>,
    pub status: Option<String>,
}

/// POST /webhooks/payment
///
/// Acknowledge a payment notification. The payload is logged but not acted
/// on.
// TODO: verify the provider signature and transition the order status once
// the payment provider contract is final.
pub async fn payment(Json(payload): Json<PaymentWebhook>) -> Json<serde_json::Value> {
    tracing::info!(
        order_id = ?payload.order_id,
        status = ?payload.status,
        "Payment webhook received",
    );

    Json(json!({ "message": "Webhook received" }))
}
