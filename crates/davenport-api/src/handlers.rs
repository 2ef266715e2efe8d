//! Route handler functions for all API endpoints.
//!
//! Each handler extracts its JSON body, validates required fields, drives
//! the stores / router / answer engine, and returns a JSON response.
//! Business failures ride inside 200 responses as `success: false`; only
//! malformed requests and unexpected failures touch the HTTP status line.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use davenport_core::types::{
    format_date, format_money, parse_client_date, Message, MessageOption, Order, OrderAction,
    OrderDraft,
};

use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// Request types
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: Option<String>,
    pub session_id: Option<String>,
    #[serde(default)]
    pub chat_history: Option<Vec<Message>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotResponseRequest {
    pub path: Option<String>,
    pub session_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandleOrderRequest {
    pub order_details: Option<serde_json::Value>,
    pub session_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderNumberRequest {
    pub order_number: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDeliveryRequest {
    pub order_number: Option<String>,
    pub new_delivery_date: Option<String>,
}

// =============================================================================
// Response types
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponseBody {
    pub response: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BotResponseBody {
    pub text: String,
    pub options: Vec<MessageOption>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct HandleOrderResponse {
    pub success: bool,
    #[serde(rename = "orderNumber")]
    pub order_number: String,
    #[serde(rename = "orderDetails")]
    pub order_details: Order,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CancelOrderResponse {
    pub success: bool,
    pub message: String,
}

// =============================================================================
// Handler functions
// =============================================================================

/// POST /api/chat - free-text question answering.
///
/// Never surfaces LLM or retrieval failures as HTTP errors: the answer
/// engine degrades internally and always produces a response string.
pub async fn chat(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatResponseBody>, ApiError> {
    let message = match body.message.as_deref().map(str::trim) {
        Some(m) if !m.is_empty() => m.to_string(),
        _ => return Err(ApiError::BadRequest("Message is required".to_string())),
    };

    if message.chars().count() > state.config.chat.max_message_length {
        return Err(ApiError::BadRequest(format!(
            "Message exceeds maximum length of {} characters",
            state.config.chat.max_message_length
        )));
    }

    if let Some(sid) = &body.session_id {
        state.sessions.append(sid, Message::user(message.clone()));

        // Adopt the client's locally persisted transcript for fresh sessions.
        if let Some(history) = body.chat_history {
            if !history.is_empty() {
                state.sessions.seed_if_fresh(sid, history);
            }
        }

        // Structured input (order number / delivery date) takes precedence
        // over the answer engine.
        if let Some(reply) = state.router.intercept(sid, &message) {
            state
                .sessions
                .append(sid, Message::bot_with_options(reply.text.clone(), reply.options));
            return Ok(Json(ChatResponseBody {
                response: reply.text,
            }));
        }
    }

    let session_key = body.session_id.as_deref().unwrap_or_default();
    let answer = state.engine.answer(session_key, &message).await;

    if let Some(sid) = &body.session_id {
        state.sessions.append(sid, Message::bot(answer.text.clone()));
    }

    Ok(Json(ChatResponseBody {
        response: answer.text,
    }))
}

/// POST /api/bot-response - scripted conversation node lookup.
pub async fn bot_response(
    State(state): State<AppState>,
    Json(body): Json<BotResponseRequest>,
) -> Result<Json<BotResponseBody>, ApiError> {
    let Some(path) = body.path.filter(|p| !p.is_empty()) else {
        return Err(ApiError::BadRequest("Path is required".to_string()));
    };

    let reply = state.router.respond(&path, body.session_id.as_deref());

    Ok(Json(BotResponseBody {
        text: reply.text,
        options: reply.options,
    }))
}

/// GET /api/status - retrieval readiness probe.
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    if state.retriever.is_ready() {
        Json(StatusResponse {
            status: "ready".to_string(),
            message: "System is ready".to_string(),
        })
    } else {
        Json(StatusResponse {
            status: "initializing".to_string(),
            message: "System is initializing vector store, please wait...".to_string(),
        })
    }
}

/// POST /api/handle-order - create an order.
pub async fn handle_order(
    State(state): State<AppState>,
    Json(body): Json<HandleOrderRequest>,
) -> Result<Json<HandleOrderResponse>, ApiError> {
    let Some(details) = body.order_details else {
        return Err(ApiError::BadRequest("Order details are required".to_string()));
    };

    let draft: OrderDraft = serde_json::from_value(details)
        .map_err(|e| ApiError::BadRequest(format!("Invalid order details: {}", e)))?;

    let customer = body.session_id.clone().unwrap_or_else(|| "guest".to_string());
    let order = state.orders.create(draft, &customer);
    info!(order_id = %order.id, "Order placed");

    // Confirm into the chat transcript when the session already exists.
    if let Some(sid) = &body.session_id {
        if state.sessions.exists(sid) {
            let item = &order.items[0];
            state.sessions.append(
                sid,
                Message::bot(format!(
                    "Order #{} has been successfully placed for {} (Qty: {}). Total: ${}. Estimated delivery: {}.",
                    order.id,
                    item.name,
                    item.quantity,
                    format_money(order.total),
                    format_date(&order.estimated_delivery),
                )),
            );
        }
    }

    Ok(Json(HandleOrderResponse {
        success: true,
        order_number: order.id.clone(),
        order_details: order,
    }))
}

/// POST /api/check-order - order lookup.
pub async fn check_order(
    State(state): State<AppState>,
    Json(body): Json<OrderNumberRequest>,
) -> Result<Json<OrderAction>, ApiError> {
    let Some(order_number) = body.order_number.filter(|n| !n.is_empty()) else {
        return Err(ApiError::BadRequest("Order number is required".to_string()));
    };

    let action = match state.orders.find(&order_number) {
        Some(order) => OrderAction::completed(order),
        None => OrderAction::rejected(format!(
            "Order #{} not found in our system.",
            order_number
        )),
    };

    Ok(Json(action))
}

/// POST /api/update-delivery - reschedule an order's delivery date.
pub async fn update_delivery(
    State(state): State<AppState>,
    Json(body): Json<UpdateDeliveryRequest>,
) -> Result<Json<OrderAction>, ApiError> {
    let Some(order_number) = body.order_number.filter(|n| !n.is_empty()) else {
        return Err(ApiError::BadRequest("Order number is required".to_string()));
    };
    let Some(raw_date) = body.new_delivery_date.filter(|d| !d.is_empty()) else {
        return Err(ApiError::BadRequest(
            "New delivery date is required".to_string(),
        ));
    };

    let Some(new_date) = parse_client_date(&raw_date) else {
        return Err(ApiError::BadRequest(
            "newDeliveryDate must be a valid date".to_string(),
        ));
    };

    Ok(Json(state.orders.reschedule(&order_number, new_date)))
}

/// POST /api/cancel-order - cancel an order.
pub async fn cancel_order(
    State(state): State<AppState>,
    Json(body): Json<OrderNumberRequest>,
) -> Result<Json<CancelOrderResponse>, ApiError> {
    let Some(order_number) = body.order_number.filter(|n| !n.is_empty()) else {
        return Err(ApiError::BadRequest("Order number is required".to_string()));
    };

    let action = state.orders.cancel(&order_number);

    Ok(Json(CancelOrderResponse {
        success: action.success,
        message: action
            .message
            .unwrap_or_else(|| "Your order has been canceled.".to_string()),
    }))
}

/// Fallback for unmatched routes.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

// =============================================================================
// Tests
// =============================================================================
