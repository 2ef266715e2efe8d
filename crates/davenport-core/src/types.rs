//! Shared domain types: chat messages, orders, and catalog records.
//!
//! All wire-facing structs serialize with the field names the widget client
//! already speaks (snake_case order fields, lowercase senders/statuses,
//! ISO-8601 timestamps with millisecond precision).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Serde helpers for ISO-8601 timestamps with exactly millisecond precision
/// and a `Z` suffix (`2024-01-01T00:00:00.000Z`), matching the original wire
/// format.
pub mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Chat messages
// =============================================================================

/// Who produced a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// A follow-up choice attached to a bot message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageOption {
    pub id: String,
    pub label: String,
}

impl MessageOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// A single entry in a session transcript. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub sender: Sender,
    #[serde(with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<MessageOption>>,
}

impl Message {
    /// A message sent by the customer.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
            timestamp: Utc::now(),
            options: None,
        }
    }

    /// A bot message with no follow-up options.
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Bot,
            timestamp: Utc::now(),
            options: None,
        }
    }

    /// A bot message offering follow-up options.
    pub fn bot_with_options(text: impl Into<String>, options: Vec<MessageOption>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Bot,
            timestamp: Utc::now(),
            options: Some(options),
        }
    }
}

/// What kind of free-text input the bot is waiting for in a session.
///
/// Replaces the original widget's regex-scanning of prior bot messages with
/// an explicit per-session state field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PendingInput {
    #[default]
    None,
    /// The next message is expected to contain a 5-6 digit order number.
    OrderNumber,
    /// The next message is expected to contain a new delivery date.
    DeliveryDate,
}

// =============================================================================
// Orders
// =============================================================================

/// Order status lifecycle: `processing -> {shipped, canceled}`,
/// `shipped -> delivered`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Processing,
    Shipped,
    Delivered,
    Canceled,
}

impl OrderStatus {
    /// Once shipped or delivered, the order can no longer be rescheduled or
    /// canceled through the API.
    pub fn is_locked(&self) -> bool {
        matches!(self, OrderStatus::Shipped | OrderStatus::Delivered)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Canceled => "canceled",
        };
        f.write_str(s)
    }
}

/// A line item on an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: String,
    pub name: String,
    pub quantity: u32,
    pub price: f64,
}

/// A purchase record with a status lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    pub total: f64,
    pub shipping_address: String,
    pub payment_method: String,
    #[serde(with = "iso_millis")]
    pub order_date: DateTime<Utc>,
    #[serde(with = "iso_millis")]
    pub estimated_delivery: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
}

/// The details a customer supplies when placing an order.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    #[serde(default)]
    pub product_id: Option<String>,
    pub product_name: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    pub product_price: f64,
    #[serde(default)]
    pub shipping_address: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
}

fn default_quantity() -> u32 {
    1
}

/// Uniform outcome of an order mutation or lookup.
///
/// Business failures (unknown order, locked status) are expressed here with
/// `success: false` and a user-facing message — callers branch on `success`,
/// never on errors.
#[derive(Debug, Clone, Serialize)]
pub struct OrderAction {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(rename = "orderDetails", skip_serializing_if = "Option::is_none")]
    pub order: Option<Order>,
}

impl OrderAction {
    pub fn completed(order: Order) -> Self {
        Self {
            success: true,
            message: None,
            order: Some(order),
        }
    }

    pub fn completed_with_message(message: impl Into<String>, order: Order) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            order: Some(order),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            order: None,
        }
    }
}

// =============================================================================
// Catalog records
// =============================================================================

/// A static catalog entry. Read-only reference data, fixed at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub description: String,
    pub features: Vec<String>,
    pub availability: String,
    pub dimensions: String,
    pub related_products: Vec<String>,
}

/// Stored customer preferences used to seed the retrieval corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub preferences: ProfilePreferences,
    pub order_history: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfilePreferences {
    pub room_interests: Vec<String>,
    pub style_preferences: Vec<String>,
    pub color_preferences: Vec<String>,
}

// =============================================================================
// Formatting / parsing helpers
// =============================================================================

/// Format a price the way the original messages did: whole dollars without a
/// decimal point, fractional amounts with two places.
pub fn format_money(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{}", amount as i64)
    } else {
        format!("{:.2}", amount)
    }
}

/// Format a date for user-facing messages (`M/D/YYYY`).
pub fn format_date(dt: &DateTime<Utc>) -> String {
    dt.format("%-m/%-d/%Y").to_string()
}

/// Parse a customer-supplied delivery date.
///
/// Accepts RFC-3339 timestamps, `YYYY-MM-DD`, or `MM/DD/YYYY`; bare dates are
/// taken as midnight UTC.
pub fn parse_client_date(input: &str) -> Option<DateTime<Utc>> {
    let trimmed = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%d", "%m/%d/%Y", "%-m/%-d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    // ---- Timestamp serialization ----

    #[test]
    fn test_message_timestamp_serializes_with_millis() {
        let mut msg = Message::user("hello");
        msg.timestamp = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["timestamp"], "2024-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_message_roundtrip() {
        let msg = Message::bot_with_options(
            "Welcome!",
            vec![MessageOption::new("faq", "FAQ")],
        );
        let json = serde_json::to_string(&msg).unwrap();
        let back: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(back, msg);
    }

    #[test]
    fn test_message_deserializes_without_millis() {
        let json = r#"{"text":"hi","sender":"user","timestamp":"2024-01-01T00:00:00Z"}"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.sender, Sender::User);
        assert!(msg.options.is_none());
    }

    #[test]
    fn test_user_message_has_no_options() {
        let msg = Message::user("where is my order");
        let json = serde_json::to_value(&msg).unwrap();
        assert!(json.get("options").is_none());
    }

    // ---- Order status lifecycle ----

    #[test]
    fn test_status_locked() {
        assert!(!OrderStatus::Processing.is_locked());
        assert!(OrderStatus::Shipped.is_locked());
        assert!(OrderStatus::Delivered.is_locked());
        assert!(!OrderStatus::Canceled.is_locked());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(OrderStatus::Processing).unwrap(),
            "processing"
        );
        assert_eq!(
            serde_json::to_value(OrderStatus::Canceled).unwrap(),
            "canceled"
        );
    }

    #[test]
    fn test_status_display_matches_wire_format() {
        assert_eq!(OrderStatus::Shipped.to_string(), "shipped");
        assert_eq!(OrderStatus::Delivered.to_string(), "delivered");
    }

    // ---- Order serialization ----

    #[test]
    fn test_order_omits_absent_tracking_number() {
        let order = Order {
            id: "12345".to_string(),
            user_id: "u1".to_string(),
            status: OrderStatus::Processing,
            items: vec![],
            total: 899.0,
            shipping_address: "123 Main St".to_string(),
            payment_method: "credit_card".to_string(),
            order_date: Utc::now(),
            estimated_delivery: Utc::now(),
            tracking_number: None,
        };
        let json = serde_json::to_value(&order).unwrap();
        assert!(json.get("tracking_number").is_none());
        assert_eq!(json["status"], "processing");
    }

    #[test]
    fn test_order_action_rename() {
        let order = Order {
            id: "12345".to_string(),
            user_id: "u1".to_string(),
            status: OrderStatus::Processing,
            items: vec![],
            total: 100.0,
            shipping_address: String::new(),
            payment_method: String::new(),
            order_date: Utc::now(),
            estimated_delivery: Utc::now(),
            tracking_number: None,
        };
        let action = OrderAction::completed(order);
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["success"], true);
        assert!(json.get("orderDetails").is_some());
        assert!(json.get("message").is_none());
    }

    #[test]
    fn test_order_action_rejected() {
        let action = OrderAction::rejected("Order #99999 not found in our system.");
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Order #99999 not found in our system.");
        assert!(json.get("orderDetails").is_none());
    }

    // ---- Order draft deserialization ----

    #[test]
    fn test_order_draft_camel_case() {
        let json = r#"{
            "productId": "p001",
            "productName": "Modern Sofa",
            "quantity": 2,
            "productPrice": 899,
            "shippingAddress": "42 Elm St",
            "paymentMethod": "paypal"
        }"#;
        let draft: OrderDraft = serde_json::from_str(json).unwrap();
        assert_eq!(draft.product_id.as_deref(), Some("p001"));
        assert_eq!(draft.quantity, 2);
        assert_eq!(draft.product_price, 899.0);
    }

    #[test]
    fn test_order_draft_quantity_defaults_to_one() {
        let json = r#"{"productName": "Bookshelf", "productPrice": 279}"#;
        let draft: OrderDraft = serde_json::from_str(json).unwrap();
        assert_eq!(draft.quantity, 1);
        assert!(draft.product_id.is_none());
    }

    // ---- Formatting helpers ----

    #[test]
    fn test_format_money_whole() {
        assert_eq!(format_money(899.0), "899");
    }

    #[test]
    fn test_format_money_fractional() {
        assert_eq!(format_money(899.5), "899.50");
    }

    #[test]
    fn test_format_date() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 9, 12, 0, 0).unwrap();
        assert_eq!(format_date(&dt), "1/9/2024");
    }

    // ---- Date parsing ----

    #[test]
    fn test_parse_client_date_rfc3339() {
        let dt = parse_client_date("2024-01-01T00:00:00.000Z").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_client_date_bare() {
        let dt = parse_client_date("2024-01-01").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_client_date_us_format() {
        let dt = parse_client_date("01/15/2024").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap());
        let dt = parse_client_date("1/5/2024").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_client_date_garbage() {
        assert!(parse_client_date("next tuesday").is_none());
        assert!(parse_client_date("").is_none());
    }

    #[test]
    fn test_pending_input_default_is_none() {
        assert_eq!(PendingInput::default(), PendingInput::None);
    }
}
