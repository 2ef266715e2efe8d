//! Prompt assembly for the answer engine.
//!
//! Two prompt shapes: the retrieval-grounded prompt (chat history + retrieved
//! context + question) and the direct fallback prompt (static product/policy
//! summary + optional order details + recent messages).

use std::sync::OnceLock;

use regex::Regex;

use davenport_core::types::{format_date, format_money, Message, Order, Sender};

/// Static product and policy summary used by the direct fallback prompt.
const STORE_SUMMARY: &str = "\
Our furniture information includes:
- Modern sofas with high-density foam cushions ($899)
- Solid oak dining tables with 6 chairs ($1299)
- Queen storage beds with drawers ($749)
- Recliner chairs with USB charging ($599)
- TV stands for up to 65\" TVs ($349)
- Office desks with cable management ($499)
- Bookshelves with adjustable shelves ($279)
- Coffee tables with storage ($199)

Our policies:
- Free delivery for orders over $999
- Standard delivery takes 3-5 business days
- Premium delivery with installation is available for $99
- 30-day return policy with 15% restocking fee
- 1-year warranty with extended options available
- Financing available on purchases over $500";

fn order_number_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)order\s*#?\s*(\d{5,6})").expect("valid regex"))
}

fn bare_number_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(\d{5,6})\b").expect("valid regex"))
}

/// Extract an order number written as `order #12345` (case-insensitive,
/// `#` and spacing optional).
pub fn extract_order_number(text: &str) -> Option<String> {
    order_number_regex()
        .captures(text)
        .map(|caps| caps[1].to_string())
}

/// Extract an order number from text where one is expected: an `order #`
/// reference first, otherwise any bare 5-6 digit number.
pub fn extract_expected_order_number(text: &str) -> Option<String> {
    extract_order_number(text).or_else(|| {
        bare_number_regex()
            .captures(text)
            .map(|caps| caps[1].to_string())
    })
}

/// Format chat history as `Human:` / `Assistant:` lines for the grounded
/// prompt. Empty history renders as an explicit marker.
pub fn format_history(messages: &[Message]) -> String {
    if messages.is_empty() {
        return "No previous conversation.".to_string();
    }
    messages
        .iter()
        .map(|msg| {
            let role = match msg.sender {
                Sender::User => "Human",
                Sender::Bot => "Assistant",
            };
            format!("{}: {}", role, msg.text)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format chat history as raw `sender: text` lines for the direct prompt.
pub fn format_recent(messages: &[Message]) -> String {
    messages
        .iter()
        .map(|msg| {
            let sender = match msg.sender {
                Sender::User => "user",
                Sender::Bot => "bot",
            };
            format!("{}: {}", sender, msg.text)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Multi-line order summary embedded in the direct prompt.
pub fn order_details_block(order: &Order) -> String {
    let items = order
        .items
        .iter()
        .map(|i| format!("{} ({}) - ${}", i.name, i.quantity, format_money(i.price)))
        .collect::<Vec<_>>()
        .join(", ");

    let mut block = format!(
        "Order #{} Details:\nStatus: {}\nItems: {}\nTotal: ${}\nOrder Date: {}\nEstimated Delivery: {}",
        order.id,
        order.status,
        items,
        format_money(order.total),
        format_date(&order.order_date),
        format_date(&order.estimated_delivery),
    );
    if let Some(tracking) = &order.tracking_number {
        block.push_str(&format!("\nTracking Number: {}", tracking));
    }
    block
}

/// The retrieval-grounded prompt: history + retrieved context + question.
pub fn grounded_prompt(history: &[Message], context: &str, question: &str) -> String {
    format!(
        "You are a helpful customer service assistant for a furniture store.\n\
         Answer the question based on the following context and chat history.\n\
         If you don't know the answer, say that you don't know.\n\
         Be friendly, concise, and helpful.\n\n\
         Previous conversation:\n{}\n\n\
         Context: {}\n\n\
         Question: {}\n\n\
         Answer:",
        format_history(history),
        context,
        question
    )
}

/// The direct fallback prompt: static store summary, optional order details
/// for an order number mentioned in the question, and recent messages.
pub fn direct_prompt(order_info: Option<&str>, recent: &[Message], question: &str) -> String {
    format!(
        "You are a helpful furniture store assistant for Elegant Furnishings.\n\n\
         {}\n\n\
         {}\n\n\
         Recent conversation:\n{}\n\n\
         Customer: {}\n\n\
         Assistant:",
        STORE_SUMMARY,
        order_info.unwrap_or(""),
        format_recent(recent),
        question
    )
}

/// Rendered when a question references an order the store does not know.
pub fn unknown_order_note(order_number: &str) -> String {
    format!(
        "I couldn't find an order with number #{} in our system.",
        order_number
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use davenport_core::types::{OrderItem, OrderStatus};

    fn sample_order() -> Order {
        Order {
            id: "12346".to_string(),
            user_id: "u12346".to_string(),
            status: OrderStatus::Shipped,
            items: vec![
                OrderItem {
                    product_id: "p002".to_string(),
                    name: "Queen Storage Bed".to_string(),
                    quantity: 1,
                    price: 749.0,
                },
                OrderItem {
                    product_id: "p009".to_string(),
                    name: "Memory Foam Mattress".to_string(),
                    quantity: 2,
                    price: 499.0,
                },
            ],
            total: 1747.0,
            shipping_address: "456 Oak Ave".to_string(),
            payment_method: "paypal".to_string(),
            order_date: Utc.with_ymd_and_hms(2023, 6, 10, 15, 45, 0).unwrap(),
            estimated_delivery: Utc.with_ymd_and_hms(2023, 6, 25, 0, 0, 0).unwrap(),
            tracking_number: Some("TRK9876543210".to_string()),
        }
    }

    // ---- Order number extraction ----

    #[test]
    fn test_extract_order_number_variants() {
        assert_eq!(
            extract_order_number("where is order #12345?").as_deref(),
            Some("12345")
        );
        assert_eq!(
            extract_order_number("Order 12345 status").as_deref(),
            Some("12345")
        );
        assert_eq!(
            extract_order_number("ORDER# 123456 please").as_deref(),
            Some("123456")
        );
    }

    #[test]
    fn test_extract_order_number_requires_order_keyword() {
        assert!(extract_order_number("my number is 12345").is_none());
    }

    #[test]
    fn test_extract_order_number_rejects_short_numbers() {
        assert!(extract_order_number("order #1234").is_none());
    }

    #[test]
    fn test_extract_expected_accepts_bare_digits() {
        assert_eq!(
            extract_expected_order_number("12345").as_deref(),
            Some("12345")
        );
        assert_eq!(
            extract_expected_order_number("it's 123456 I think").as_deref(),
            Some("123456")
        );
        assert!(extract_expected_order_number("no numbers here").is_none());
    }

    #[test]
    fn test_extract_expected_prefers_order_reference() {
        let text = "ticket 99999 but order #12345";
        assert_eq!(extract_expected_order_number(text).as_deref(), Some("12345"));
    }

    // ---- History formatting ----

    #[test]
    fn test_format_history_roles() {
        let history = vec![Message::user("hi"), Message::bot("hello there")];
        let formatted = format_history(&history);
        assert_eq!(formatted, "Human: hi\nAssistant: hello there");
    }

    #[test]
    fn test_format_history_empty() {
        assert_eq!(format_history(&[]), "No previous conversation.");
    }

    #[test]
    fn test_format_recent_senders() {
        let history = vec![Message::user("hi"), Message::bot("hello")];
        assert_eq!(format_recent(&history), "user: hi\nbot: hello");
    }

    // ---- Order details block ----

    #[test]
    fn test_order_details_block() {
        let block = order_details_block(&sample_order());
        assert!(block.starts_with("Order #12346 Details:"));
        assert!(block.contains("Status: shipped"));
        assert!(block.contains("Queen Storage Bed (1) - $749"));
        assert!(block.contains("Memory Foam Mattress (2) - $499"));
        assert!(block.contains("Total: $1747"));
        assert!(block.contains("Estimated Delivery: 6/25/2023"));
        assert!(block.contains("Tracking Number: TRK9876543210"));
    }

    #[test]
    fn test_order_details_block_without_tracking() {
        let mut order = sample_order();
        order.tracking_number = None;
        let block = order_details_block(&order);
        assert!(!block.contains("Tracking Number"));
    }

    // ---- Prompt assembly ----

    #[test]
    fn test_grounded_prompt_contains_all_sections() {
        let history = vec![Message::user("do you sell beds?")];
        let prompt = grounded_prompt(&history, "Queen Storage Bed $749", "how much?");

        assert!(prompt.contains("customer service assistant for a furniture store"));
        assert!(prompt.contains("Human: do you sell beds?"));
        assert!(prompt.contains("Context: Queen Storage Bed $749"));
        assert!(prompt.contains("Question: how much?"));
        assert!(prompt.ends_with("Answer:"));
    }

    #[test]
    fn test_direct_prompt_includes_store_summary() {
        let prompt = direct_prompt(None, &[], "what's your return policy?");
        assert!(prompt.contains("Elegant Furnishings"));
        assert!(prompt.contains("30-day return policy with 15% restocking fee"));
        assert!(prompt.contains("Customer: what's your return policy?"));
        assert!(prompt.ends_with("Assistant:"));
    }

    #[test]
    fn test_direct_prompt_with_order_info() {
        let block = order_details_block(&sample_order());
        let prompt = direct_prompt(Some(&block), &[], "where is order #12346?");
        assert!(prompt.contains("Order #12346 Details:"));
        assert!(prompt.contains("Tracking Number: TRK9876543210"));
    }

    #[test]
    fn test_unknown_order_note() {
        assert_eq!(
            unknown_order_note("99999"),
            "I couldn't find an order with number #99999 in our system."
        );
    }
}
