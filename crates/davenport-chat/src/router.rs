//! Conversation routing: scripted paths plus the stateful order flows.
//!
//! The router resolves option-click paths to canned responses and drives the
//! order-management flows through the per-session `PendingInput` state. Free
//! text is first offered to [`ConversationRouter::intercept`]; only when the
//! session is not waiting for structured input does the answer engine run.

use std::sync::Arc;

use tracing::debug;

use davenport_core::types::{parse_client_date, Message, MessageOption, Order, PendingInput};
use davenport_store::{OrderStore, SessionStore};

use crate::prompt::{extract_expected_order_number, order_details_block};
use crate::script::{self, ScriptedResponse};

/// A bot reply: display text plus follow-up options.
#[derive(Debug, Clone)]
pub struct BotReply {
    pub text: String,
    pub options: Vec<MessageOption>,
}

impl From<ScriptedResponse> for BotReply {
    fn from(resp: ScriptedResponse) -> Self {
        Self {
            text: resp.text,
            options: resp.options,
        }
    }
}

/// Routes option clicks and structured free-text input.
pub struct ConversationRouter {
    sessions: Arc<dyn SessionStore>,
    orders: Arc<dyn OrderStore>,
}

impl ConversationRouter {
    pub fn new(sessions: Arc<dyn SessionStore>, orders: Arc<dyn OrderStore>) -> Self {
        Self { sessions, orders }
    }

    /// Resolve a requested path to a bot reply.
    ///
    /// When a session id is supplied the reply is appended to the transcript
    /// and the session's pending-input state is updated; without one the
    /// reply is stateless.
    pub fn respond(&self, path: &str, session_id: Option<&str>) -> BotReply {
        let (reply, pending) = self.resolve(path, session_id);

        if let Some(sid) = session_id {
            self.sessions.append(
                sid,
                Message::bot_with_options(reply.text.clone(), reply.options.clone()),
            );
            self.sessions.set_pending_input(sid, pending);
        }

        reply
    }

    /// Offer free text to the pending-input state machine.
    ///
    /// Returns `Some` when the session was waiting for an order number or a
    /// delivery date and the text was consumed by that flow; `None` hands the
    /// text to the answer engine. The caller appends messages either way.
    pub fn intercept(&self, session_id: &str, text: &str) -> Option<BotReply> {
        match self.sessions.pending_input(session_id) {
            PendingInput::None => None,
            PendingInput::OrderNumber => self.intercept_order_number(session_id, text),
            PendingInput::DeliveryDate => Some(self.intercept_delivery_date(session_id, text)),
        }
    }

    // -- Path resolution --

    fn resolve(&self, path: &str, session_id: Option<&str>) -> (BotReply, PendingInput) {
        match path {
            "check_order_status" => (script::scripted(path).into(), PendingInput::OrderNumber),

            "change_delivery_date" => match session_id.and_then(|sid| self.sessions.active_order(sid)) {
                Some(order_id) => (
                    BotReply {
                        text: format!(
                            "Please enter a new delivery date for order #{} (MM/DD/YYYY).",
                            order_id
                        ),
                        options: vec![MessageOption::new("main_menu", "Back to Main Menu")],
                    },
                    PendingInput::DeliveryDate,
                ),
                None => (
                    BotReply {
                        text: "Please enter your order number so I can update the right order. \
                               Your order number can be found in your confirmation email."
                            .to_string(),
                        options: vec![MessageOption::new("main_menu", "Back to Main Menu")],
                    },
                    PendingInput::OrderNumber,
                ),
            },

            "cancel_order" => match session_id.and_then(|sid| self.sessions.active_order(sid)) {
                Some(order_id) => {
                    let action = self.orders.cancel(&order_id);
                    debug!(order_id = %order_id, success = action.success, "Cancel via conversation");
                    (
                        BotReply {
                            text: action
                                .message
                                .unwrap_or_else(|| "Your order has been canceled.".to_string()),
                            options: vec![
                                MessageOption::new("browse_products", "Browse Products"),
                                MessageOption::new("back_to_main_menu", "Back to Main Menu"),
                            ],
                        },
                        PendingInput::None,
                    )
                }
                None => (
                    BotReply {
                        text: "Please enter your order number so I can cancel the right order. \
                               Your order number can be found in your confirmation email."
                            .to_string(),
                        options: vec![MessageOption::new("main_menu", "Back to Main Menu")],
                    },
                    PendingInput::OrderNumber,
                ),
            },

            "example_order_status" => {
                let reply = match self.orders.find("12345") {
                    Some(order) => self.order_found_reply(session_id, &order),
                    None => self.order_missing_reply("12345"),
                };
                (reply, PendingInput::None)
            }

            _ => (script::scripted(path).into(), PendingInput::None),
        }
    }

    // -- Free-text flows --

    fn intercept_order_number(&self, session_id: &str, text: &str) -> Option<BotReply> {
        let order_number = extract_expected_order_number(text)?;

        let reply = match self.orders.find(&order_number) {
            Some(order) => {
                self.sessions.set_pending_input(session_id, PendingInput::None);
                self.order_found_reply(Some(session_id), &order)
            }
            // Stay waiting so the customer can retype the number.
            None => self.order_missing_reply(&order_number),
        };

        Some(reply)
    }

    fn intercept_delivery_date(&self, session_id: &str, text: &str) -> BotReply {
        let Some(new_date) = parse_client_date(text) else {
            return BotReply {
                text: "Sorry, I couldn't understand that date format. \
                       Please enter a date in MM/DD/YYYY format."
                    .to_string(),
                options: vec![],
            };
        };

        let Some(order_id) = self.sessions.active_order(session_id) else {
            self.sessions
                .set_pending_input(session_id, PendingInput::OrderNumber);
            return BotReply {
                text: "I need your order number before I can change the delivery date. \
                       Please enter it now."
                    .to_string(),
                options: vec![MessageOption::new("main_menu", "Back to Main Menu")],
            };
        };

        let action = self.orders.reschedule(&order_id, new_date);
        self.sessions.set_pending_input(session_id, PendingInput::None);

        BotReply {
            text: action
                .message
                .unwrap_or_else(|| "The delivery date has been updated successfully.".to_string()),
            options: vec![
                MessageOption::new("check_order_status", "View Updated Order"),
                MessageOption::new("back_to_main_menu", "Back to Main Menu"),
            ],
        }
    }

    // -- Reply builders --

    fn order_found_reply(&self, session_id: Option<&str>, order: &Order) -> BotReply {
        if let Some(sid) = session_id {
            self.sessions.set_active_order(sid, &order.id);
        }

        BotReply {
            text: order_details_block(order),
            options: vec![
                MessageOption::new("change_delivery_date", "Change Delivery Date"),
                MessageOption::new("cancel_order", "Cancel Order"),
                MessageOption::new("back_to_main_menu", "Back to Main Menu"),
            ],
        }
    }

    fn order_missing_reply(&self, order_number: &str) -> BotReply {
        BotReply {
            text: format!("Order #{} not found in our system.", order_number),
            options: vec![
                MessageOption::new("check_order_status", "Try Another Order Number"),
                MessageOption::new("back_to_main_menu", "Back to Main Menu"),
            ],
        }
    }
}
