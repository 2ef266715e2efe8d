//! Order store: create, look up, reschedule, and cancel orders.
//!
//! Orders live in a flat in-memory list scanned linearly by id — the data
//! set is process-lifetime and small. Mutations return the uniform
//! [`OrderAction`] shape; business failures never surface as errors.

use std::sync::RwLock;

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use tracing::debug;

use davenport_core::types::{
    format_date, Order, OrderAction, OrderDraft, OrderItem, OrderStatus,
};

/// Random draws attempted before falling back to a linear id probe.
const MAX_ID_DRAWS: usize = 32;

/// Storage seam for orders.
pub trait OrderStore: Send + Sync {
    /// Create a new order from a draft: fresh 5-digit id, status
    /// `processing`, delivery estimated 14 days out.
    fn create(&self, draft: OrderDraft, customer_id: &str) -> Order;

    /// Linear scan by order id.
    fn find(&self, order_id: &str) -> Option<Order>;

    /// Overwrite the estimated delivery date. Rejected for unknown orders
    /// and for orders already shipped or delivered.
    fn reschedule(&self, order_id: &str, new_date: DateTime<Utc>) -> OrderAction;

    /// Set the order status to canceled. Same guard as [`reschedule`].
    ///
    /// [`reschedule`]: OrderStore::reschedule
    fn cancel(&self, order_id: &str) -> OrderAction;
}

/// RwLock-guarded in-memory order store.
#[derive(Debug, Default)]
pub struct MemoryOrderStore {
    orders: RwLock<Vec<Order>>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store preloaded with the given orders.
    pub fn with_seed(orders: Vec<Order>) -> Self {
        Self {
            orders: RwLock::new(orders),
        }
    }

    pub fn len(&self) -> usize {
        self.read(|orders| orders.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read<R>(&self, f: impl FnOnce(&Vec<Order>) -> R) -> R {
        let guard = match self.orders.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&guard)
    }

    fn write<R>(&self, f: impl FnOnce(&mut Vec<Order>) -> R) -> R {
        let mut guard = match self.orders.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut guard)
    }

    /// Draw a 5-digit id not already in use.
    ///
    /// Random draws keep the original id space; after `MAX_ID_DRAWS` misses
    /// a linear probe guarantees termination even on dense stores.
    fn generate_id(orders: &[Order]) -> String {
        let mut rng = rand::rng();
        for _ in 0..MAX_ID_DRAWS {
            let candidate = rng.random_range(10_000..100_000).to_string();
            if !orders.iter().any(|o| o.id == candidate) {
                return candidate;
            }
        }
        for n in 10_000..100_000u32 {
            let candidate = n.to_string();
            if !orders.iter().any(|o| o.id == candidate) {
                return candidate;
            }
        }
        // 90 000 live orders would be required to get here.
        rng.random_range(100_000..1_000_000).to_string()
    }
}

impl OrderStore for MemoryOrderStore {
    fn create(&self, draft: OrderDraft, customer_id: &str) -> Order {
        let now = Utc::now();
        self.write(|orders| {
            let id = Self::generate_id(orders);
            let order = Order {
                id: id.clone(),
                user_id: customer_id.to_string(),
                status: OrderStatus::Processing,
                total: f64::from(draft.quantity) * draft.product_price,
                items: vec![OrderItem {
                    product_id: draft.product_id.unwrap_or_else(|| "custom".to_string()),
                    name: draft.product_name,
                    quantity: draft.quantity,
                    price: draft.product_price,
                }],
                shipping_address: draft.shipping_address.unwrap_or_default(),
                payment_method: draft.payment_method.unwrap_or_default(),
                order_date: now,
                estimated_delivery: now + Duration::days(14),
                tracking_number: None,
            };
            orders.push(order.clone());
            debug!(order_id = %id, "Order created");
            order
        })
    }

    fn find(&self, order_id: &str) -> Option<Order> {
        self.read(|orders| orders.iter().find(|o| o.id == order_id).cloned())
    }

    fn reschedule(&self, order_id: &str, new_date: DateTime<Utc>) -> OrderAction {
        self.write(|orders| {
            let Some(order) = orders.iter_mut().find(|o| o.id == order_id) else {
                return OrderAction::rejected(format!(
                    "Order #{} not found in our system.",
                    order_id
                ));
            };

            if order.status.is_locked() {
                return OrderAction::rejected(format!(
                    "Order #{} has already been {} and delivery date cannot be changed.",
                    order_id, order.status
                ));
            }

            order.estimated_delivery = new_date;
            OrderAction::completed_with_message(
                format!(
                    "The delivery date for order #{} has been updated to {}.",
                    order_id,
                    format_date(&new_date)
                ),
                order.clone(),
            )
        })
    }

    fn cancel(&self, order_id: &str) -> OrderAction {
        self.write(|orders| {
            let Some(order) = orders.iter_mut().find(|o| o.id == order_id) else {
                return OrderAction::rejected(format!(
                    "Order #{} not found in our system.",
                    order_id
                ));
            };

            if order.status == OrderStatus::Canceled {
                return OrderAction::rejected(format!(
                    "Order #{} has already been canceled.",
                    order_id
                ));
            }

            if order.status.is_locked() {
                return OrderAction::rejected(format!(
                    "Order #{} has already been {} and cannot be canceled online. \
                     Please contact customer support.",
                    order_id, order.status
                ));
            }

            order.status = OrderStatus::Canceled;
            OrderAction::completed_with_message(
                format!(
                    "Order #{} has been successfully canceled. If payment was processed, \
                     a refund will be issued within 3-5 business days.",
                    order_id
                ),
                order.clone(),
            )
        })
    }
}
