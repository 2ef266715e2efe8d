//! Static reference data fixed at startup.
//!
//! The product catalog, the seed orders preloaded into the order store, and
//! the customer profiles. All three feed the retrieval corpus; the seed
//! orders additionally exercise every state of the order lifecycle.

use chrono::{TimeZone, Utc};

use crate::types::{
    CustomerProfile, Order, OrderItem, OrderStatus, Product, ProfilePreferences,
};

/// A document fed to the retrieval index at startup.
#[derive(Debug, Clone)]
pub struct SeedDocument {
    /// Which kind of record this came from ("product", "order", "profile").
    pub source: &'static str,
    /// JSON-serialized record text.
    pub text: String,
}

/// The full product catalog.
pub fn products() -> Vec<Product> {
    vec![
        Product {
            id: "p001".to_string(),
            name: "Modern Sofa".to_string(),
            category: "living-room".to_string(),
            price: 899.0,
            description: "Elegant modern sofa with high-density foam cushions and durable fabric upholstery.".to_string(),
            features: vec![
                "Stain-resistant fabric".to_string(),
                "Solid wood frame".to_string(),
                "5-year warranty".to_string(),
                "Multiple color options".to_string(),
            ],
            availability: "In stock".to_string(),
            dimensions: "84W x 38D x 34H inches".to_string(),
            related_products: vec!["p008".to_string(), "p005".to_string()],
        },
        Product {
            id: "p002".to_string(),
            name: "Queen Storage Bed".to_string(),
            category: "bedroom".to_string(),
            price: 749.0,
            description: "Queen-sized bed with 4 spacious storage drawers in the base.".to_string(),
            features: vec![
                "Solid wood construction".to_string(),
                "Easy-glide drawers".to_string(),
                "Fits standard queen mattress".to_string(),
                "No box spring needed".to_string(),
            ],
            availability: "In stock".to_string(),
            dimensions: "65W x 86D x 45H inches".to_string(),
            related_products: vec!["p009".to_string(), "p010".to_string()],
        },
        Product {
            id: "p003".to_string(),
            name: "Dining Table Set".to_string(),
            category: "dining-room".to_string(),
            price: 1299.0,
            description: "6-piece dining set including table and chairs made from solid oak.".to_string(),
            features: vec![
                "Solid oak construction".to_string(),
                "Scratch-resistant finish".to_string(),
                "Seats 6 people".to_string(),
                "Easy assembly".to_string(),
            ],
            availability: "Ships in 1-2 weeks".to_string(),
            dimensions: "72W x 42D x 30H inches (table)".to_string(),
            related_products: vec!["p011".to_string(), "p012".to_string()],
        },
        Product {
            id: "p004".to_string(),
            name: "Recliner Chair".to_string(),
            category: "living-room".to_string(),
            price: 599.0,
            description: "Power recliner with USB charging port and adjustable headrest.".to_string(),
            features: vec![
                "USB charging port".to_string(),
                "Power recline".to_string(),
                "Memory foam padding".to_string(),
            ],
            availability: "In stock".to_string(),
            dimensions: "35W x 40D x 41H inches".to_string(),
            related_products: vec!["p001".to_string()],
        },
        Product {
            id: "p005".to_string(),
            name: "TV Stand".to_string(),
            category: "living-room".to_string(),
            price: 349.0,
            description: "Media console for TVs up to 65 inches with cable management.".to_string(),
            features: vec![
                "Fits TVs up to 65\"".to_string(),
                "Cable management".to_string(),
                "Tempered glass doors".to_string(),
            ],
            availability: "In stock".to_string(),
            dimensions: "60W x 16D x 24H inches".to_string(),
            related_products: vec!["p008".to_string()],
        },
        Product {
            id: "p006".to_string(),
            name: "Office Desk".to_string(),
            category: "office".to_string(),
            price: 499.0,
            description: "Spacious work desk with built-in cable management and two drawers.".to_string(),
            features: vec![
                "Cable management".to_string(),
                "Two storage drawers".to_string(),
                "Scratch-resistant surface".to_string(),
            ],
            availability: "In stock".to_string(),
            dimensions: "55W x 28D x 30H inches".to_string(),
            related_products: vec!["p007".to_string()],
        },
        Product {
            id: "p007".to_string(),
            name: "Bookshelf".to_string(),
            category: "office".to_string(),
            price: 279.0,
            description: "Five-tier bookshelf with adjustable shelves.".to_string(),
            features: vec![
                "Adjustable shelves".to_string(),
                "Anti-tip hardware included".to_string(),
            ],
            availability: "In stock".to_string(),
            dimensions: "32W x 12D x 71H inches".to_string(),
            related_products: vec!["p006".to_string()],
        },
        Product {
            id: "p008".to_string(),
            name: "Coffee Table".to_string(),
            category: "living-room".to_string(),
            price: 199.0,
            description: "Lift-top coffee table with hidden storage compartment.".to_string(),
            features: vec![
                "Lift-top surface".to_string(),
                "Hidden storage".to_string(),
            ],
            availability: "In stock".to_string(),
            dimensions: "42W x 22D x 18H inches".to_string(),
            related_products: vec!["p001".to_string(), "p005".to_string()],
        },
    ]
}

/// Orders preloaded into the order store, covering each lifecycle state.
pub fn seed_orders() -> Vec<Order> {
    vec![
        Order {
            id: "12345".to_string(),
            user_id: "u12345".to_string(),
            status: OrderStatus::Processing,
            items: vec![OrderItem {
                product_id: "p001".to_string(),
                name: "Modern Sofa".to_string(),
                quantity: 1,
                price: 899.0,
            }],
            total: 899.0,
            shipping_address: "123 Main St, Anytown, US 12345".to_string(),
            payment_method: "credit_card".to_string(),
            order_date: Utc.with_ymd_and_hms(2023, 6, 15, 10, 30, 0).unwrap(),
            estimated_delivery: Utc.with_ymd_and_hms(2023, 6, 30, 0, 0, 0).unwrap(),
            tracking_number: None,
        },
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
                    quantity: 1,
                    price: 499.0,
                },
            ],
            total: 1248.0,
            shipping_address: "456 Oak Ave, Somewhere, US 54321".to_string(),
            payment_method: "paypal".to_string(),
            order_date: Utc.with_ymd_and_hms(2023, 6, 10, 15, 45, 0).unwrap(),
            estimated_delivery: Utc.with_ymd_and_hms(2023, 6, 25, 0, 0, 0).unwrap(),
            tracking_number: Some("TRK9876543210".to_string()),
        },
        Order {
            id: "12347".to_string(),
            user_id: "u12347".to_string(),
            status: OrderStatus::Delivered,
            items: vec![OrderItem {
                product_id: "p003".to_string(),
                name: "Dining Table Set".to_string(),
                quantity: 1,
                price: 1299.0,
            }],
            total: 1299.0,
            shipping_address: "789 Pine Rd, Nowhere, US 67890".to_string(),
            payment_method: "credit_card".to_string(),
            order_date: Utc.with_ymd_and_hms(2023, 3, 28, 9, 0, 0).unwrap(),
            estimated_delivery: Utc.with_ymd_and_hms(2023, 4, 10, 0, 0, 0).unwrap(),
            tracking_number: None,
        },
    ]
}

/// Customer profiles seeded into the retrieval corpus.
pub fn profiles() -> Vec<CustomerProfile> {
    vec![
        CustomerProfile {
            id: "u12345".to_string(),
            name: "John Smith".to_string(),
            email: "john.smith@example.com".to_string(),
            preferences: ProfilePreferences {
                room_interests: vec!["living-room".to_string(), "office".to_string()],
                style_preferences: vec!["modern".to_string(), "minimalist".to_string()],
                color_preferences: vec!["neutral".to_string(), "gray".to_string()],
            },
            order_history: vec!["12345".to_string()],
        },
        CustomerProfile {
            id: "u12346".to_string(),
            name: "Emily Johnson".to_string(),
            email: "emily.j@example.com".to_string(),
            preferences: ProfilePreferences {
                room_interests: vec!["bedroom".to_string(), "dining-room".to_string()],
                style_preferences: vec!["traditional".to_string(), "rustic".to_string()],
                color_preferences: vec!["warm".to_string(), "wood tones".to_string()],
            },
            order_history: vec!["12346".to_string()],
        },
    ]
}

/// JSON-serialize every catalog record into retrieval seed documents.
pub fn seed_documents() -> Vec<SeedDocument> {
    let mut docs = Vec::new();

    for product in products() {
        if let Ok(text) = serde_json::to_string(&product) {
            docs.push(SeedDocument {
                source: "product",
                text,
            });
        }
    }
    for order in seed_orders() {
        if let Ok(text) = serde_json::to_string(&order) {
            docs.push(SeedDocument {
                source: "order",
                text,
            });
        }
    }
    for profile in profiles() {
        if let Ok(text) = serde_json::to_string(&profile) {
            docs.push(SeedDocument {
                source: "profile",
                text,
            });
        }
    }

    docs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_unique_ids() {
        let products = products();
        let mut ids: Vec<_> = products.iter().map(|p| p.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), products.len());
    }

    #[test]
    fn test_seed_orders_cover_lifecycle() {
        let orders = seed_orders();
        assert!(orders.iter().any(|o| o.status == OrderStatus::Processing));
        assert!(orders.iter().any(|o| o.status == OrderStatus::Shipped));
        assert!(orders.iter().any(|o| o.status == OrderStatus::Delivered));
    }

    #[test]
    fn test_shipped_order_has_tracking_number() {
        let orders = seed_orders();
        let shipped = orders
            .iter()
            .find(|o| o.status == OrderStatus::Shipped)
            .unwrap();
        assert!(shipped.tracking_number.is_some());
    }

    #[test]
    fn test_order_totals_match_items() {
        for order in seed_orders() {
            let sum: f64 = order
                .items
                .iter()
                .map(|i| i.price * f64::from(i.quantity))
                .sum();
            assert_eq!(sum, order.total, "order {} total mismatch", order.id);
        }
    }

    #[test]
    fn test_seed_documents_cover_all_sources() {
        let docs = seed_documents();
        assert_eq!(
            docs.len(),
            products().len() + seed_orders().len() + profiles().len()
        );
        assert!(docs.iter().any(|d| d.source == "product"));
        assert!(docs.iter().any(|d| d.source == "order"));
        assert!(docs.iter().any(|d| d.source == "profile"));
    }

    #[test]
    fn test_seed_documents_are_valid_json() {
        for doc in seed_documents() {
            let parsed: serde_json::Value = serde_json::from_str(&doc.text).unwrap();
            assert!(parsed.is_object());
        }
    }
}
