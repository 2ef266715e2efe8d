//! The scripted conversation tree.
//!
//! A flat table of named nodes, each a canned response plus its follow-up
//! choices. Transitions are plain lookups on the option id a customer
//! clicked; unknown ids fall back to the welcome node. The order-management
//! paths that depend on session state are resolved in the router, not here.

use davenport_core::types::MessageOption;
use serde::Serialize;

/// A canned response: display text plus the follow-up options offered.
#[derive(Debug, Clone, Serialize)]
pub struct ScriptedResponse {
    pub text: String,
    pub options: Vec<MessageOption>,
}

fn node(text: &str, options: &[(&str, &str)]) -> ScriptedResponse {
    ScriptedResponse {
        text: text.to_string(),
        options: options
            .iter()
            .map(|(id, label)| MessageOption::new(*id, *label))
            .collect(),
    }
}

/// The welcome node, also the fallback for unknown paths.
pub fn welcome() -> ScriptedResponse {
    node(
        "Welcome to Elegant Furnishings! How can I help you today?",
        &[
            ("browse_products", "Browse Products"),
            ("order_management", "Manage My Order"),
            ("faq", "FAQ"),
            ("ask_question", "Ask a Question"),
        ],
    )
}

/// Look up the canned response for a path. Unknown paths resolve to the
/// welcome node.
pub fn scripted(path: &str) -> ScriptedResponse {
    match path {
        "welcome" | "main_menu" | "back_to_main_menu" => welcome(),

        "continue_chat" => node(
            "No problem! What else can I help you with?",
            &[
                ("browse_products", "Browse Products"),
                ("order_management", "Manage My Order"),
                ("back_to_main_menu", "Back to Main Menu"),
            ],
        ),

        // ---- Product browsing ----
        "browse_products" => node(
            "We have a wide range of furniture for every room. What type of furniture are you looking for?",
            &[
                ("living_room_products", "Living Room"),
                ("bedroom_products", "Bedroom"),
                ("dining_products", "Dining Room"),
                ("office_products", "Office"),
            ],
        ),
        "living_room_products" => node(
            "Our living room collection includes modern sofas starting at $899, coffee tables from $199, and TV stands from $349. Would you like to see any specific item?",
            &[
                ("sofa_info", "Modern Sofas"),
                ("coffee_table_info", "Coffee Tables"),
                ("tv_stand_info", "TV Stands"),
                ("browse_products", "Back to Categories"),
            ],
        ),
        "bedroom_products" => node(
            "Our bedroom collection features queen storage beds from $749 and matching bedside tables. Which piece would you like to explore?",
            &[
                ("bed_info", "Storage Beds"),
                ("browse_products", "Back to Categories"),
            ],
        ),
        "dining_products" => node(
            "Our dining room line is built around a solid oak 6-piece dining set at $1299. Would you like the details?",
            &[
                ("dining_set_info", "Dining Table Set"),
                ("browse_products", "Back to Categories"),
            ],
        ),
        "office_products" => node(
            "For the office we carry desks with cable management from $499 and bookshelves from $279. What would you like to see?",
            &[
                ("desk_info", "Office Desks"),
                ("bookshelf_info", "Bookshelves"),
                ("browse_products", "Back to Categories"),
            ],
        ),

        // ---- Product details ----
        "sofa_info" => node(
            "Our Modern Sofa ($899) features high-density foam cushions, stain-resistant fabric, and a solid wood frame with a 5-year warranty. It's available in multiple colors and ships within 3-5 business days.",
            &[
                ("order_sofa", "Order This Sofa"),
                ("living_room_products", "Other Living Room Items"),
                ("ask_sofa_question", "Ask About This Sofa"),
            ],
        ),
        "coffee_table_info" => node(
            "Our Coffee Table ($199) has a lift-top surface with a hidden storage compartment underneath - perfect for small living rooms.",
            &[
                ("living_room_products", "Other Living Room Items"),
                ("back_to_main_menu", "Back to Main Menu"),
            ],
        ),
        "tv_stand_info" => node(
            "Our TV Stand ($349) fits TVs up to 65 inches and includes built-in cable management and tempered glass doors.",
            &[
                ("living_room_products", "Other Living Room Items"),
                ("back_to_main_menu", "Back to Main Menu"),
            ],
        ),
        "bed_info" => node(
            "Our Queen Storage Bed ($749) is solid wood with 4 easy-glide storage drawers in the base. It fits a standard queen mattress with no box spring needed.",
            &[
                ("bedroom_products", "Other Bedroom Items"),
                ("back_to_main_menu", "Back to Main Menu"),
            ],
        ),
        "dining_set_info" => node(
            "Our Dining Table Set ($1299) is a 6-piece solid oak set with a scratch-resistant finish that seats 6. It ships in 1-2 weeks.",
            &[
                ("dining_products", "Other Dining Items"),
                ("back_to_main_menu", "Back to Main Menu"),
            ],
        ),
        "desk_info" => node(
            "Our Office Desk ($499) offers a spacious work surface, two storage drawers, and built-in cable management.",
            &[
                ("office_products", "Other Office Items"),
                ("back_to_main_menu", "Back to Main Menu"),
            ],
        ),
        "bookshelf_info" => node(
            "Our Bookshelf ($279) is a five-tier unit with adjustable shelves and included anti-tip hardware.",
            &[
                ("office_products", "Other Office Items"),
                ("back_to_main_menu", "Back to Main Menu"),
            ],
        ),
        "order_sofa" => node(
            "Great choice! To place an order for the Modern Sofa, confirm the quantity and your delivery details in the order form, or type your shipping address here and we'll get it started.",
            &[
                ("sofa_info", "Back to Sofa Details"),
                ("back_to_main_menu", "Back to Main Menu"),
            ],
        ),
        "ask_sofa_question" | "ask_question" | "ask_design_question" => node(
            "Sure! Type your question below and I'll do my best to help.",
            &[("back_to_main_menu", "Back to Main Menu")],
        ),

        // ---- Order management ----
        "order_management" => node(
            "What would you like to do with your order?",
            &[
                ("check_order_status", "Check Order Status"),
                ("change_delivery_date", "Change Delivery Date"),
                ("cancel_order", "Cancel Order"),
                ("main_menu", "Back to Main Menu"),
            ],
        ),
        "check_order_status" => node(
            "Please enter your order number to check its status. Your order number can be found in your confirmation email.",
            &[
                ("example_order_status", "Example (Order #12345)"),
                ("main_menu", "Back to Main Menu"),
            ],
        ),

        // ---- FAQ ----
        "faq" => node(
            "Here are the topics customers ask about most. Which one can I clear up for you?",
            &[
                ("delivery_faq", "Delivery & Shipping"),
                ("returns_faq", "Returns"),
                ("warranty_faq", "Warranty"),
                ("financing_faq", "Financing"),
            ],
        ),
        "delivery_faq" => node(
            "Standard delivery takes 3-5 business days and is free for orders over $999. Premium delivery with installation is available for $99.",
            &[
                ("faq", "More FAQ Topics"),
                ("back_to_main_menu", "Back to Main Menu"),
            ],
        ),
        "returns_faq" => node(
            "We offer a 30-day return policy with a 15% restocking fee. Items must be in their original condition.",
            &[
                ("faq", "More FAQ Topics"),
                ("back_to_main_menu", "Back to Main Menu"),
            ],
        ),
        "warranty_faq" => node(
            "Every piece carries a 1-year warranty, with extended warranty options available at checkout.",
            &[
                ("faq", "More FAQ Topics"),
                ("back_to_main_menu", "Back to Main Menu"),
            ],
        ),
        "financing_faq" => node(
            "Financing is available on purchases over $500. You'll see the available plans at checkout.",
            &[
                ("faq", "More FAQ Topics"),
                ("back_to_main_menu", "Back to Main Menu"),
            ],
        ),

        // ---- Design advice ----
        "design_advice" => node(
            "I'd be happy to help with design advice! What type of space are you looking to furnish or update?",
            &[
                ("small_space_design", "Small Space Solutions"),
                ("color_schemes", "Color Schemes"),
                ("furniture_arrangement", "Furniture Arrangement"),
                ("style_guidance", "Style Guidance"),
            ],
        ),
        "small_space_design" => node(
            "For small spaces, look for dual-purpose pieces: our storage beds, lift-top coffee tables, and wall-mounted shelving keep floors clear without giving up storage.",
            &[
                ("design_advice", "Back to Design Advice"),
                ("browse_products", "Browse Products"),
            ],
        ),
        "color_schemes" => node(
            "A safe approach is a neutral base (sofa, large pieces) with color in accents you can swap seasonally. Tell me your room's main colors and I can suggest pieces.",
            &[
                ("design_advice", "Back to Design Advice"),
                ("ask_design_question", "Ask Specific Question"),
            ],
        ),
        "furniture_arrangement" => node(
            "Start from your focal point (TV, fireplace, or window), keep walkways at least 30 inches wide, and float seating away from walls in larger rooms.",
            &[
                ("design_advice", "Back to Design Advice"),
                ("ask_design_question", "Ask Specific Question"),
            ],
        ),
        "style_guidance" => node(
            "We offer furniture in several popular styles. Which aesthetic are you interested in?",
            &[
                ("modern_style", "Modern & Contemporary"),
                ("traditional_style", "Traditional"),
                ("industrial_style", "Industrial"),
                ("scandinavian_style", "Scandinavian"),
            ],
        ),
        "modern_style" => node(
            "Modern and contemporary furniture features clean lines, neutral colors, and minimalist design. Our Modern Sofa, Glass Coffee Table, and Sleek TV Stand would create a cohesive modern living room. Would you like specific recommendations for your space?",
            &[
                ("living_room_products", "See Modern Living Room Items"),
                ("design_advice", "Back to Design Advice"),
                ("ask_design_question", "Ask Specific Question"),
            ],
        ),
        "traditional_style" => node(
            "Traditional style favors warm wood tones, classic silhouettes, and rich fabrics. Our solid oak dining set anchors a traditional dining room beautifully.",
            &[
                ("style_guidance", "Other Styles"),
                ("design_advice", "Back to Design Advice"),
            ],
        ),
        "industrial_style" => node(
            "Industrial style pairs raw materials - metal frames, reclaimed wood - with simple shapes. Our bookshelf and desk lines both come in industrial finishes.",
            &[
                ("style_guidance", "Other Styles"),
                ("design_advice", "Back to Design Advice"),
            ],
        ),
        "scandinavian_style" => node(
            "Scandinavian design is light, functional, and cozy: pale woods, clean lines, soft textiles. Our storage bed and coffee table fit the look well.",
            &[
                ("style_guidance", "Other Styles"),
                ("design_advice", "Back to Design Advice"),
            ],
        ),

        // Unknown paths fall back to welcome.
        _ => welcome(),
    }
}
