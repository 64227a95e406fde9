//! Seed FAQ catalog and fixed widget strings.

use trakship_core::types::{FaqCategory, FaqEntry};

/// Greeting shown when a chat session starts.
pub const WELCOME_MESSAGE: &str = "Hello! Welcome to TrakShip. How can I help you today?";

const QUICK_REPLIES: &[&str] = &[
    "Track my package",
    "Shipping rates",
    "Delivery time",
    "Contact support",
    "Create account",
    "Services offered",
];

/// The fixed quick-reply suggestions shown under every bot message.
pub fn quick_replies() -> Vec<String> {
    QUICK_REPLIES.iter().map(|s| s.to_string()).collect()
}

/// The default FAQ catalog, inserted when the faqs table is empty.
pub fn default_faqs() -> Vec<FaqEntry> {
    vec![
        FaqEntry::seed(
            "How can I track my shipment?",
            &["track", "tracking", "shipment", "package", "order", "status"],
            "You can track your shipment by entering your tracking number on our tracking page. \
             Simply go to the Track section and enter your tracking ID.",
            FaqCategory::Tracking,
        ),
        FaqEntry::seed(
            "What are your shipping rates?",
            &["price", "cost", "rates", "shipping", "fees", "charges", "how much"],
            "Our shipping rates depend on the package size, weight, and destination. Please visit \
             our Services page for detailed pricing information or contact our support team for a \
             custom quote.",
            FaqCategory::Pricing,
        ),
        FaqEntry::seed(
            "How long does delivery take?",
            &["delivery", "time", "how long", "duration", "days", "when", "arrive"],
            "Delivery times vary based on the service type and destination. Standard delivery \
             takes 3-5 business days, Express delivery takes 1-2 business days, and Same-day \
             delivery is available in select areas.",
            FaqCategory::Delivery,
        ),
        FaqEntry::seed(
            "What shipping services do you offer?",
            &["services", "types", "options", "shipping methods", "delivery options"],
            "We offer Standard Shipping, Express Delivery, Same-day Delivery, International \
             Shipping, and Freight Services. Each service has different pricing and delivery \
             timeframes.",
            FaqCategory::Shipping,
        ),
        FaqEntry::seed(
            "How do I create an account?",
            &["account", "register", "sign up", "signup", "create", "join"],
            "You can create an account by clicking the 'Sign Up' button on our homepage. You'll \
             need to provide your name, email, phone number, and address information.",
            FaqCategory::Account,
        ),
        FaqEntry::seed(
            "What if my package is lost or damaged?",
            &["lost", "damaged", "missing", "broken", "claim", "insurance"],
            "If your package is lost or damaged, please contact our customer support immediately. \
             We'll investigate the issue and provide appropriate compensation based on our \
             insurance policy.",
            FaqCategory::Support,
        ),
        FaqEntry::seed(
            "Can I change my delivery address?",
            &["change", "address", "delivery", "redirect", "modify"],
            "You can change your delivery address before the package is out for delivery. Please \
             contact our support team as soon as possible with your tracking number and new \
             address.",
            FaqCategory::Delivery,
        ),
        FaqEntry::seed(
            "Do you offer international shipping?",
            &["international", "overseas", "abroad", "global", "worldwide", "export"],
            "Yes, we offer international shipping to over 200 countries. International delivery \
             times and rates vary by destination. Additional customs fees may apply.",
            FaqCategory::Shipping,
        ),
        FaqEntry::seed(
            "How can I contact customer support?",
            &["contact", "support", "help", "customer service", "phone", "email"],
            "You can contact our customer support through this chatbot, email us at \
             support@trakship.com, or call us at 1-800-TRAKSHIP. Our support team is available \
             24/7.",
            FaqCategory::Support,
        ),
        FaqEntry::seed(
            "What payment methods do you accept?",
            &["payment", "pay", "credit card", "debit", "paypal", "methods", "billing"],
            "We accept all major credit cards (Visa, MasterCard, American Express), debit cards, \
             PayPal, and bank transfers. Payment is processed securely through our encrypted \
             system.",
            FaqCategory::General,
        ),
    ]
}
