use thiserror::Error;

use crate::types::order_status::OrderStatus;

pub type Result<T> = std::result::Result<T, StorefrontError>;

/// Errores del dominio del storefront.
#[derive(Error, Debug)]
pub enum StorefrontError {
    #[error("Unknown order status: {0}")]
    UnknownStatus(String),

    #[error("Unknown restaurant: {0}")]
    UnknownRestaurant(String),

    #[error("Restaurant {0} has no menu")]
    MenuNotFound(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Unknown menu item: {0}")]
    UnknownMenuItem(String),

    #[error("No line {0} in the cart")]
    UnknownCartLine(String),

    #[error("Item {item_id} has no option {option_id}")]
    UnknownOption { item_id: String, option_id: String },

    #[error("Item {item_id} has more than one option group titled {title}")]
    DuplicateOptionGroup { item_id: String, title: String },

    #[error("Cart already holds items from {current}; empty it before ordering from {requested}")]
    MixedRestaurantCart { current: String, requested: String },

    #[error("Your cart is empty")]
    EmptyCart,

    #[error("No item is being customized")]
    NoCustomizationOpen,

    #[error("No restaurant menu is open")]
    NoMenuOpen,

    #[error("Unknown payment method: {0} (use card, paypal or cod)")]
    UnknownPaymentMethod(String),

    #[error("Unknown order: {0}")]
    UnknownOrder(String),

    #[error("Order {order_id} is already {status}")]
    OrderFinished { order_id: String, status: OrderStatus },

    #[error("Past order {order_id} has non-terminal status {status}")]
    NonTerminalPastOrder { order_id: String, status: OrderStatus },

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("Unable to read catalog: {0}")]
    CatalogIo(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
