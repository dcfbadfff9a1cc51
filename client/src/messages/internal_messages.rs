use actix::Message;
use common::errors::StorefrontError;
use common::orders::CheckoutDetails;

use crate::screens::Screen;

/// Línea leída de la consola.
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct IncomingLine(pub String);

/// La entrada estándar se cerró.
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct InputClosed;

#[derive(Message, Debug, Clone)]
#[rtype(result = "Result<Screen, StorefrontError>")]
pub struct ShowHome;

#[derive(Message, Debug, Clone)]
#[rtype(result = "Result<Screen, StorefrontError>")]
pub struct SearchRestaurants {
    pub term: String,
}

#[derive(Message, Debug, Clone)]
#[rtype(result = "Result<Screen, StorefrontError>")]
pub struct FilterByCuisine {
    pub cuisine: String,
}

#[derive(Message, Debug, Clone)]
#[rtype(result = "Result<Screen, StorefrontError>")]
pub struct OpenMenu {
    pub restaurant_id: String,
    /// Pestaña a mostrar; la primera categoría si no se indica.
    pub category: Option<String>,
}

#[derive(Message, Debug, Clone)]
#[rtype(result = "Result<Screen, StorefrontError>")]
pub struct AddToCart {
    pub item_id: String,
}

#[derive(Message, Debug, Clone)]
#[rtype(result = "Result<Screen, StorefrontError>")]
pub struct ChooseOption {
    pub option_id: String,
}

#[derive(Message, Debug, Clone)]
#[rtype(result = "Result<Screen, StorefrontError>")]
pub struct ConfirmCustomization;

#[derive(Message, Debug, Clone)]
#[rtype(result = "Result<Screen, StorefrontError>")]
pub struct DiscardCustomization;

#[derive(Message, Debug, Clone)]
#[rtype(result = "Result<Screen, StorefrontError>")]
pub struct ShowCart;

#[derive(Message, Debug, Clone)]
#[rtype(result = "Result<Screen, StorefrontError>")]
pub struct ChangeQuantity {
    pub line_id: String,
    pub delta: i64,
}

#[derive(Message, Debug, Clone)]
#[rtype(result = "Result<Screen, StorefrontError>")]
pub struct RemoveItem {
    pub line_id: String,
}

#[derive(Message, Debug, Clone)]
#[rtype(result = "Result<Screen, StorefrontError>")]
pub struct ExportCart;

#[derive(Message, Debug, Clone)]
#[rtype(result = "Result<Screen, StorefrontError>")]
pub struct PlaceOrder {
    pub details: CheckoutDetails,
}

#[derive(Message, Debug, Clone)]
#[rtype(result = "Result<Screen, StorefrontError>")]
pub struct ShowOrders;

#[derive(Message, Debug, Clone)]
#[rtype(result = "Result<Screen, StorefrontError>")]
pub struct RefreshOrder {
    pub order_id: String,
}

#[derive(Message, Debug, Clone)]
#[rtype(result = "Result<Screen, StorefrontError>")]
pub struct CancelOrder {
    pub order_id: String,
}

#[derive(Message, Debug, Clone)]
#[rtype(result = "Result<Screen, StorefrontError>")]
pub struct ShowHistory;

#[derive(Message, Debug, Clone)]
#[rtype(result = "Result<Screen, StorefrontError>")]
pub struct Reorder {
    pub order_id: String,
}

/// Every request the console can make to the `Storefront` actor.
#[derive(Message, Debug, Clone)]
#[rtype(result = "Result<Screen, StorefrontError>")]
pub enum StorefrontCommand {
    // Home
    ShowHome(ShowHome),
    SearchRestaurants(SearchRestaurants),
    FilterByCuisine(FilterByCuisine),

    // Menu
    OpenMenu(OpenMenu),
    AddToCart(AddToCart),
    ChooseOption(ChooseOption),
    ConfirmCustomization(ConfirmCustomization),
    DiscardCustomization(DiscardCustomization),

    // Cart
    ShowCart(ShowCart),
    ChangeQuantity(ChangeQuantity),
    RemoveItem(RemoveItem),
    ExportCart(ExportCart),
    PlaceOrder(PlaceOrder),

    // Orders
    ShowOrders(ShowOrders),
    RefreshOrder(RefreshOrder),
    CancelOrder(CancelOrder),
    ShowHistory(ShowHistory),
    Reorder(Reorder),
}
