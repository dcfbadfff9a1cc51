use actix::prelude::*;
use chrono::Local;
use colored::Color;

use common::cart::{Cart, CartOwner};
use common::catalog::Catalog;
use common::customization::CustomizationDialog;
use common::errors::{Result, StorefrontError};
use common::logger::{LogLevel, Logger};
use common::orders::{OrderBook, line_id_for};
use common::pricing::PricingPolicy;
use common::tracker::TrackerView;
use common::types::dtos::RestaurantDTO;
use common::utils::format_money;

use crate::messages::*;
use crate::screens::{CartView, MenuView, Screen};

/// Actor Storefront: dueño exclusivo del estado de la sesión.
///
/// ## Responsibilities:
/// - Serve the home, menu, cart and order screens from the seed catalog.
/// - Apply cart mutations and the customization dialog selections.
/// - Place orders and move them along the status track.
pub struct Storefront {
    /// Nombre del comensal.
    pub customer: String,
    /// Restaurantes, menús y datos semilla.
    pub catalog: Catalog,
    pub cart: Cart,
    pub orders: OrderBook,
    pub policy: PricingPolicy,
    /// Restaurante cuyo menú está abierto.
    pub open_menu: Option<String>,
    /// Diálogo de personalización abierto y el restaurante del plato.
    pub dialog: Option<(CartOwner, CustomizationDialog)>,
    pub logger: Logger,
}

impl Storefront {
    pub fn new(customer: String, catalog: Catalog, policy: PricingPolicy, log_level: LogLevel) -> Self {
        let logger = Logger::new("Storefront", Color::Magenta).with_level(log_level);

        let cart = match &catalog.cart {
            Some(seed) => {
                let owner = catalog.restaurant(&seed.restaurant_id).ok().map(owner_of);
                Cart::new(owner, seed.items.clone())
            }
            None => Cart::default(),
        };
        let orders = OrderBook::new(catalog.active_orders.clone(), catalog.past_orders.clone());

        Storefront {
            customer,
            catalog,
            cart,
            orders,
            policy,
            open_menu: None,
            dialog: None,
            logger,
        }
    }

    fn cart_screen(&self) -> Screen {
        Screen::Cart(CartView {
            lines: self.cart.items().to_vec(),
            restaurant_name: self.cart.owner().map(|owner| owner.restaurant_name.clone()),
            breakdown: self.cart.breakdown(&self.policy),
            tax_percent: self.policy.tax_percent(),
            item_count: self.cart.item_count(),
        })
    }

    fn tracking_screen(&self) -> Screen {
        Screen::Tracking(
            self.orders
                .active()
                .iter()
                .map(|order| {
                    let tracker = TrackerView::build(order.status, Some(&order.estimated_delivery));
                    (order.clone(), tracker)
                })
                .collect(),
        )
    }

    fn home_screen(&self, heading: String, restaurants: Vec<&RestaurantDTO>) -> Screen {
        Screen::Home {
            heading,
            restaurants: restaurants.into_iter().cloned().collect(),
            cuisines: self.catalog.cuisines.clone(),
        }
    }

    fn added_notice(&self, name: &str) -> Screen {
        Screen::Notice(format!(
            "Added {} to your cart ({} items, {}).",
            name,
            self.cart.item_count(),
            format_money(self.cart.breakdown(&self.policy).total)
        ))
    }
}

fn owner_of(restaurant: &RestaurantDTO) -> CartOwner {
    CartOwner {
        restaurant_id: restaurant.id.clone(),
        restaurant_name: restaurant.name.clone(),
    }
}

impl Actor for Storefront {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        self.logger.info(format!(
            "Storefront ready for {}: {} restaurants, {} items in cart, {} active orders",
            self.customer,
            self.catalog.restaurants.len(),
            self.cart.item_count(),
            self.orders.active().len()
        ));
    }
}

impl Handler<ShowHome> for Storefront {
    type Result = Result<Screen>;

    fn handle(&mut self, _msg: ShowHome, _ctx: &mut Self::Context) -> Self::Result {
        let restaurants = self.catalog.restaurants.iter().collect();
        Ok(self.home_screen("Featured Restaurants".to_string(), restaurants))
    }
}

impl Handler<SearchRestaurants> for Storefront {
    type Result = Result<Screen>;

    fn handle(&mut self, msg: SearchRestaurants, _ctx: &mut Self::Context) -> Self::Result {
        self.logger.debug(format!("Search submitted: {}", msg.term));
        let found = self.catalog.search(&msg.term);
        Ok(self.home_screen(format!("Results for \"{}\"", msg.term.trim()), found))
    }
}

impl Handler<FilterByCuisine> for Storefront {
    type Result = Result<Screen>;

    fn handle(&mut self, msg: FilterByCuisine, _ctx: &mut Self::Context) -> Self::Result {
        let found = self.catalog.by_cuisine(&msg.cuisine);
        Ok(self.home_screen(format!("{} restaurants", msg.cuisine.trim()), found))
    }
}

impl Handler<OpenMenu> for Storefront {
    type Result = Result<Screen>;

    fn handle(&mut self, msg: OpenMenu, _ctx: &mut Self::Context) -> Self::Result {
        let restaurant = self.catalog.restaurant(&msg.restaurant_id)?.clone();
        let menu = self.catalog.menu(&msg.restaurant_id)?;

        let category = match &msg.category {
            Some(wanted) => menu
                .category(wanted)
                .ok_or_else(|| StorefrontError::UnknownCategory(wanted.clone()))?
                .to_string(),
            None => menu.categories.first().cloned().unwrap_or_default(),
        };
        let view = MenuView {
            restaurant,
            categories: menu.categories.clone(),
            items: menu.items_in(&category).into_iter().cloned().collect(),
            category,
        };

        self.logger.debug(format!("Menu {} opened on {}", msg.restaurant_id, view.category));
        self.open_menu = Some(msg.restaurant_id);
        Ok(Screen::Menu(view))
    }
}

impl Handler<AddToCart> for Storefront {
    type Result = Result<Screen>;

    fn handle(&mut self, msg: AddToCart, _ctx: &mut Self::Context) -> Self::Result {
        let restaurant_id = self.open_menu.clone().ok_or(StorefrontError::NoMenuOpen)?;
        let owner = owner_of(self.catalog.restaurant(&restaurant_id)?);
        let item = self.catalog.menu(&restaurant_id)?.item(&msg.item_id)?.clone();

        if item.is_customizable() {
            let dialog = CustomizationDialog::open(item);
            self.dialog = Some((owner, dialog.clone()));
            return Ok(Screen::Customize(dialog));
        }

        let line = CustomizationDialog::open(item).to_cart_line();
        let name = line.name.clone();
        self.cart.add(owner, line)?;
        self.logger.info(format!("Adding to cart (no customization): {}", name));
        Ok(self.added_notice(&name))
    }
}

impl Handler<ChooseOption> for Storefront {
    type Result = Result<Screen>;

    fn handle(&mut self, msg: ChooseOption, _ctx: &mut Self::Context) -> Self::Result {
        let (_, dialog) = self
            .dialog
            .as_mut()
            .ok_or(StorefrontError::NoCustomizationOpen)?;
        dialog.choose(&msg.option_id)?;
        Ok(Screen::Customize(dialog.clone()))
    }
}

impl Handler<ConfirmCustomization> for Storefront {
    type Result = Result<Screen>;

    fn handle(&mut self, _msg: ConfirmCustomization, _ctx: &mut Self::Context) -> Self::Result {
        let (owner, dialog) = self.dialog.take().ok_or(StorefrontError::NoCustomizationOpen)?;
        let line = dialog.to_cart_line();
        let name = line.name.clone();
        if let Err(e) = self.cart.add(owner.clone(), line) {
            // El diálogo queda abierto para poder descartarlo.
            self.dialog = Some((owner, dialog));
            return Err(e);
        }
        self.logger.info(format!(
            "Adding customized item to cart: {} at {}",
            name,
            format_money(dialog.unit_price())
        ));
        Ok(self.added_notice(&name))
    }
}

impl Handler<DiscardCustomization> for Storefront {
    type Result = Result<Screen>;

    fn handle(&mut self, _msg: DiscardCustomization, _ctx: &mut Self::Context) -> Self::Result {
        let (_, dialog) = self.dialog.take().ok_or(StorefrontError::NoCustomizationOpen)?;
        Ok(Screen::Notice(format!("Discarded changes to {}.", dialog.item.name)))
    }
}

impl Handler<ShowCart> for Storefront {
    type Result = Result<Screen>;

    fn handle(&mut self, _msg: ShowCart, _ctx: &mut Self::Context) -> Self::Result {
        Ok(self.cart_screen())
    }
}

impl Handler<ChangeQuantity> for Storefront {
    type Result = Result<Screen>;

    fn handle(&mut self, msg: ChangeQuantity, _ctx: &mut Self::Context) -> Self::Result {
        let quantity = self.cart.change_quantity(&msg.line_id, msg.delta)?;
        self.logger
            .debug(format!("Line {} now has quantity {}", msg.line_id, quantity));
        Ok(self.cart_screen())
    }
}

impl Handler<RemoveItem> for Storefront {
    type Result = Result<Screen>;

    fn handle(&mut self, msg: RemoveItem, _ctx: &mut Self::Context) -> Self::Result {
        let removed = self.cart.remove(&msg.line_id)?;
        self.logger.info(format!("Removed {} from the cart", removed.name));
        Ok(self.cart_screen())
    }
}

impl Handler<ExportCart> for Storefront {
    type Result = Result<Screen>;

    fn handle(&mut self, _msg: ExportCart, _ctx: &mut Self::Context) -> Self::Result {
        let json = serde_json::to_string_pretty(self.cart.items())?;
        Ok(Screen::CartJson(json))
    }
}

impl Handler<PlaceOrder> for Storefront {
    type Result = Result<Screen>;

    fn handle(&mut self, msg: PlaceOrder, _ctx: &mut Self::Context) -> Self::Result {
        let receipt = self
            .orders
            .place(&mut self.cart, &self.policy, msg.details, Local::now())?;
        self.logger.info(format!(
            "Order {} placed with {} for {}",
            receipt.order.id,
            receipt.details.payment,
            format_money(receipt.order.total)
        ));
        Ok(Screen::Receipt {
            receipt,
            tax_percent: self.policy.tax_percent(),
        })
    }
}

impl Handler<ShowOrders> for Storefront {
    type Result = Result<Screen>;

    fn handle(&mut self, _msg: ShowOrders, _ctx: &mut Self::Context) -> Self::Result {
        Ok(self.tracking_screen())
    }
}

impl Handler<RefreshOrder> for Storefront {
    type Result = Result<Screen>;

    fn handle(&mut self, msg: RefreshOrder, _ctx: &mut Self::Context) -> Self::Result {
        let status = self.orders.advance(&msg.order_id)?;
        self.logger
            .info(format!("Order {} is now {}", msg.order_id, status));
        if status.is_terminal() {
            let order = self.orders.find_past(&msg.order_id)?.clone();
            let tracker = TrackerView::build(order.status, None);
            return Ok(Screen::OrderClosed { order, tracker });
        }
        Ok(self.tracking_screen())
    }
}

impl Handler<CancelOrder> for Storefront {
    type Result = Result<Screen>;

    fn handle(&mut self, msg: CancelOrder, _ctx: &mut Self::Context) -> Self::Result {
        let order = self.orders.cancel(&msg.order_id)?;
        self.logger.warn(format!("Order {} cancelled", order.id));
        let tracker = TrackerView::build(order.status, None);
        Ok(Screen::OrderClosed { order, tracker })
    }
}

impl Handler<ShowHistory> for Storefront {
    type Result = Result<Screen>;

    fn handle(&mut self, _msg: ShowHistory, _ctx: &mut Self::Context) -> Self::Result {
        Ok(Screen::History(self.orders.past().to_vec()))
    }
}

impl Handler<Reorder> for Storefront {
    type Result = Result<Screen>;

    fn handle(&mut self, msg: Reorder, _ctx: &mut Self::Context) -> Self::Result {
        let restaurant_name = self.orders.find_past(&msg.order_id)?.restaurant_name.clone();
        let restaurant = self
            .catalog
            .restaurants
            .iter()
            .find(|restaurant| restaurant.name == restaurant_name);
        let menu = restaurant.and_then(|restaurant| self.catalog.menu(&restaurant.id).ok());
        let lines = self.orders.reorder_lines(&msg.order_id, menu)?;
        let owner = restaurant.map(owner_of).unwrap_or_else(|| CartOwner {
            restaurant_id: line_id_for(&restaurant_name),
            restaurant_name,
        });

        self.logger.info(format!("Reorder: {}", msg.order_id));
        self.cart.replace(Some(owner), lines);
        Ok(self.cart_screen())
    }
}

impl Handler<StorefrontCommand> for Storefront {
    type Result = Result<Screen>;

    fn handle(&mut self, msg: StorefrontCommand, ctx: &mut Self::Context) -> Self::Result {
        match msg {
            StorefrontCommand::ShowHome(msg) => self.handle(msg, ctx),
            StorefrontCommand::SearchRestaurants(msg) => self.handle(msg, ctx),
            StorefrontCommand::FilterByCuisine(msg) => self.handle(msg, ctx),
            StorefrontCommand::OpenMenu(msg) => self.handle(msg, ctx),
            StorefrontCommand::AddToCart(msg) => self.handle(msg, ctx),
            StorefrontCommand::ChooseOption(msg) => self.handle(msg, ctx),
            StorefrontCommand::ConfirmCustomization(msg) => self.handle(msg, ctx),
            StorefrontCommand::DiscardCustomization(msg) => self.handle(msg, ctx),
            StorefrontCommand::ShowCart(msg) => self.handle(msg, ctx),
            StorefrontCommand::ChangeQuantity(msg) => self.handle(msg, ctx),
            StorefrontCommand::RemoveItem(msg) => self.handle(msg, ctx),
            StorefrontCommand::ExportCart(msg) => self.handle(msg, ctx),
            StorefrontCommand::PlaceOrder(msg) => self.handle(msg, ctx),
            StorefrontCommand::ShowOrders(msg) => self.handle(msg, ctx),
            StorefrontCommand::RefreshOrder(msg) => self.handle(msg, ctx),
            StorefrontCommand::CancelOrder(msg) => self.handle(msg, ctx),
            StorefrontCommand::ShowHistory(msg) => self.handle(msg, ctx),
            StorefrontCommand::Reorder(msg) => self.handle(msg, ctx),
        }
    }
}
