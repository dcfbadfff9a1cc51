use chrono::{DateTime, Duration, Local};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::cart::Cart;
use crate::constants::{DELIVERY_WINDOW_MINUTES, MAX_DELIVERY_MINUTES, MIN_DELIVERY_MINUTES, ORDER_ID_PREFIX};
use crate::errors::{Result, StorefrontError};
use crate::pricing::{PriceBreakdown, PricingPolicy};
use crate::types::dtos::{ActiveOrderDTO, CartItemDTO, MenuDTO, PastOrderDTO, PurchasedItemDTO};
use crate::types::order_status::OrderStatus;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Card,
    Paypal,
    CashOnDelivery,
}

impl FromStr for PaymentMethod {
    type Err = StorefrontError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "card" => Ok(PaymentMethod::Card),
            "paypal" => Ok(PaymentMethod::Paypal),
            "cod" | "cash" => Ok(PaymentMethod::CashOnDelivery),
            _ => Err(StorefrontError::UnknownPaymentMethod(s.to_string())),
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Card => write!(f, "Credit/Debit Card"),
            PaymentMethod::Paypal => write!(f, "PayPal"),
            PaymentMethod::CashOnDelivery => write!(f, "Cash on Delivery"),
        }
    }
}

/// Datos ingresados en el checkout. No se valida su forma.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckoutDetails {
    pub address: String,
    pub payment: PaymentMethod,
}

/// Comprobante devuelto al confirmar un pedido.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OrderReceipt {
    pub order: ActiveOrderDTO,
    pub breakdown: PriceBreakdown,
    pub details: CheckoutDetails,
}

/// Pedidos activos y el historial de la sesión.
#[derive(Debug, Clone, Default)]
pub struct OrderBook {
    active: Vec<ActiveOrderDTO>,
    /// Más recientes primero.
    past: Vec<PastOrderDTO>,
}

impl OrderBook {
    pub fn new(active: Vec<ActiveOrderDTO>, mut past: Vec<PastOrderDTO>) -> Self {
        past.sort_by(|a, b| b.date.cmp(&a.date));
        OrderBook { active, past }
    }

    pub fn active(&self) -> &[ActiveOrderDTO] {
        &self.active
    }

    pub fn past(&self) -> &[PastOrderDTO] {
        &self.past
    }

    /// Turns the cart into a confirmed order and empties it.
    ///
    /// ## Arguments
    /// * `cart` - The cart being checked out; must hold at least one line.
    /// * `policy` - Tax rate and delivery fee used for the order total.
    /// * `details` - Delivery address and payment method.
    /// * `now` - Placement time, used for the date and the delivery estimate.
    pub fn place(
        &mut self,
        cart: &mut Cart,
        policy: &PricingPolicy,
        details: CheckoutDetails,
        now: DateTime<Local>,
    ) -> Result<OrderReceipt> {
        if cart.is_empty() {
            return Err(StorefrontError::EmptyCart);
        }
        let restaurant_name = cart
            .owner()
            .map(|owner| owner.restaurant_name.clone())
            .unwrap_or_default();
        let breakdown = cart.breakdown(policy);

        let order = ActiveOrderDTO {
            id: new_order_id(),
            status: OrderStatus::Confirmed,
            estimated_delivery: estimate_delivery_window(now),
            restaurant_name,
            placed_on: now.date_naive(),
            items: cart.items().iter().map(PurchasedItemDTO::from).collect(),
            total: breakdown.total,
        };
        self.active.push(order.clone());
        cart.clear();

        Ok(OrderReceipt {
            order,
            breakdown,
            details,
        })
    }

    /// Moves an active order one stage forward; a delivered order is archived.
    pub fn advance(&mut self, order_id: &str) -> Result<OrderStatus> {
        let pos = self.active_position(order_id)?;
        let current = self.active[pos].status;
        let next = current.next().ok_or_else(|| StorefrontError::OrderFinished {
            order_id: order_id.to_string(),
            status: current,
        })?;

        if next.is_terminal() {
            let order = self.active.remove(pos);
            self.archive(PastOrderDTO::archive(order, next)?);
        } else {
            self.active[pos].status = next;
        }
        Ok(next)
    }

    pub fn cancel(&mut self, order_id: &str) -> Result<PastOrderDTO> {
        let pos = self.active_position(order_id)?;
        let order = self.active.remove(pos);
        let past = PastOrderDTO::archive(order, OrderStatus::Cancelled)?;
        self.archive(past.clone());
        Ok(past)
    }

    pub fn find_past(&self, order_id: &str) -> Result<&PastOrderDTO> {
        self.past
            .iter()
            .find(|order| order.id == order_id)
            .ok_or_else(|| StorefrontError::UnknownOrder(order_id.to_string()))
    }

    /// Líneas de carrito equivalentes a un pedido del historial.
    ///
    /// Items found by name in `menu` take the menu id and current price so
    /// that adding the same dish later merges into the same line; the rest
    /// keep the paid price under a slug id.
    pub fn reorder_lines(&self, order_id: &str, menu: Option<&MenuDTO>) -> Result<Vec<CartItemDTO>> {
        let order = self.find_past(order_id)?;
        let mut lines: Vec<CartItemDTO> = Vec::new();
        for item in order.items.iter().filter(|item| item.quantity > 0) {
            let line = match menu.and_then(|menu| menu.item_named(&item.name)) {
                Some(menu_item) => CartItemDTO {
                    id: menu_item.id.clone(),
                    name: menu_item.name.clone(),
                    unit_price: menu_item.price,
                    quantity: item.quantity,
                    image_url: menu_item.image_url.clone(),
                },
                None => CartItemDTO {
                    id: line_id_for(&item.name),
                    name: item.name.clone(),
                    unit_price: item.price,
                    quantity: item.quantity,
                    image_url: None,
                },
            };
            match lines.iter_mut().find(|existing| existing.id == line.id) {
                Some(existing) => existing.quantity += line.quantity,
                None => lines.push(line),
            }
        }
        Ok(lines)
    }

    fn active_position(&self, order_id: &str) -> Result<usize> {
        self.active
            .iter()
            .position(|order| order.id == order_id)
            .ok_or_else(|| StorefrontError::UnknownOrder(order_id.to_string()))
    }

    fn archive(&mut self, order: PastOrderDTO) {
        self.past.insert(0, order);
    }
}

pub fn new_order_id() -> String {
    let uuid = Uuid::new_v4().simple().to_string();
    format!("{}-{}", ORDER_ID_PREFIX, &uuid[..8])
}

/// Ventana de entrega ("6:30 PM - 6:45 PM") a partir de `now`.
pub fn estimate_delivery_window(now: DateTime<Local>) -> String {
    let lead = rand::thread_rng().gen_range(MIN_DELIVERY_MINUTES..=MAX_DELIVERY_MINUTES);
    let start = now + Duration::minutes(lead);
    let end = start + Duration::minutes(DELIVERY_WINDOW_MINUTES);
    format!("{} - {}", start.format("%-I:%M %p"), end.format("%-I:%M %p"))
}

/// Slug usado como ID de línea al repetir un pedido sin IDs de menú.
pub fn line_id_for(name: &str) -> String {
    let slug: Vec<String> = name
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect();
    slug.join("-")
}
