use serde::Serialize;

use crate::constants::MIN_LINE_QUANTITY;
use crate::errors::{Result, StorefrontError};
use crate::pricing::{PriceBreakdown, PricingPolicy};
use crate::types::dtos::CartItemDTO;

/// Restaurante al que pertenece el contenido del carrito.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CartOwner {
    pub restaurant_id: String,
    pub restaurant_name: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Cart {
    /// Líneas en el orden en que se agregaron.
    items: Vec<CartItemDTO>,
    /// `None` mientras el carrito esté vacío y sin dueño asignado.
    owner: Option<CartOwner>,
}

impl Cart {
    pub fn new(owner: Option<CartOwner>, items: Vec<CartItemDTO>) -> Self {
        let items = items
            .into_iter()
            .filter(|item| item.quantity >= MIN_LINE_QUANTITY)
            .collect();
        Cart { items, owner }
    }

    pub fn items(&self) -> &[CartItemDTO] {
        &self.items
    }

    pub fn owner(&self) -> Option<&CartOwner> {
        self.owner.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Suma de cantidades, para el contador de la barra de navegación.
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Adds a line, merging into an existing line with the same id.
    pub fn add(&mut self, owner: CartOwner, line: CartItemDTO) -> Result<()> {
        if let Some(current) = &self.owner {
            if !self.items.is_empty() && current.restaurant_id != owner.restaurant_id {
                return Err(StorefrontError::MixedRestaurantCart {
                    current: current.restaurant_name.clone(),
                    requested: owner.restaurant_name,
                });
            }
        }
        self.owner = Some(owner);

        match self.items.iter_mut().find(|item| item.id == line.id) {
            Some(existing) => existing.quantity += line.quantity.max(MIN_LINE_QUANTITY),
            None => self.items.push(CartItemDTO {
                quantity: line.quantity.max(MIN_LINE_QUANTITY),
                ..line
            }),
        }
        Ok(())
    }

    /// Cambia la cantidad de una línea; nunca baja de 1.
    pub fn change_quantity(&mut self, line_id: &str, delta: i64) -> Result<u32> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == line_id)
            .ok_or_else(|| StorefrontError::UnknownCartLine(line_id.to_string()))?;

        let wanted = i64::from(item.quantity).saturating_add(delta);
        let clamped = wanted.clamp(i64::from(MIN_LINE_QUANTITY), i64::from(u32::MAX));
        item.quantity = u32::try_from(clamped).unwrap_or(u32::MAX);
        Ok(item.quantity)
    }

    pub fn remove(&mut self, line_id: &str) -> Result<CartItemDTO> {
        let pos = self
            .items
            .iter()
            .position(|item| item.id == line_id)
            .ok_or_else(|| StorefrontError::UnknownCartLine(line_id.to_string()))?;
        let removed = self.items.remove(pos);
        if self.items.is_empty() {
            self.owner = None;
        }
        Ok(removed)
    }

    /// Reemplaza todo el contenido del carrito (usado al repetir un pedido).
    pub fn replace(&mut self, owner: Option<CartOwner>, items: Vec<CartItemDTO>) {
        *self = Cart::new(owner, items);
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.owner = None;
    }

    pub fn breakdown(&self, policy: &PricingPolicy) -> PriceBreakdown {
        policy.breakdown(&self.items)
    }
}
