use serde::Serialize;

use crate::constants::{DELIVERY_FEE, TAX_RATE};
use crate::types::dtos::CartItemDTO;

/// Fixed tax rate and delivery fee applied at checkout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingPolicy {
    pub tax_rate: f64,
    pub delivery_fee: f64,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        PricingPolicy {
            tax_rate: TAX_RATE,
            delivery_fee: DELIVERY_FEE,
        }
    }
}

/// Montos derivados del carrito, sin redondear.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Default)]
pub struct PriceBreakdown {
    pub subtotal: f64,
    pub delivery_fee: f64,
    pub tax: f64,
    pub total: f64,
}

impl PricingPolicy {
    pub fn breakdown(&self, items: &[CartItemDTO]) -> PriceBreakdown {
        let subtotal: f64 = items.iter().map(CartItemDTO::line_total).sum();
        let delivery_fee = if subtotal > 0.0 { self.delivery_fee } else { 0.0 };
        let tax = subtotal * self.tax_rate;
        PriceBreakdown {
            subtotal,
            delivery_fee,
            tax,
            total: subtotal + delivery_fee + tax,
        }
    }

    /// Tax rate as a whole percentage for labels ("Taxes (8%)").
    pub fn tax_percent(&self) -> f64 {
        self.tax_rate * 100.0
    }
}
