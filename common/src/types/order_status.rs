use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::StorefrontError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Confirmed,      // El restaurante recibió el pedido
    Preparing,      // El restaurante está preparando el pedido
    OutForDelivery, // El pedido está en camino
    Delivered,      // El pedido fue entregado al cliente
    Cancelled,      // El pedido fue cancelado
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// Nombre canónico, igual al usado en el catálogo JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::Preparing => "PREPARING",
            OrderStatus::OutForDelivery => "OUT_FOR_DELIVERY",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }

    /// No transitions leave a terminal status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Siguiente etapa del seguimiento, `None` para estados terminales.
    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Confirmed => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::OutForDelivery),
            OrderStatus::OutForDelivery => Some(OrderStatus::Delivered),
            OrderStatus::Delivered | OrderStatus::Cancelled => None,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str().replace('_', " "))
    }
}

impl FromStr for OrderStatus {
    type Err = StorefrontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace([' ', '-'], "_").to_uppercase();
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| StorefrontError::UnknownStatus(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_replaces_every_underscore() {
        assert_eq!(OrderStatus::OutForDelivery.to_string(), "OUT FOR DELIVERY");
        assert_eq!(OrderStatus::Preparing.to_string(), "PREPARING");
    }

    #[test]
    fn test_parse_accepts_display_and_wire_forms() {
        assert_eq!(
            "OUT_FOR_DELIVERY".parse::<OrderStatus>().unwrap(),
            OrderStatus::OutForDelivery
        );
        assert_eq!(
            "out for delivery".parse::<OrderStatus>().unwrap(),
            OrderStatus::OutForDelivery
        );
        assert_eq!(" delivered ".parse::<OrderStatus>().unwrap(), OrderStatus::Delivered);
    }

    #[test]
    fn test_parse_rejects_values_outside_the_enumeration() {
        let err = "SHIPPED".parse::<OrderStatus>().unwrap_err();
        assert!(matches!(err, StorefrontError::UnknownStatus(ref s) if s == "SHIPPED"));
    }

    #[test]
    fn test_serde_uses_screaming_snake_case() {
        let json = serde_json::to_string(&OrderStatus::OutForDelivery).unwrap();
        assert_eq!(json, "\"OUT_FOR_DELIVERY\"");
        assert!(serde_json::from_str::<OrderStatus>("\"LOST\"").is_err());
    }

    #[test]
    fn test_next_walks_the_stages_and_stops_at_terminals() {
        assert_eq!(OrderStatus::Confirmed.next(), Some(OrderStatus::Preparing));
        assert_eq!(OrderStatus::OutForDelivery.next(), Some(OrderStatus::Delivered));
        assert_eq!(OrderStatus::Delivered.next(), None);
        assert_eq!(OrderStatus::Cancelled.next(), None);
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::Preparing.is_terminal());
    }
}
