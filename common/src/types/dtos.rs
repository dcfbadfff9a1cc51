use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

use crate::errors::{Result, StorefrontError};
use crate::types::order_status::OrderStatus;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RestaurantDTO {
    /// ID único del restaurante.
    pub id: String,
    pub name: String,
    pub image_url: String,
    /// Puntaje promedio, por ejemplo 4.5.
    pub rating: f32,
    #[serde(default)]
    pub review_count: Option<u32>,
    /// Tiempo de entrega en texto, por ejemplo "25-35 min".
    pub delivery_time: String,
    pub cuisine_types: Vec<String>,
    /// Promoción vigente ("20% OFF", "Free Delivery").
    #[serde(default)]
    pub offer: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub opening_hours: Option<String>,
}

/// Whether a customization group takes one option or any subset.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SelectionKind {
    Single,
    Multi,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomizationOptionDTO {
    pub id: String,
    pub label: String,
    /// Ajuste de precio al seleccionar la opción.
    #[serde(default)]
    pub price_delta: Option<f64>,
}

impl CustomizationOptionDTO {
    pub fn delta(&self) -> f64 {
        self.price_delta.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OptionGroupDTO {
    pub title: String,
    pub kind: SelectionKind,
    pub options: Vec<CustomizationOptionDTO>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuItemDTO {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Precio base sin personalizaciones.
    pub price: f64,
    #[serde(default)]
    pub image_url: Option<String>,
    pub category: String,
    #[serde(default)]
    pub customization: Vec<OptionGroupDTO>,
}

impl MenuItemDTO {
    pub fn is_customizable(&self) -> bool {
        !self.customization.is_empty()
    }

    pub fn find_option(&self, option_id: &str) -> Option<(&OptionGroupDTO, &CustomizationOptionDTO)> {
        self.customization.iter().find_map(|group| {
            group
                .options
                .iter()
                .find(|option| option.id == option_id)
                .map(|option| (group, option))
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuDTO {
    pub restaurant_id: String,
    /// Categorías en el orden en que se muestran las pestañas.
    pub categories: Vec<String>,
    pub items: Vec<MenuItemDTO>,
}

/// Una línea del carrito.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItemDTO {
    /// ID de la línea, único dentro del carrito.
    pub id: String,
    pub name: String,
    pub unit_price: f64,
    /// Siempre mayor o igual a 1.
    pub quantity: u32,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl CartItemDTO {
    pub fn line_total(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PurchasedItemDTO {
    pub name: String,
    pub quantity: u32,
    /// Precio unitario pagado.
    pub price: f64,
}

impl From<&CartItemDTO> for PurchasedItemDTO {
    fn from(line: &CartItemDTO) -> Self {
        PurchasedItemDTO {
            name: line.name.clone(),
            quantity: line.quantity,
            price: line.unit_price,
        }
    }
}

#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActiveOrderDTO {
    /// ID del pedido.
    pub id: String,
    /// Estado actual, nunca terminal mientras el pedido está activo.
    pub status: OrderStatus,
    /// Ventana estimada de entrega ("6:30 PM - 6:45 PM").
    pub estimated_delivery: String,
    pub restaurant_name: String,
    #[serde_as(as = "DisplayFromStr")]
    pub placed_on: NaiveDate,
    #[serde(default)]
    pub items: Vec<PurchasedItemDTO>,
    pub total: f64,
}

#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PastOrderDTO {
    pub id: String,
    #[serde_as(as = "DisplayFromStr")]
    pub date: NaiveDate,
    pub total: f64,
    /// Delivered or Cancelled.
    pub status: OrderStatus,
    pub restaurant_name: String,
    pub items: Vec<PurchasedItemDTO>,
}

impl PastOrderDTO {
    pub fn new(
        id: String,
        date: NaiveDate,
        total: f64,
        status: OrderStatus,
        restaurant_name: String,
        items: Vec<PurchasedItemDTO>,
    ) -> Result<Self> {
        let order = PastOrderDTO {
            id,
            date,
            total,
            status,
            restaurant_name,
            items,
        };
        order.check_terminal()?;
        Ok(order)
    }

    pub fn check_terminal(&self) -> Result<()> {
        if self.status.is_terminal() {
            Ok(())
        } else {
            Err(StorefrontError::NonTerminalPastOrder {
                order_id: self.id.clone(),
                status: self.status,
            })
        }
    }

    /// Archiva un pedido activo con el estado final dado.
    pub fn archive(order: ActiveOrderDTO, status: OrderStatus) -> Result<Self> {
        PastOrderDTO::new(
            order.id,
            order.placed_on,
            order.total,
            status,
            order.restaurant_name,
            order.items,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 15).unwrap()
    }

    #[test]
    fn test_past_order_requires_terminal_status() {
        let ok = PastOrderDTO::new(
            "past001".to_string(),
            date(),
            25.99,
            OrderStatus::Delivered,
            "Luigi's Pizzeria".to_string(),
            vec![],
        );
        assert!(ok.is_ok());

        let err = PastOrderDTO::new(
            "past009".to_string(),
            date(),
            10.0,
            OrderStatus::Preparing,
            "Luigi's Pizzeria".to_string(),
            vec![],
        )
        .unwrap_err();
        assert!(matches!(err, StorefrontError::NonTerminalPastOrder { .. }));
    }

    #[test]
    fn test_past_order_date_round_trips_as_plain_text() {
        let json = r#"{"id":"past002","date":"2024-07-10","total":18.5,"status":"DELIVERED",
            "restaurant_name":"Sushi World","items":[{"name":"California Roll","quantity":2,"price":12.0}]}"#;
        let order: PastOrderDTO = serde_json::from_str(json).unwrap();
        assert_eq!(order.date, NaiveDate::from_ymd_opt(2024, 7, 10).unwrap());
        assert!(serde_json::to_string(&order).unwrap().contains("\"2024-07-10\""));
    }

    #[test]
    fn test_find_option_searches_every_group() {
        let item = MenuItemDTO {
            id: "m1".to_string(),
            name: "Margherita Pizza".to_string(),
            description: String::new(),
            price: 12.99,
            image_url: None,
            category: "Pizzas".to_string(),
            customization: vec![
                OptionGroupDTO {
                    title: "Crust".to_string(),
                    kind: SelectionKind::Single,
                    options: vec![CustomizationOptionDTO {
                        id: "thin".to_string(),
                        label: "Thin Crust".to_string(),
                        price_delta: None,
                    }],
                },
                OptionGroupDTO {
                    title: "Extra Toppings".to_string(),
                    kind: SelectionKind::Multi,
                    options: vec![CustomizationOptionDTO {
                        id: "olives".to_string(),
                        label: "Olives".to_string(),
                        price_delta: Some(1.0),
                    }],
                },
            ],
        };
        let (group, option) = item.find_option("olives").unwrap();
        assert_eq!(group.title, "Extra Toppings");
        assert_eq!(option.delta(), 1.0);
        assert!(item.find_option("anchovies").is_none());
    }
}
