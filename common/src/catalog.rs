//! Datos semilla del storefront: restaurantes, menús, carrito y pedidos.
//!
//! El catálogo viaja embebido en el binario como JSON y se valida al
//! cargarse; una ruta alternativa puede indicarse con `FOODDASH_CATALOG`.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::errors::{Result, StorefrontError};
use crate::types::dtos::{ActiveOrderDTO, CartItemDTO, MenuDTO, MenuItemDTO, PastOrderDTO, RestaurantDTO};

const EMBEDDED_CATALOG: &str = include_str!("../data/catalog.json");

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeedCart {
    pub restaurant_id: String,
    pub items: Vec<CartItemDTO>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    pub restaurants: Vec<RestaurantDTO>,
    #[serde(default)]
    pub menus: Vec<MenuDTO>,
    /// Accesos rápidos de "Browse by Cuisine".
    #[serde(default)]
    pub cuisines: Vec<String>,
    #[serde(default)]
    pub cart: Option<SeedCart>,
    #[serde(default)]
    pub active_orders: Vec<ActiveOrderDTO>,
    #[serde(default)]
    pub past_orders: Vec<PastOrderDTO>,
}

impl Catalog {
    pub fn embedded() -> Result<Self> {
        Catalog::from_json(EMBEDDED_CATALOG)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Catalog::from_json(&json)
    }

    /// Loads the file at `path` when given, the embedded catalog otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Catalog::from_path(path),
            None => Catalog::embedded(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let mut restaurant_ids = HashSet::new();
        for restaurant in &self.restaurants {
            if !restaurant_ids.insert(restaurant.id.as_str()) {
                return invalid(format!("duplicated restaurant id {}", restaurant.id));
            }
        }

        for menu in &self.menus {
            if !restaurant_ids.contains(menu.restaurant_id.as_str()) {
                return invalid(format!("menu for unknown restaurant {}", menu.restaurant_id));
            }
            let mut item_ids = HashSet::new();
            for item in &menu.items {
                if !item_ids.insert(item.id.as_str()) {
                    return invalid(format!("duplicated menu item id {}", item.id));
                }
                validate_menu_item(item, &menu.categories)?;
            }
        }

        if let Some(cart) = &self.cart {
            if !restaurant_ids.contains(cart.restaurant_id.as_str()) {
                return invalid(format!("cart for unknown restaurant {}", cart.restaurant_id));
            }
            let mut line_ids = HashSet::new();
            for line in &cart.items {
                if !line_ids.insert(line.id.as_str()) {
                    return invalid(format!("duplicated cart line {}", line.id));
                }
                if line.quantity == 0 {
                    return invalid(format!("cart line {} has quantity 0", line.id));
                }
                if !is_price(line.unit_price) {
                    return invalid(format!("cart line {} has price {}", line.id, line.unit_price));
                }
            }
        }

        for order in &self.active_orders {
            if order.status.is_terminal() {
                return invalid(format!("active order {} is {}", order.id, order.status));
            }
        }
        for order in &self.past_orders {
            order.check_terminal()?;
        }
        Ok(())
    }

    pub fn restaurant(&self, restaurant_id: &str) -> Result<&RestaurantDTO> {
        self.restaurants
            .iter()
            .find(|restaurant| restaurant.id == restaurant_id)
            .ok_or_else(|| StorefrontError::UnknownRestaurant(restaurant_id.to_string()))
    }

    pub fn menu(&self, restaurant_id: &str) -> Result<&MenuDTO> {
        self.restaurant(restaurant_id)?;
        self.menus
            .iter()
            .find(|menu| menu.restaurant_id == restaurant_id)
            .ok_or_else(|| StorefrontError::MenuNotFound(restaurant_id.to_string()))
    }

    /// Case-insensitive substring match on name and cuisine types.
    pub fn search(&self, term: &str) -> Vec<&RestaurantDTO> {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return self.restaurants.iter().collect();
        }
        self.restaurants
            .iter()
            .filter(|restaurant| {
                restaurant.name.to_lowercase().contains(&term)
                    || restaurant
                        .cuisine_types
                        .iter()
                        .any(|cuisine| cuisine.to_lowercase().contains(&term))
            })
            .collect()
    }

    pub fn by_cuisine(&self, cuisine: &str) -> Vec<&RestaurantDTO> {
        let cuisine = cuisine.trim();
        self.restaurants
            .iter()
            .filter(|restaurant| {
                restaurant
                    .cuisine_types
                    .iter()
                    .any(|c| c.eq_ignore_ascii_case(cuisine))
            })
            .collect()
    }
}

impl MenuDTO {
    pub fn items_in(&self, category: &str) -> Vec<&MenuItemDTO> {
        self.items
            .iter()
            .filter(|item| item.category.eq_ignore_ascii_case(category))
            .collect()
    }

    pub fn item(&self, item_id: &str) -> Result<&MenuItemDTO> {
        self.items
            .iter()
            .find(|item| item.id == item_id)
            .ok_or_else(|| StorefrontError::UnknownMenuItem(item_id.to_string()))
    }

    /// Plato con ese nombre exacto, sin distinguir mayúsculas.
    pub fn item_named(&self, name: &str) -> Option<&MenuItemDTO> {
        let name = name.trim();
        self.items.iter().find(|item| item.name.eq_ignore_ascii_case(name))
    }

    /// Categoría canónica que coincide con `name`, si existe.
    pub fn category(&self, name: &str) -> Option<&str> {
        self.categories
            .iter()
            .find(|category| category.eq_ignore_ascii_case(name.trim()))
            .map(String::as_str)
    }
}

fn validate_menu_item(item: &MenuItemDTO, categories: &[String]) -> Result<()> {
    if !is_price(item.price) {
        return invalid(format!("menu item {} has price {}", item.id, item.price));
    }
    if !categories.contains(&item.category) {
        return invalid(format!("menu item {} is in unknown category {}", item.id, item.category));
    }
    let mut titles = HashSet::new();
    for group in &item.customization {
        if !titles.insert(group.title.as_str()) {
            return Err(StorefrontError::DuplicateOptionGroup {
                item_id: item.id.clone(),
                title: group.title.clone(),
            });
        }
    }
    let mut option_ids = HashSet::new();
    for option in item.customization.iter().flat_map(|group| &group.options) {
        if !option_ids.insert(option.id.as_str()) {
            return invalid(format!("menu item {} repeats option {}", item.id, option.id));
        }
        if !option.delta().is_finite() {
            return invalid(format!("option {} has a non-finite price", option.id));
        }
    }
    Ok(())
}

fn is_price(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

fn invalid<T>(reason: String) -> Result<T> {
    Err(StorefrontError::InvalidCatalog(reason))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::order_status::OrderStatus;

    #[test]
    fn test_embedded_catalog_loads() {
        let catalog = Catalog::embedded().unwrap();
        assert_eq!(catalog.restaurants.len(), 7);
        assert_eq!(catalog.past_orders.len(), 3);
        assert_eq!(catalog.active_orders[0].status, OrderStatus::Preparing);
        assert_eq!(catalog.cart.as_ref().unwrap().items.len(), 3);

        let menu = catalog.menu("r7").unwrap();
        assert!(menu.item("m1").unwrap().is_customizable());
        assert!(!menu.item("m2").unwrap().is_customizable());
    }

    #[test]
    fn test_search_matches_name_and_cuisine() {
        let catalog = Catalog::embedded().unwrap();
        let names: Vec<&str> = catalog.search("sushi").iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Sushi World"]);

        let pizza = catalog.search("PIZZA");
        assert_eq!(pizza.len(), 3);
        assert_eq!(catalog.search("  ").len(), catalog.restaurants.len());
    }

    #[test]
    fn test_cuisine_filter_is_exact() {
        let catalog = Catalog::embedded().unwrap();
        let italian = catalog.by_cuisine("italian");
        assert_eq!(italian.len(), 3);
        assert!(catalog.by_cuisine("Ital").is_empty());
        assert!(catalog.by_cuisine("Thai").is_empty());
    }

    #[test]
    fn test_menu_lookups() {
        let catalog = Catalog::embedded().unwrap();
        let menu = catalog.menu("r7").unwrap();
        assert_eq!(menu.items_in("pizzas").len(), 2);
        assert_eq!(menu.category("drinks"), Some("Drinks"));
        assert!(menu.category("Soups").is_none());
        assert!(matches!(menu.item("m9"), Err(StorefrontError::UnknownMenuItem(_))));
        assert!(matches!(catalog.menu("r2"), Err(StorefrontError::MenuNotFound(_))));
        assert!(matches!(catalog.menu("r99"), Err(StorefrontError::UnknownRestaurant(_))));
    }

    #[test]
    fn test_past_orders_must_be_terminal() {
        let json = r#"{
            "restaurants": [],
            "past_orders": [{"id": "p1", "date": "2024-07-01", "total": 1.0,
                "status": "PREPARING", "restaurant_name": "X", "items": []}]
        }"#;
        assert!(matches!(
            Catalog::from_json(json),
            Err(StorefrontError::NonTerminalPastOrder { .. })
        ));
    }

    #[test]
    fn test_unknown_status_is_rejected_while_loading() {
        let json = r#"{
            "restaurants": [],
            "past_orders": [{"id": "p1", "date": "2024-07-01", "total": 1.0,
                "status": "LOST", "restaurant_name": "X", "items": []}]
        }"#;
        assert!(matches!(
            Catalog::from_json(json),
            Err(StorefrontError::Json(_))
        ));
    }

    #[test]
    fn test_zero_quantity_seed_cart_is_invalid() {
        let json = r#"{
            "restaurants": [{"id": "r1", "name": "A", "image_url": "", "rating": 4.0,
                "delivery_time": "10 min", "cuisine_types": []}],
            "cart": {"restaurant_id": "r1", "items": [
                {"id": "x", "name": "X", "unit_price": 1.0, "quantity": 0}]}
        }"#;
        assert!(matches!(
            Catalog::from_json(json),
            Err(StorefrontError::InvalidCatalog(_))
        ));
    }

    #[test]
    fn test_repeated_group_title_is_invalid() {
        let json = r#"{
            "restaurants": [{"id": "r1", "name": "A", "image_url": "", "rating": 4.0,
                "delivery_time": "10 min", "cuisine_types": []}],
            "menus": [{"restaurant_id": "r1", "categories": ["Mains"], "items": [
                {"id": "x", "name": "X", "description": "", "price": 10.0, "category": "Mains",
                 "customization": [
                    {"title": "Options", "kind": "single", "options": [
                        {"id": "a", "label": "A", "price_delta": 1.0},
                        {"id": "b", "label": "B"}]},
                    {"title": "Options", "kind": "multi", "options": [
                        {"id": "c", "label": "C", "price_delta": 2.0}]}]}]}]
        }"#;
        assert!(matches!(
            Catalog::from_json(json),
            Err(StorefrontError::DuplicateOptionGroup { .. })
        ));
    }

    #[test]
    fn test_item_named_ignores_case() {
        let catalog = Catalog::embedded().unwrap();
        let menu = catalog.menu("r7").unwrap();
        assert_eq!(menu.item_named("pepperoni pizza").unwrap().id, "m2");
        assert!(menu.item_named("Chicken Tikka").is_none());
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let err = Catalog::from_path(Path::new("/nonexistent/fooddash.json")).unwrap_err();
        assert!(matches!(err, StorefrontError::CatalogIo(_)));
    }
}
