//! Selección de opciones al personalizar un plato del menú.

use serde::Serialize;
use std::collections::HashMap;

use crate::errors::{Result, StorefrontError};
use crate::types::dtos::{CartItemDTO, MenuItemDTO, SelectionKind};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub enum Selection {
    Single(String),
    /// Kept in the order the options were picked.
    Multi(Vec<String>),
}

impl Selection {
    pub fn contains(&self, option_id: &str) -> bool {
        match self {
            Selection::Single(id) => id == option_id,
            Selection::Multi(ids) => ids.iter().any(|id| id == option_id),
        }
    }
}

/// Estado del diálogo de personalización de un plato.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CustomizationDialog {
    /// Plato que se está personalizando.
    pub item: MenuItemDTO,
    /// Selección actual por título de grupo.
    pub selections: HashMap<String, Selection>,
}

impl CustomizationDialog {
    /// Opens the dialog with the first option of each single-select group
    /// picked and every multi-select group empty.
    pub fn open(item: MenuItemDTO) -> Self {
        let mut selections = HashMap::new();
        for group in &item.customization {
            let selection = match group.kind {
                SelectionKind::Single => match group.options.first() {
                    Some(first) => Selection::Single(first.id.clone()),
                    None => continue,
                },
                SelectionKind::Multi => Selection::Multi(Vec::new()),
            };
            selections.entry(group.title.clone()).or_insert(selection);
        }
        CustomizationDialog { item, selections }
    }

    /// Single-select groups replace their choice; multi-select groups toggle.
    pub fn choose(&mut self, option_id: &str) -> Result<()> {
        let (group, _) = self
            .item
            .find_option(option_id)
            .ok_or_else(|| StorefrontError::UnknownOption {
                item_id: self.item.id.clone(),
                option_id: option_id.to_string(),
            })?;

        let entry = self
            .selections
            .entry(group.title.clone())
            .or_insert_with(|| match group.kind {
                SelectionKind::Single => Selection::Single(option_id.to_string()),
                SelectionKind::Multi => Selection::Multi(Vec::new()),
            });

        match (group.kind, entry) {
            (SelectionKind::Single, Selection::Single(current)) => {
                *current = option_id.to_string();
            }
            (SelectionKind::Multi, Selection::Multi(ids)) => {
                if let Some(pos) = ids.iter().position(|id| id == option_id) {
                    ids.remove(pos);
                } else {
                    ids.push(option_id.to_string());
                }
            }
            // Dos grupos con el mismo título y distinto tipo.
            _ => {
                return Err(StorefrontError::DuplicateOptionGroup {
                    item_id: self.item.id.clone(),
                    title: group.title.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn is_selected(&self, group_title: &str, option_id: &str) -> bool {
        self.selections
            .get(group_title)
            .is_some_and(|selection| selection.contains(option_id))
    }

    /// Selected options in menu order, group by group.
    pub fn selected_options(&self) -> Vec<(&str, &str, f64)> {
        self.item
            .customization
            .iter()
            .flat_map(|group| {
                group
                    .options
                    .iter()
                    .filter(|option| self.is_selected(&group.title, &option.id))
                    .map(|option| (option.id.as_str(), option.label.as_str(), option.delta()))
            })
            .collect()
    }

    pub fn unit_price(&self) -> f64 {
        self.item.price
            + self
                .selected_options()
                .iter()
                .map(|(_, _, delta)| delta)
                .sum::<f64>()
    }

    /// Línea de carrito para la personalización actual.
    pub fn to_cart_line(&self) -> CartItemDTO {
        let selected = self.selected_options();
        let (id, name) = if selected.is_empty() {
            (self.item.id.clone(), self.item.name.clone())
        } else {
            let ids: Vec<&str> = selected.iter().map(|(id, _, _)| *id).collect();
            let labels: Vec<&str> = selected.iter().map(|(_, label, _)| *label).collect();
            (
                format!("{}:{}", self.item.id, ids.join("+")),
                format!("{} ({})", self.item.name, labels.join(", ")),
            )
        };
        CartItemDTO {
            id,
            name,
            unit_price: self.unit_price(),
            quantity: 1,
            image_url: self.item.image_url.clone(),
        }
    }
}
