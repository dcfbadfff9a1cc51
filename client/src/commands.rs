use thiserror::Error;

use common::orders::{CheckoutDetails, PaymentMethod};

use crate::messages::*;

pub const HELP: &str = "\
Commands:
  home                              list every restaurant
  search <term>                     find restaurants by name or cuisine
  cuisine <name>                    restaurants serving a cuisine
  menu <restaurant> [category]      open a restaurant menu
  add <item>                        add a menu item (opens customization if it has options)
  choose <option>                   pick or toggle an option while customizing
  confirm | discard                 add the customized item / close the dialog
  cart                              show the cart and its totals
  inc <line> | dec <line>           change a line quantity (never below 1)
  remove <line>                     remove a line from the cart
  export                            print the cart as JSON
  checkout <card|paypal|cod> <address...>
  orders                            track active orders
  refresh <order>                   advance an active order one stage
  cancel <order>                    cancel an active order
  history                           past orders
  reorder <order>                   copy a past order into the cart
  quit";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("Unknown command `{0}`. Type `help` for the list of commands.")]
    Unknown(String),
    #[error("Usage: {0}")]
    MissingArgument(&'static str),
    #[error("{0}")]
    InvalidArgument(String),
}

/// Lo que el usuario pidió en una línea de la consola.
#[derive(Debug, Clone)]
pub enum Input {
    Empty,
    Help,
    Quit,
    Storefront(StorefrontCommand),
}

impl Input {
    pub fn parse(line: &str) -> Result<Input, ParseCommandError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "" => return Ok(Input::Empty),
            "help" | "?" => return Ok(Input::Help),
            "quit" | "exit" => return Ok(Input::Quit),
            "home" => StorefrontCommand::ShowHome(ShowHome),
            "search" => StorefrontCommand::SearchRestaurants(SearchRestaurants {
                term: required(rest, "search <term>")?,
            }),
            "cuisine" => StorefrontCommand::FilterByCuisine(FilterByCuisine {
                cuisine: required(rest, "cuisine <name>")?,
            }),
            "menu" => {
                let (restaurant_id, category) = match rest.split_once(char::is_whitespace) {
                    Some((id, category)) => (id.to_string(), Some(category.trim().to_string())),
                    None => (required(rest, "menu <restaurant> [category]")?, None),
                };
                StorefrontCommand::OpenMenu(OpenMenu {
                    restaurant_id,
                    category,
                })
            }
            "add" => StorefrontCommand::AddToCart(AddToCart {
                item_id: required(rest, "add <item>")?,
            }),
            "choose" => StorefrontCommand::ChooseOption(ChooseOption {
                option_id: required(rest, "choose <option>")?,
            }),
            "confirm" => StorefrontCommand::ConfirmCustomization(ConfirmCustomization),
            "discard" => StorefrontCommand::DiscardCustomization(DiscardCustomization),
            "cart" => StorefrontCommand::ShowCart(ShowCart),
            "inc" => StorefrontCommand::ChangeQuantity(ChangeQuantity {
                line_id: required(rest, "inc <line>")?,
                delta: 1,
            }),
            "dec" => StorefrontCommand::ChangeQuantity(ChangeQuantity {
                line_id: required(rest, "dec <line>")?,
                delta: -1,
            }),
            "remove" => StorefrontCommand::RemoveItem(RemoveItem {
                line_id: required(rest, "remove <line>")?,
            }),
            "export" => StorefrontCommand::ExportCart(ExportCart),
            "checkout" => StorefrontCommand::PlaceOrder(PlaceOrder {
                details: parse_checkout(rest)?,
            }),
            "orders" => StorefrontCommand::ShowOrders(ShowOrders),
            "refresh" => StorefrontCommand::RefreshOrder(RefreshOrder {
                order_id: required(rest, "refresh <order>")?,
            }),
            "cancel" => StorefrontCommand::CancelOrder(CancelOrder {
                order_id: required(rest, "cancel <order>")?,
            }),
            "history" => StorefrontCommand::ShowHistory(ShowHistory),
            "reorder" => StorefrontCommand::Reorder(Reorder {
                order_id: required(rest, "reorder <order>")?,
            }),
            _ => return Err(ParseCommandError::Unknown(word.to_string())),
        };
        Ok(Input::Storefront(command))
    }
}

fn required(rest: &str, usage: &'static str) -> Result<String, ParseCommandError> {
    if rest.is_empty() {
        Err(ParseCommandError::MissingArgument(usage))
    } else {
        Ok(rest.to_string())
    }
}

fn parse_checkout(rest: &str) -> Result<CheckoutDetails, ParseCommandError> {
    const USAGE: &str = "checkout <card|paypal|cod> <address...>";
    let (method, address) = rest
        .split_once(char::is_whitespace)
        .ok_or(ParseCommandError::MissingArgument(USAGE))?;
    let payment: PaymentMethod = method
        .parse()
        .map_err(|e: common::errors::StorefrontError| ParseCommandError::InvalidArgument(e.to_string()))?;
    Ok(CheckoutDetails {
        address: required(address.trim(), USAGE)?,
        payment,
    })
}
