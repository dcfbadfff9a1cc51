//! Pantallas del storefront y su representación en texto.

use colored::*;
use std::fmt::{self, Write};

use common::customization::CustomizationDialog;
use common::orders::OrderReceipt;
use common::pricing::PriceBreakdown;
use common::tracker::{StepState, TrackerView};
use common::types::dtos::{
    ActiveOrderDTO, CartItemDTO, MenuItemDTO, PastOrderDTO, RestaurantDTO, SelectionKind,
};
use common::types::order_status::OrderStatus;
use common::utils::{format_money, format_rating, initials};

const PROGRESS_BAR_WIDTH: usize = 20;

#[derive(Debug, Clone)]
pub struct CartView {
    pub lines: Vec<CartItemDTO>,
    pub restaurant_name: Option<String>,
    pub breakdown: PriceBreakdown,
    pub tax_percent: f64,
    /// Suma de cantidades para el contador del carrito.
    pub item_count: u32,
}

#[derive(Debug, Clone)]
pub struct MenuView {
    pub restaurant: RestaurantDTO,
    pub categories: Vec<String>,
    pub category: String,
    pub items: Vec<MenuItemDTO>,
}

#[derive(Debug, Clone)]
pub enum Screen {
    Home {
        heading: String,
        restaurants: Vec<RestaurantDTO>,
        cuisines: Vec<String>,
    },
    Menu(MenuView),
    Customize(CustomizationDialog),
    Cart(CartView),
    CartJson(String),
    Receipt {
        receipt: OrderReceipt,
        tax_percent: f64,
    },
    Tracking(Vec<(ActiveOrderDTO, TrackerView)>),
    /// Pedido que acaba de pasar al historial (entregado o cancelado).
    OrderClosed {
        order: PastOrderDTO,
        tracker: TrackerView,
    },
    History(Vec<PastOrderDTO>),
    Notice(String),
}

pub fn render(screen: &Screen) -> String {
    let mut out = String::new();
    // Escribir en un String no falla.
    let _ = write_screen(&mut out, screen);
    out
}

fn write_screen(out: &mut String, screen: &Screen) -> fmt::Result {
    match screen {
        Screen::Home {
            heading,
            restaurants,
            cuisines,
        } => render_home(out, heading, restaurants, cuisines),
        Screen::Menu(view) => render_menu(out, view),
        Screen::Customize(dialog) => render_customization(out, dialog),
        Screen::Cart(view) => render_cart(out, view),
        Screen::CartJson(json) => out.write_str(json),
        Screen::Receipt {
            receipt,
            tax_percent,
        } => render_receipt(out, receipt, *tax_percent),
        Screen::Tracking(orders) => render_tracking(out, orders),
        Screen::OrderClosed { order, tracker } => render_closed_order(out, order, tracker),
        Screen::History(orders) => render_history(out, orders),
        Screen::Notice(text) => out.write_str(text),
    }
}

fn render_home(
    out: &mut String,
    heading: &str,
    restaurants: &[RestaurantDTO],
    cuisines: &[String],
) -> fmt::Result {
    writeln!(out, "{}", heading.bold())?;
    if restaurants.is_empty() {
        writeln!(out, "  No restaurants match your search.")?;
    }
    for restaurant in restaurants {
        write!(
            out,
            "  [{}] {}  {}  {}  {}",
            restaurant.id,
            restaurant.name.bold(),
            format_rating(restaurant.rating, restaurant.review_count),
            restaurant.delivery_time,
            restaurant.cuisine_types.join(", ").dimmed()
        )?;
        if let Some(offer) = &restaurant.offer {
            write!(out, "  {}", offer.green())?;
        }
        out.write_char('\n')?;
    }
    if !cuisines.is_empty() {
        writeln!(out, "Browse by cuisine: {}", cuisines.join(" · "))?;
    }
    Ok(())
}

fn render_menu(out: &mut String, view: &MenuView) -> fmt::Result {
    let restaurant = &view.restaurant;
    writeln!(
        out,
        "({}) {}  {}  {}",
        initials(&restaurant.name),
        restaurant.name.bold(),
        format_rating(restaurant.rating, restaurant.review_count),
        restaurant.delivery_time
    )?;
    if let Some(address) = &restaurant.address {
        writeln!(out, "  {}", address)?;
    }
    if let Some(hours) = &restaurant.opening_hours {
        writeln!(out, "  Open: {}", hours)?;
    }

    let tabs: Vec<String> = view
        .categories
        .iter()
        .map(|category| {
            if *category == view.category {
                format!("[{}]", category).bold().to_string()
            } else {
                category.clone()
            }
        })
        .collect();
    writeln!(out, "{}", tabs.join("  "))?;

    if view.items.is_empty() {
        writeln!(out, "  No items in this category yet.")?;
    }
    for item in &view.items {
        let marker = if item.is_customizable() { " *" } else { "" };
        writeln!(
            out,
            "  [{}] {}{}  {}",
            item.id,
            item.name.bold(),
            marker,
            format_money(item.price)
        )?;
        writeln!(out, "       {}", item.description.dimmed())?;
    }
    Ok(())
}

fn render_customization(out: &mut String, dialog: &CustomizationDialog) -> fmt::Result {
    writeln!(out, "{}", format!("Customize {}", dialog.item.name).bold())?;
    for group in &dialog.item.customization {
        let hint = match group.kind {
            SelectionKind::Single => "choose one",
            SelectionKind::Multi => "choose any",
        };
        writeln!(out, "  {} ({})", group.title, hint)?;
        for option in &group.options {
            let mark = match (group.kind, dialog.is_selected(&group.title, &option.id)) {
                (SelectionKind::Single, true) => "(•)",
                (SelectionKind::Single, false) => "( )",
                (SelectionKind::Multi, true) => "[x]",
                (SelectionKind::Multi, false) => "[ ]",
            };
            let price = match option.price_delta {
                Some(delta) if delta != 0.0 => format!(" (+{})", format_money(delta)),
                _ => String::new(),
            };
            writeln!(out, "    {} {} [{}]{}", mark, option.label, option.id, price)?;
        }
    }
    writeln!(out, "  Price: {}", format_money(dialog.unit_price()).bold())
}

fn render_cart(out: &mut String, view: &CartView) -> fmt::Result {
    if view.lines.is_empty() {
        return writeln!(out, "Your cart is empty.");
    }
    let title = match &view.restaurant_name {
        Some(name) => format!("Order Items ({}) from {}", view.lines.len(), name),
        None => format!("Order Items ({})", view.lines.len()),
    };
    writeln!(out, "{}", title.bold())?;
    for line in &view.lines {
        writeln!(
            out,
            "  [{}] {}  x{}  {} each  {}",
            line.id,
            line.name,
            line.quantity,
            format_money(line.unit_price),
            format_money(line.line_total()).bold()
        )?;
    }
    render_breakdown(out, &view.breakdown, view.tax_percent)?;
    writeln!(out, "Cart items: {}", view.item_count)
}

fn render_breakdown(out: &mut String, breakdown: &PriceBreakdown, tax_percent: f64) -> fmt::Result {
    writeln!(out, "  Subtotal       {}", format_money(breakdown.subtotal))?;
    writeln!(out, "  Delivery Fee   {}", format_money(breakdown.delivery_fee))?;
    writeln!(
        out,
        "  Taxes ({}%)    {}",
        tax_percent.round(),
        format_money(breakdown.tax)
    )?;
    writeln!(out, "  Total          {}", format_money(breakdown.total).bold())
}

fn render_receipt(out: &mut String, receipt: &OrderReceipt, tax_percent: f64) -> fmt::Result {
    writeln!(out, "{}", "Order Placed Successfully!".green().bold())?;
    writeln!(
        out,
        "  Order #{} from {}",
        receipt.order.id, receipt.order.restaurant_name
    )?;
    writeln!(out, "  Deliver to: {}", receipt.details.address)?;
    writeln!(out, "  Payment: {}", receipt.details.payment)?;
    render_breakdown(out, &receipt.breakdown, tax_percent)?;
    writeln!(out, "  Estimated Delivery: {}", receipt.order.estimated_delivery)
}

fn render_tracking(out: &mut String, orders: &[(ActiveOrderDTO, TrackerView)]) -> fmt::Result {
    if orders.is_empty() {
        return writeln!(out, "No active orders at the moment.");
    }
    for (order, tracker) in orders {
        writeln!(
            out,
            "{}",
            format!("Order #{} from {}", order.id, order.restaurant_name).bold()
        )?;
        writeln!(out, "  Status: {}", order.status.to_string().yellow())?;
        render_tracker(out, tracker)?;
    }
    Ok(())
}

fn render_closed_order(out: &mut String, order: &PastOrderDTO, tracker: &TrackerView) -> fmt::Result {
    writeln!(
        out,
        "{}",
        format!("Order #{} from {}", order.id, order.restaurant_name).bold()
    )?;
    writeln!(out, "  Status: {}", status_label(order.status))?;
    render_tracker(out, tracker)?;
    writeln!(out, "  Moved to your order history.")
}

pub fn render_tracker(out: &mut String, tracker: &TrackerView) -> fmt::Result {
    match tracker {
        TrackerView::Cancelled => {
            writeln!(out, "  {}", "Order Cancelled".red().bold())?;
            writeln!(out, "  This order has been cancelled.")
        }
        TrackerView::Progress {
            current,
            estimated_delivery,
            steps,
            fill_ratio,
        } => {
            writeln!(out, "  {}", current.label.yellow())?;
            writeln!(out, "  {}", current.description)?;
            if let Some(window) = estimated_delivery {
                writeln!(out, "  Estimated Delivery: {}", window.bold())?;
            }
            writeln!(out, "  {}", progress_bar(*fill_ratio))?;
            for (step, state) in steps {
                let line = match state {
                    StepState::Current => format!("  ● {}", step.label).yellow().bold().to_string(),
                    StepState::Completed => format!("  ● {}", step.label),
                    StepState::Pending => format!("  ○ {}", step.label).dimmed().to_string(),
                };
                writeln!(out, "{}", line)?;
            }
            Ok(())
        }
    }
}

/// `[█████░░░░░] 50%` para una proporción entre 0 y 1.
pub fn progress_bar(fill_ratio: f64) -> String {
    let ratio = fill_ratio.clamp(0.0, 1.0);
    let filled = (ratio * PROGRESS_BAR_WIDTH as f64).round() as usize;
    format!(
        "[{}{}] {}%",
        "█".repeat(filled),
        "░".repeat(PROGRESS_BAR_WIDTH - filled),
        (ratio * 100.0).round()
    )
}

fn status_label(status: OrderStatus) -> ColoredString {
    if status == OrderStatus::Delivered {
        status.to_string().green()
    } else {
        status.to_string().red()
    }
}

fn render_history(out: &mut String, orders: &[PastOrderDTO]) -> fmt::Result {
    if orders.is_empty() {
        return writeln!(out, "You haven't placed any orders yet.");
    }
    for order in orders {
        writeln!(
            out,
            "Order #{} ({})  {}",
            order.id.bold(),
            order.date,
            status_label(order.status)
        )?;
        writeln!(out, "  Restaurant: {}", order.restaurant_name)?;
        writeln!(out, "  Total: {}", format_money(order.total))?;
        for item in &order.items {
            writeln!(
                out,
                "    - {} (x{}) - {} each",
                item.name,
                item.quantity,
                format_money(item.price)
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn plain(screen: &Screen) -> String {
        colored::control::set_override(false);
        render(screen)
    }

    fn line(id: &str, unit_price: f64, quantity: u32) -> CartItemDTO {
        CartItemDTO {
            id: id.to_string(),
            name: id.to_string(),
            unit_price,
            quantity,
            image_url: None,
        }
    }

    #[test]
    fn test_cart_screen_rounds_for_display() {
        let lines = vec![line("m1", 12.99, 1), line("m3", 5.99, 2), line("m6", 2.50, 4)];
        let breakdown = common::pricing::PricingPolicy::default().breakdown(&lines);
        let text = plain(&Screen::Cart(CartView {
            lines,
            restaurant_name: Some("Luigi's Pizzeria".to_string()),
            breakdown,
            tax_percent: 8.0,
            item_count: 7,
        }));

        assert!(text.contains("Order Items (3) from Luigi's Pizzeria"));
        assert!(text.contains("$11.98"));
        assert!(text.contains("Subtotal       $34.97"));
        assert!(text.contains("Taxes (8%)    $2.80"));
        assert!(text.contains("Total          $42.77"));
        assert!(text.contains("Cart items: 7"));
    }

    #[test]
    fn test_empty_cart_screen() {
        let text = plain(&Screen::Cart(CartView {
            lines: vec![],
            restaurant_name: None,
            breakdown: PriceBreakdown::default(),
            tax_percent: 8.0,
            item_count: 0,
        }));
        assert_eq!(text, "Your cart is empty.\n");
    }

    #[test]
    fn test_cancelled_tracker_has_no_track() {
        let mut out = String::new();
        colored::control::set_override(false);
        render_tracker(&mut out, &TrackerView::Cancelled).unwrap();
        assert!(out.contains("Order Cancelled"));
        assert!(!out.contains("●"));
        assert!(!out.contains("%"));
    }

    #[test]
    fn test_tracker_marks_active_stages() {
        let order = ActiveOrderDTO {
            id: "order123".to_string(),
            status: OrderStatus::OutForDelivery,
            estimated_delivery: "6:30 PM - 6:45 PM".to_string(),
            restaurant_name: "Luigi's Pizzeria".to_string(),
            placed_on: NaiveDate::from_ymd_opt(2024, 7, 20).unwrap(),
            items: vec![],
            total: 24.43,
        };
        let tracker = TrackerView::build(order.status, Some(&order.estimated_delivery));
        let text = plain(&Screen::Tracking(vec![(order, tracker)]));

        assert!(text.contains("Status: OUT FOR DELIVERY"));
        assert!(text.contains("Estimated Delivery: 6:30 PM - 6:45 PM"));
        assert_eq!(text.matches('●').count(), 3);
        assert_eq!(text.matches('○').count(), 1);
        assert!(text.contains("[█████████████░░░░░░░] 67%"));
    }

    #[test]
    fn test_progress_bar_bounds() {
        assert_eq!(progress_bar(0.0), format!("[{}] 0%", "░".repeat(20)));
        assert_eq!(progress_bar(1.0), format!("[{}] 100%", "█".repeat(20)));
        assert_eq!(progress_bar(1.5), progress_bar(1.0));
    }

    #[test]
    fn test_closed_order_shows_its_tracker() {
        let order = PastOrderDTO {
            id: "order123".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 7, 20).unwrap(),
            total: 24.43,
            status: OrderStatus::Cancelled,
            restaurant_name: "Luigi's Pizzeria".to_string(),
            items: vec![],
        };
        let tracker = TrackerView::build(order.status, None);
        let text = plain(&Screen::OrderClosed { order, tracker });
        assert!(text.contains("Order #order123 from Luigi's Pizzeria"));
        assert!(text.contains("Status: CANCELLED"));
        assert!(text.contains("Order Cancelled"));
        assert!(text.contains("Moved to your order history."));
    }

    #[test]
    fn test_history_lists_items() {
        let order = PastOrderDTO {
            id: "past002".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 7, 10).unwrap(),
            total: 18.5,
            status: OrderStatus::Delivered,
            restaurant_name: "Sushi World".to_string(),
            items: vec![common::types::dtos::PurchasedItemDTO {
                name: "California Roll".to_string(),
                quantity: 2,
                price: 12.0,
            }],
        };
        let text = plain(&Screen::History(vec![order]));
        assert!(text.contains("Order #past002 (2024-07-10)  DELIVERED"));
        assert!(text.contains("California Roll (x2) - $12.00 each"));
        assert!(text.contains("Total: $18.50"));
    }
}
