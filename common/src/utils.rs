use crate::constants::CURRENCY_SYMBOL;

/// Redondea a dos decimales sólo para mostrar: `42.7676` → `"$42.77"`.
pub fn format_money(amount: f64) -> String {
    format!("{}{:.2}", CURRENCY_SYMBOL, amount)
}

pub fn format_rating(rating: f32, review_count: Option<u32>) -> String {
    match review_count {
        Some(count) => format!("★ {:.1} ({} reviews)", rating, count),
        None => format!("★ {:.1}", rating),
    }
}

/// Iniciales para el avatar de un restaurante sin logo.
pub fn initials(name: &str) -> String {
    name.chars().take(2).collect::<String>().to_uppercase()
}

pub fn print_welcome_message(customer: &str) {
    println!();
    println!("  ╔══════════════════════════════════════╗");
    println!("  ║          🍕  FoodDash  🍔            ║");
    println!("  ╚══════════════════════════════════════╝");
    println!("  Welcome, {}! Type `help` to see what you can do.", customer);
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money_rounds_only_for_display() {
        assert_eq!(format_money(42.7676), "$42.77");
        assert_eq!(format_money(2.7976), "$2.80");
        assert_eq!(format_money(0.0), "$0.00");
        assert_eq!(format_money(12.99 + 1.50 + 2.00), "$16.49");
    }

    #[test]
    fn test_rating_and_initials() {
        assert_eq!(format_rating(4.7, Some(230)), "★ 4.7 (230 reviews)");
        assert_eq!(format_rating(4.0, None), "★ 4.0");
        assert_eq!(initials("Luigi's Pizzeria"), "LU");
    }
}
