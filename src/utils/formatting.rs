//! Formatting utilities used for CLI and export outputs.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// `format_amount(1200.5, "₹")` → "₹1200.50"
pub fn format_amount(amount: Decimal, symbol: &str) -> String {
    let sign = if amount.is_sign_negative() { "-" } else { "" };
    format!("{}{}{:.2}", sign, symbol, amount.abs())
}

/// Horizontal bar scaled against `max`, used for the text charts of
/// `summary` (category share and monthly trend).
pub fn bar(value: Decimal, max: Decimal, width: usize) -> String {
    if max <= Decimal::ZERO || value <= Decimal::ZERO {
        return String::new();
    }

    let cells = value
        .checked_mul(Decimal::from(width))
        .and_then(|v| v.checked_div(max))
        .and_then(|v| v.round().to_usize())
        .unwrap_or(width)
        .clamp(1, width);

    "█".repeat(cells)
}

/// Share of `part` in `whole` as a percentage string ("42.5%").
pub fn percent(part: Decimal, whole: Decimal) -> String {
    if whole <= Decimal::ZERO {
        return "0.0%".to_string();
    }
    match part
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|v| v.checked_div(whole))
    {
        Some(p) => format!("{:.1}%", p),
        None => ">999%".to_string(),
    }
}
