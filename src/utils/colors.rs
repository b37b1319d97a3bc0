/// ANSI color helper utilities for terminal output.
use rust_decimal::Decimal;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Budget usage color:
/// over budget → red
/// above 80% → yellow
/// otherwise → green
pub fn color_for_budget_usage(total: Decimal, budget: Decimal) -> &'static str {
    if total >= budget {
        RED
    } else if total >= budget * Decimal::new(8, 1) {
        YELLOW
    } else {
        GREEN
    }
}
