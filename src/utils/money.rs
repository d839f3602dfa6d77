use rust_decimal::{Decimal, RoundingStrategy};

/// Format an amount for display, e.g. `£6.80`.
pub fn format_amount(currency_symbol: &str, amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{}{:.2}", currency_symbol, rounded)
}
