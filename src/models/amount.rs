//! Free-text amounts
//!
//! Rows keep whatever the user typed. Calculations read the text as a float and
//! treat anything unparseable as zero; the text itself is never rewritten.

/// Parse an amount field, returning 0 when the text is not a number
pub fn parse_amount(text: &str) -> f64 {
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Format an amount with a currency symbol and no decimals (e.g. `₱5843`)
///
/// Halves round to even and the sign follows the symbol (`₱-1200`), the same
/// as `printf("%.0f")`.
pub fn format_amount(symbol: &str, value: f64) -> String {
    let rounded = value.round_ties_even();
    // -0.4 rounds to -0, which would print as "-0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{}{:.0}", symbol, rounded)
}
