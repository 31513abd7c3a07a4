//! Guaraní money helpers.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! All amounts are `rust_decimal::Decimal` in whole guaraníes; the guaraní
//! has no circulating sub-unit, so stored values carry no fraction.

use rust_decimal::Decimal;

/// Formats a whole-guaraní amount for user-facing messages: `₲ 1.234.567`.
///
/// Negative amounts keep the sign in front of the currency symbol
/// (`-₲ 5.000`), matching the treasury's printed statements.
#[must_use]
pub fn format_guaranies(amount: Decimal) -> String {
    let rounded = amount.round();
    let negative = rounded.is_sign_negative();
    let digits = rounded.abs().to_string();

    // Group thousands with dots, right to left.
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    if negative {
        format!("-₲ {grouped}")
    } else {
        format!("₲ {grouped}")
    }
}
