// SPDX-License-Identifier: MPL-2.0
//! Currency display helpers.
//!
//! Prices arrive from the API as integer minor units (pence, cents) attached
//! to ticket tiers. Everything here is pure: symbol lookup, minor-unit
//! formatting, and cheapest-tier selection.

use crate::domain::TicketTier;

/// Returns the display symbol for an ISO 4217 currency code.
///
/// `None` falls back to `£` (the API's dominant market); unknown codes render
/// as the code itself so a price is never silently unlabeled.
pub fn currency_symbol(code: Option<&str>) -> String {
    let Some(code) = code else {
        return "£".to_string();
    };

    match code {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "GBX" => "p",
        "CAD" => "C$",
        "AUD" => "A$",
        "JPY" => "¥",
        "CHF" => "CHF",
        "SEK" | "NOK" | "DKK" => "kr",
        other => other,
    }
    .to_string()
}

/// Formats a minor-unit price as `symbol` + grouped two-decimal amount,
/// e.g. `format_price(Some(2500), Some("GBP"))` is `"£25.00"`.
///
/// A missing price formats as zero rather than erroring: the card layer
/// always renders a price slot.
pub fn format_price(minor_units: Option<i64>, currency: Option<&str>) -> String {
    let amount = minor_units.unwrap_or(0) as f64 / 100.0;
    format!("{}{}", currency_symbol(currency), group_thousands(amount))
}

/// Returns the cheapest total among tiers carrying a non-negative price, or
/// `None` when no tier qualifies (no tiers, all missing, all negative).
pub fn cheapest_price(tiers: &[TicketTier]) -> Option<i64> {
    tiers
        .iter()
        .filter_map(|tier| tier.price.as_ref().and_then(|p| p.total))
        .filter(|total| *total >= 0)
        .min()
}

/// Two-decimal rendering with `,` thousands separators, matching the
/// `en` number formatting the rest of the UI uses.
fn group_thousands(amount: f64) -> String {
    let negative = amount < 0.0;
    let fixed = format!("{:.2}", amount.abs());
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!(
        "{}{}.{}",
        if negative { "-" } else { "" },
        grouped,
        fraction
    )
}
