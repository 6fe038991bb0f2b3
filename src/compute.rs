//! Invoice arithmetic
//!
//! Everything here is pure and recomputed from the draft on every edit.
//! Values keep full precision; rounding happens only in [`format_money`].
//! Arithmetic saturates at the limits of [`Decimal`] instead of overflowing,
//! so a preview can always be drawn whatever has been typed.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::LineItemDraft;

/// Parse a numeric form field, accepting plain and scientific notation
pub fn parse_number(text: &str) -> Option<Decimal> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// Numeric value of a field for display, with anything unparseable as zero
pub fn coerce(text: &str) -> Decimal {
    parse_number(text).unwrap_or(Decimal::ZERO)
}

pub fn line_amount(item: &LineItemDraft) -> Decimal {
    coerce(&item.quantity).saturating_mul(coerce(&item.unit_price))
}

pub fn subtotal(items: &[LineItemDraft]) -> Decimal {
    items
        .iter()
        .map(line_amount)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

pub fn tax_amount(items: &[LineItemDraft], tax_rate: &str) -> Decimal {
    let subtotal = subtotal(items);
    let rate = coerce(tax_rate);
    match subtotal.checked_mul(rate) {
        Some(product) => product / Decimal::ONE_HUNDRED,
        None => subtotal.saturating_mul(rate / Decimal::ONE_HUNDRED),
    }
}

pub fn total(items: &[LineItemDraft], tax_rate: &str) -> Decimal {
    subtotal(items).saturating_add(tax_amount(items, tax_rate))
}

/// The three derived figures shown under an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub subtotal: Decimal,
    pub tax_amount: Decimal,
    pub total: Decimal,
}

impl Totals {
    pub fn of(items: &[LineItemDraft], tax_rate: &str) -> Self {
        Self {
            subtotal: subtotal(items),
            tax_amount: tax_amount(items, tax_rate),
            total: total(items, tax_rate),
        }
    }
}

/// Two-decimal currency string, e.g. `$137.50`
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("${:.2}", rounded)
}
