use rust_decimal::Decimal;
use serde::Deserialize;

/// Aggregate figures computed by the service for the dashboard
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Stats {
    pub total_invoices: u64,
    pub total_clients: u64,
    pub pending_invoices: u64,
    pub paid_invoices: u64,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_revenue: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub pending_amount: Decimal,
}
