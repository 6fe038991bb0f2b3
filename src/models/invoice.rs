use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::models::ClientRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    #[default]
    Pending,
    Paid,
    Overdue,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Overdue => "overdue",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvoiceStatus::Pending => write!(f, "PENDING"),
            InvoiceStatus::Paid => write!(f, "PAID"),
            InvoiceStatus::Overdue => write!(f, "OVERDUE"),
        }
    }
}

impl FromStr for InvoiceStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(InvoiceStatus::Pending),
            "paid" => Ok(InvoiceStatus::Paid),
            "overdue" => Ok(InvoiceStatus::Overdue),
            _ => Err(ValidationError::UnknownStatus(s.to_string())),
        }
    }
}

/// An invoice as stored by the service, with its client embedded
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct InvoiceRecord {
    pub id: i64,
    pub invoice_number: String,
    pub client_id: i64,
    #[serde(default)]
    pub client: Option<ClientRecord>,
    pub issue_date: String,
    pub due_date: String,
    #[serde(default)]
    pub status: InvoiceStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub tax_rate: Decimal,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub total: Decimal,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub items: Vec<InvoiceItemRecord>,
}

impl InvoiceRecord {
    pub fn client_name(&self) -> &str {
        self.client
            .as_ref()
            .map(|c| c.name.as_str())
            .unwrap_or("N/A")
    }

    /// Tax is not stored separately, only implied by the two totals
    pub fn tax_amount(&self) -> Decimal {
        self.total - self.subtotal
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct InvoiceItemRecord {
    #[serde(default)]
    pub id: Option<i64>,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

/// Body of an invoice create or update request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoicePayload {
    pub invoice_number: String,
    pub client_id: i64,
    pub issue_date: String,
    pub due_date: String,
    pub status: InvoiceStatus,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_rate: Decimal,
    pub notes: String,
    pub items: Vec<InvoiceItemPayload>,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

/// Line items go over the wire without their derived amount
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceItemPayload {
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
}
