use crate::models::{ClientRecord, InvoiceItemRecord, InvoiceStatus};

/// A line item as typed into the form; numeric fields stay as text until
/// submission so a half-typed value never blocks editing.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItemDraft {
    pub description: String,
    pub quantity: String,
    pub unit_price: String,
}

impl LineItemDraft {
    /// The empty row offered for a new item
    pub fn blank() -> Self {
        Self {
            description: String::new(),
            quantity: "1".to_string(),
            unit_price: "0".to_string(),
        }
    }

    pub fn new(description: &str, quantity: &str, unit_price: &str) -> Self {
        Self {
            description: description.to_string(),
            quantity: quantity.to_string(),
            unit_price: unit_price.to_string(),
        }
    }
}

impl From<&InvoiceItemRecord> for LineItemDraft {
    fn from(item: &InvoiceItemRecord) -> Self {
        Self {
            description: item.description.clone(),
            quantity: item.quantity.normalize().to_string(),
            unit_price: item.unit_price.normalize().to_string(),
        }
    }
}

/// Invoice fields while being created or edited.
///
/// Dates are calendar dates (`YYYY-MM-DD`) and the tax rate is the raw
/// percentage text; both are normalized only when the draft is submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceDraft {
    pub invoice_number: String,
    pub client_id: Option<i64>,
    pub issue_date: String,
    pub due_date: String,
    pub status: InvoiceStatus,
    pub tax_rate: String,
    pub notes: String,
    pub items: Vec<LineItemDraft>,
}

/// Client fields while being created or edited
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl From<ClientRecord> for ClientDraft {
    fn from(client: ClientRecord) -> Self {
        Self {
            name: client.name,
            email: client.email,
            phone: client.phone.unwrap_or_default(),
            address: client.address.unwrap_or_default(),
        }
    }
}
