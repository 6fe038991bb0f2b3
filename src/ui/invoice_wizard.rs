use chrono::{Local, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::api::InvoiceService;
use crate::compute::{self, Totals, format_money, parse_number};
use crate::error::{FormError, ValidationError};
use crate::models::{
    ClientRecord, InvoiceDraft, InvoiceItemPayload, InvoicePayload, InvoiceRecord, InvoiceStatus,
    LineItemDraft,
};
use crate::ui::WizardPhase;
use crate::ui::components::dates::{calendar_date, default_dates, wire_datetime};

// Represents a top-level field in the invoice form
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvoiceField {
    InvoiceNumber,
    Client,
    IssueDate,
    DueDate,
    Status,
    TaxRate,
    Notes,
}

// Represents a field of a single line item
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineItemField {
    Description,
    Quantity,
    UnitPrice,
}

/// Draft of an invoice being created or edited.
///
/// Derived totals are never stored; [`InvoiceWizardState::totals`] recomputes
/// them from the current items on every call.
pub struct InvoiceWizardState {
    invoice_id: Option<i64>,
    draft: InvoiceDraft,
    /// Clients the invoice can be billed to
    clients: Vec<ClientRecord>,
    phase: WizardPhase,
    show_error: Option<String>,
}

impl Default for InvoiceWizardState {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceWizardState {
    /// A fresh draft numbered from the current time
    pub fn new() -> Self {
        Self::with_defaults(Local::now().date_naive(), Utc::now().timestamp_millis())
    }

    fn with_defaults(today: NaiveDate, stamp: i64) -> Self {
        let (issue_date, due_date) = default_dates(today);

        Self {
            invoice_id: None,
            draft: InvoiceDraft {
                invoice_number: format!("INV-{}", stamp),
                client_id: None,
                issue_date,
                due_date,
                status: InvoiceStatus::Pending,
                tax_rate: "0".to_string(),
                notes: String::new(),
                items: vec![LineItemDraft::blank()],
            },
            clients: Vec::new(),
            phase: WizardPhase::New,
            show_error: None,
        }
    }

    /// Draft for editing a stored invoice
    pub fn from_existing(invoice: InvoiceRecord) -> Self {
        let mut items: Vec<LineItemDraft> = invoice.items.iter().map(LineItemDraft::from).collect();
        if items.is_empty() {
            items.push(LineItemDraft::blank());
        }

        Self {
            invoice_id: Some(invoice.id),
            draft: InvoiceDraft {
                invoice_number: invoice.invoice_number,
                client_id: Some(invoice.client_id),
                issue_date: calendar_date(&invoice.issue_date),
                due_date: calendar_date(&invoice.due_date),
                status: invoice.status,
                tax_rate: invoice.tax_rate.normalize().to_string(),
                notes: invoice.notes.unwrap_or_default(),
                items,
            },
            clients: Vec::new(),
            phase: WizardPhase::Editing,
            show_error: None,
        }
    }

    /// Fetch an invoice and replace this draft with it.
    ///
    /// On failure the current draft is left as it was.
    pub async fn load_for_edit<S: InvoiceService>(
        &mut self,
        service: &S,
        id: i64,
    ) -> Result<(), FormError> {
        match service.get_invoice(id).await {
            Ok(invoice) => {
                tracing::debug!("Loaded invoice {} for editing", invoice.invoice_number);
                let clients = std::mem::take(&mut self.clients);
                *self = Self::from_existing(invoice);
                self.clients = clients;
                Ok(())
            }
            Err(source) => {
                tracing::error!("Error loading invoice {}: {}", id, source);
                let err = FormError::Load {
                    entity: "invoice",
                    source,
                };
                self.show_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Fetch the clients a draft may be billed to
    pub async fn load_clients<S: InvoiceService>(&mut self, service: &S) -> Result<(), FormError> {
        match service.list_clients().await {
            Ok(clients) => {
                tracing::debug!("Loaded {} clients for the invoice form", clients.len());
                self.clients = clients;
                Ok(())
            }
            Err(source) => {
                tracing::error!("Error loading clients: {}", source);
                let err = FormError::Load {
                    entity: "clients",
                    source,
                };
                self.show_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    pub fn invoice_id(&self) -> Option<i64> {
        self.invoice_id
    }

    pub fn draft(&self) -> &InvoiceDraft {
        &self.draft
    }

    pub fn phase(&self) -> WizardPhase {
        self.phase
    }

    pub fn show_error(&self) -> Option<&str> {
        self.show_error.as_deref()
    }

    /// Whether the submit control is enabled
    pub fn can_submit(&self) -> bool {
        self.phase != WizardPhase::Submitting
    }

    fn touch(&mut self) {
        self.show_error = None;
        if self.phase == WizardPhase::New || self.phase == WizardPhase::Done {
            self.phase = WizardPhase::Editing;
        }
    }

    /// Set a top-level field from its text value.
    ///
    /// A client value that is blank or not an id clears the selection.
    pub fn update_field(&mut self, field: InvoiceField, value: &str) -> Result<(), ValidationError> {
        match field {
            InvoiceField::InvoiceNumber => self.draft.invoice_number = value.to_string(),
            InvoiceField::Client => self.draft.client_id = value.trim().parse().ok(),
            InvoiceField::IssueDate => self.draft.issue_date = value.to_string(),
            InvoiceField::DueDate => self.draft.due_date = value.to_string(),
            InvoiceField::Status => self.draft.status = value.parse()?,
            InvoiceField::TaxRate => self.draft.tax_rate = value.to_string(),
            InvoiceField::Notes => self.draft.notes = value.to_string(),
        }
        self.touch();
        Ok(())
    }

    pub fn select_client(&mut self, client_id: Option<i64>) {
        self.draft.client_id = client_id;
        self.touch();
    }

    /// Set one field of the item at `index`; returns false if there is no such item
    pub fn update_item(&mut self, index: usize, field: LineItemField, value: &str) -> bool {
        let Some(item) = self.draft.items.get_mut(index) else {
            return false;
        };
        match field {
            LineItemField::Description => item.description = value.to_string(),
            LineItemField::Quantity => item.quantity = value.to_string(),
            LineItemField::UnitPrice => item.unit_price = value.to_string(),
        }
        self.touch();
        true
    }

    pub fn add_item(&mut self) {
        self.draft.items.push(LineItemDraft::blank());
        self.touch();
    }

    /// Remove the item at `index`. The last remaining item is never removed.
    pub fn remove_item(&mut self, index: usize) -> bool {
        if self.draft.items.len() <= 1 || index >= self.draft.items.len() {
            return false;
        }
        self.draft.items.remove(index);
        self.touch();
        true
    }

    pub fn totals(&self) -> Totals {
        Totals::of(&self.draft.items, &self.draft.tax_rate)
    }

    pub fn line_amount(&self, index: usize) -> Option<Decimal> {
        self.draft.items.get(index).map(compute::line_amount)
    }

    /// Check the draft and build the body sent to the service
    pub fn validate(&self) -> Result<InvoicePayload, ValidationError> {
        let draft = &self.draft;

        let client_id = draft.client_id.ok_or(ValidationError::NoClientSelected)?;
        if !self.clients.iter().any(|c| c.id == client_id) {
            return Err(ValidationError::UnknownClient(client_id));
        }
        if draft.items.is_empty() {
            return Err(ValidationError::NoItems);
        }
        if let Some(index) = draft
            .items
            .iter()
            .position(|item| item.description.trim().is_empty())
        {
            return Err(ValidationError::MissingItemDescription { index });
        }

        let invoice_number = draft.invoice_number.trim();
        if invoice_number.is_empty() {
            return Err(ValidationError::MissingField("Invoice number"));
        }

        let issue_date = wire_datetime("issue_date", &draft.issue_date)?;
        let due_date = wire_datetime("due_date", &draft.due_date)?;

        let tax_rate = if draft.tax_rate.trim().is_empty() {
            Decimal::ZERO
        } else {
            amount("Tax rate".to_string(), &draft.tax_rate)?
        };

        let items = draft
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                Ok(InvoiceItemPayload {
                    description: item.description.clone(),
                    quantity: amount(format!("Item {} quantity", i + 1), &item.quantity)?,
                    unit_price: amount(format!("Item {} unit price", i + 1), &item.unit_price)?,
                })
            })
            .collect::<Result<Vec<_>, ValidationError>>()?;

        let subtotal = items
            .iter()
            .try_fold(Decimal::ZERO, |sum, item| {
                item.quantity
                    .checked_mul(item.unit_price)
                    .and_then(|amount| sum.checked_add(amount))
            })
            .ok_or_else(|| ValidationError::OutOfRange {
                field: "Subtotal".to_string(),
            })?;
        let tax = subtotal
            .checked_mul(tax_rate)
            .map(|product| product / Decimal::ONE_HUNDRED)
            .or_else(|| subtotal.checked_mul(tax_rate / Decimal::ONE_HUNDRED));
        let total = tax
            .and_then(|tax| subtotal.checked_add(tax))
            .ok_or_else(|| ValidationError::OutOfRange {
                field: "Total".to_string(),
            })?;

        Ok(InvoicePayload {
            invoice_number: invoice_number.to_string(),
            client_id,
            issue_date,
            due_date,
            status: draft.status,
            tax_rate,
            notes: draft.notes.clone(),
            items,
            subtotal,
            total,
        })
    }

    /// Validate and save the draft.
    ///
    /// Creates the invoice when it has no id yet, otherwise updates it. Any
    /// failure leaves the draft untouched so the user can correct and retry.
    pub async fn submit<S: InvoiceService>(&mut self, service: &S) -> Result<InvoiceRecord, FormError> {
        if !self.can_submit() {
            return Err(FormError::SubmitInProgress);
        }

        let payload = match self.validate() {
            Ok(payload) => payload,
            Err(err) => {
                self.show_error = Some(err.to_string());
                return Err(err.into());
            }
        };

        self.phase = WizardPhase::Submitting;
        self.show_error = None;

        let result = match self.invoice_id {
            Some(id) => service.update_invoice(id, &payload).await,
            None => service.create_invoice(&payload).await,
        };

        match result {
            Ok(invoice) => {
                tracing::info!("Saved invoice {} (id {})", invoice.invoice_number, invoice.id);
                self.phase = WizardPhase::Done;
                Ok(invoice)
            }
            Err(source) => {
                tracing::error!("Error saving invoice {}: {}", payload.invoice_number, source);
                let err = FormError::Save {
                    entity: "invoice",
                    source,
                };
                self.phase = WizardPhase::Editing;
                self.show_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Plain-text preview of the draft with its live totals
    pub fn render_summary(&self) -> String {
        let totals = self.totals();
        let mut lines = vec![format!("Invoice {}", self.draft.invoice_number)];
        if let Some(client) = self
            .draft
            .client_id
            .and_then(|id| self.clients.iter().find(|c| c.id == id))
        {
            lines.push(format!("Bill to: {}", client.name));
        }

        for (i, item) in self.draft.items.iter().enumerate() {
            lines.push(format!(
                "  {}. {} - {} x {} = {}",
                i + 1,
                item.description,
                item.quantity,
                item.unit_price,
                format_money(compute::line_amount(item)),
            ));
        }

        lines.push(format!("Subtotal: {}", format_money(totals.subtotal)));
        lines.push(format!(
            "Tax ({}%): {}",
            self.draft.tax_rate,
            format_money(totals.tax_amount)
        ));
        lines.push(format!("Total: {}", format_money(totals.total)));
        lines.join("\n")
    }
}

fn amount(field: String, text: &str) -> Result<Decimal, ValidationError> {
    let value = parse_number(text).ok_or_else(|| ValidationError::InvalidNumber {
        field: field.clone(),
        value: text.to_string(),
    })?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::NegativeNumber { field });
    }
    Ok(value)
}
