use comfy_table::{Attribute, Cell, Color, Table};

use crate::api::InvoiceService;
use crate::compute::format_money;
use crate::error::ViewError;
use crate::models::{InvoiceRecord, InvoiceStatus};
use crate::ui::DeleteOutcome;
use crate::ui::components::confirm::Confirm;
use crate::ui::components::dates::display_date;

// Represents the state of the invoice list screen
pub struct InvoicesState {
    invoices: Vec<InvoiceRecord>,
    loading: bool,
}

impl Default for InvoicesState {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoicesState {
    pub fn new() -> Self {
        Self {
            invoices: Vec::new(),
            loading: true,
        }
    }

    /// Fetch all invoices. A failed fetch keeps whatever was shown before.
    pub async fn load<S: InvoiceService>(&mut self, service: &S) {
        match service.list_invoices().await {
            Ok(invoices) => {
                tracing::debug!("Loaded {} invoices", invoices.len());
                self.invoices = invoices;
            }
            Err(e) => tracing::warn!("Error loading invoices: {}", e),
        }
        self.loading = false;
    }

    pub fn invoices(&self) -> &[InvoiceRecord] {
        &self.invoices
    }

    /// Delete an invoice after confirmation, then refetch the list
    pub async fn delete<S: InvoiceService, C: Confirm>(
        &mut self,
        service: &S,
        confirm: &C,
        id: i64,
    ) -> Result<DeleteOutcome, ViewError> {
        let number = self
            .invoices
            .iter()
            .find(|i| i.id == id)
            .map(|i| i.invoice_number.clone())
            .unwrap_or_else(|| id.to_string());

        let prompt = format!("Are you sure you want to delete invoice #{}?", number);
        if !confirm.confirm(&prompt)? {
            return Ok(DeleteOutcome::Cancelled);
        }

        if let Err(source) = service.delete_invoice(id).await {
            tracing::error!("Error deleting invoice {}: {}", id, source);
            return Err(ViewError::Delete {
                message: "Failed to delete invoice",
                source,
            });
        }

        tracing::info!("Deleted invoice {}", number);
        self.load(service).await;
        Ok(DeleteOutcome::Deleted)
    }

    pub fn render(&self) -> String {
        if self.loading {
            return "Loading invoices...".to_string();
        }
        if self.invoices.is_empty() {
            return "No invoices yet. Create your first invoice to get started!".to_string();
        }

        let mut table = Table::new();
        table.set_header(vec![
            Cell::new("ID"),
            Cell::new("Invoice #"),
            Cell::new("Client"),
            Cell::new("Issue Date"),
            Cell::new("Due Date"),
            Cell::new("Amount"),
            Cell::new("Status"),
        ]);

        for invoice in &self.invoices {
            table.add_row(vec![
                Cell::new(invoice.id),
                Cell::new(&invoice.invoice_number).add_attribute(Attribute::Bold),
                Cell::new(invoice.client_name()),
                Cell::new(display_date(&invoice.issue_date)),
                Cell::new(display_date(&invoice.due_date)),
                Cell::new(format_money(invoice.total)),
                status_cell(invoice.status),
            ]);
        }

        table.to_string()
    }
}

fn status_cell(status: InvoiceStatus) -> Cell {
    let color = match status {
        InvoiceStatus::Pending => Color::Rgb { r: 245, g: 158, b: 11 },
        InvoiceStatus::Paid => Color::Rgb { r: 16, g: 185, b: 129 },
        InvoiceStatus::Overdue => Color::Rgb { r: 185, g: 28, b: 28 },
    };
    Cell::new(status).fg(color)
}

/// Full view of one invoice: who it bills, when, and what for
pub fn render_invoice_detail(invoice: &InvoiceRecord) -> String {
    let mut lines = vec![format!("INVOICE #{}", invoice.invoice_number), String::new()];

    lines.push("Bill To:".to_string());
    match &invoice.client {
        Some(client) => {
            lines.push(format!("  {}", client.name));
            lines.push(format!("  {}", client.email));
            for extra in [&client.address, &client.phone].into_iter().flatten() {
                if !extra.is_empty() {
                    lines.push(format!("  {}", extra));
                }
            }
        }
        None => lines.push(format!("  client #{}", invoice.client_id)),
    }
    lines.push(String::new());

    lines.push(format!("Issue Date: {}", display_date(&invoice.issue_date)));
    lines.push(format!("Due Date:   {}", display_date(&invoice.due_date)));
    lines.push(format!("Status:     {}", invoice.status));
    lines.push(String::new());

    let mut table = Table::new();
    table.set_header(vec!["Description", "Quantity", "Unit Price", "Amount"]);
    for item in &invoice.items {
        table.add_row(vec![
            Cell::new(&item.description),
            Cell::new(item.quantity.normalize()),
            Cell::new(format_money(item.unit_price)),
            Cell::new(format_money(item.amount)),
        ]);
    }
    lines.push(table.to_string());

    lines.push(format!("Subtotal: {}", format_money(invoice.subtotal)));
    lines.push(format!(
        "Tax ({}%): {}",
        invoice.tax_rate.normalize(),
        format_money(invoice.tax_amount())
    ));
    lines.push(format!("Total: {}", format_money(invoice.total)));

    if let Some(notes) = invoice.notes.as_deref().filter(|n| !n.is_empty()) {
        lines.push(String::new());
        lines.push(format!("Notes: {}", notes));
    }

    lines.join("\n")
}
