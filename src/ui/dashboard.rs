use comfy_table::{Cell, Table};

use crate::api::InvoiceService;
use crate::compute::format_money;
use crate::models::Stats;

// Represents the state of the dashboard screen
pub struct DashboardState {
    stats: Stats,
    loading: bool,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            stats: Stats::default(),
            loading: true,
        }
    }

    /// Fetch the aggregate figures; on failure every figure reads zero
    pub async fn load<S: InvoiceService>(&mut self, service: &S) {
        match service.stats().await {
            Ok(stats) => self.stats = stats,
            Err(e) => {
                tracing::warn!("Error loading stats: {}", e);
                self.stats = Stats::default();
            }
        }
        self.loading = false;
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn render(&self) -> String {
        if self.loading {
            return "Loading stats...".to_string();
        }
        let stats = &self.stats;
        let mut table = Table::new();
        table.set_header(vec!["Metric", "Value"]);
        table.add_row(vec![Cell::new("Total Invoices"), Cell::new(stats.total_invoices)]);
        table.add_row(vec![Cell::new("Total Clients"), Cell::new(stats.total_clients)]);
        table.add_row(vec![Cell::new("Pending Invoices"), Cell::new(stats.pending_invoices)]);
        table.add_row(vec![Cell::new("Paid Invoices"), Cell::new(stats.paid_invoices)]);
        table.add_row(vec![
            Cell::new("Total Revenue"),
            Cell::new(format_money(stats.total_revenue)),
        ]);
        table.add_row(vec![
            Cell::new("Pending Amount"),
            Cell::new(format_money(stats.pending_amount)),
        ]);
        table.to_string()
    }
}
