use comfy_table::{Attribute, Cell, Table};

use crate::api::InvoiceService;
use crate::error::ViewError;
use crate::models::ClientRecord;
use crate::ui::DeleteOutcome;
use crate::ui::components::confirm::Confirm;

// Represents the state of the client list screen
pub struct ClientsState {
    clients: Vec<ClientRecord>,
    loading: bool,
}

impl Default for ClientsState {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientsState {
    pub fn new() -> Self {
        Self {
            clients: Vec::new(),
            loading: true,
        }
    }

    pub async fn load<S: InvoiceService>(&mut self, service: &S) {
        match service.list_clients().await {
            Ok(clients) => {
                tracing::debug!("Loaded {} clients", clients.len());
                self.clients = clients;
            }
            Err(e) => tracing::warn!("Error loading clients: {}", e),
        }
        self.loading = false;
    }

    pub fn clients(&self) -> &[ClientRecord] {
        &self.clients
    }

    /// Delete a client after confirmation, then refetch the list.
    ///
    /// The service refuses clients that still have invoices; that refusal is
    /// reported like any other failure.
    pub async fn delete<S: InvoiceService, C: Confirm>(
        &mut self,
        service: &S,
        confirm: &C,
        id: i64,
    ) -> Result<DeleteOutcome, ViewError> {
        let name = self
            .clients
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| format!("#{}", id));

        let prompt = format!("Are you sure you want to delete client \"{}\"?", name);
        if !confirm.confirm(&prompt)? {
            return Ok(DeleteOutcome::Cancelled);
        }

        if let Err(source) = service.delete_client(id).await {
            tracing::error!("Error deleting client {}: {}", id, source);
            return Err(ViewError::Delete {
                message: "Failed to delete client. They may have associated invoices.",
                source,
            });
        }

        tracing::info!("Deleted client {}", name);
        self.load(service).await;
        Ok(DeleteOutcome::Deleted)
    }

    pub fn render(&self) -> String {
        if self.loading {
            return "Loading clients...".to_string();
        }
        if self.clients.is_empty() {
            return "No clients yet. Create your first client to get started!".to_string();
        }

        let mut table = Table::new();
        table.set_header(vec!["ID", "Name", "Email", "Phone", "Address"]);

        for client in &self.clients {
            table.add_row(vec![
                Cell::new(client.id),
                Cell::new(&client.name).add_attribute(Attribute::Bold),
                Cell::new(&client.email),
                Cell::new(or_dash(&client.phone)),
                Cell::new(or_dash(&client.address)),
            ]);
        }

        table.to_string()
    }
}

fn or_dash(value: &Option<String>) -> &str {
    match value.as_deref() {
        Some(v) if !v.is_empty() => v,
        _ => "-",
    }
}
