//! In-memory stand-in for the invoicing service, used by tests.

use std::sync::Mutex;

use rust_decimal::Decimal;

use super::InvoiceService;
use crate::error::RemoteFailure;
use crate::models::{
    ClientPayload, ClientRecord, InvoiceItemRecord, InvoicePayload, InvoiceRecord, InvoiceStatus,
    Stats,
};

#[derive(Default)]
pub struct FakeService {
    pub clients: Mutex<Vec<ClientRecord>>,
    pub invoices: Mutex<Vec<InvoiceRecord>>,
    /// Every call made, e.g. `"PUT /invoices/3"`
    pub calls: Mutex<Vec<String>>,
    /// Last invoice body received by create or update
    pub last_invoice_payload: Mutex<Option<InvoicePayload>>,
    pub fail_reads: bool,
    pub fail_writes: bool,
    /// Clients that still have invoices cannot be deleted
    pub enforce_client_references: bool,
}

impl FakeService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(self, id: i64, name: &str) -> Self {
        self.clients.lock().unwrap().push(ClientRecord {
            id,
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: None,
            address: None,
            created_at: None,
        });
        self
    }

    pub fn with_invoice(self, invoice: InvoiceRecord) -> Self {
        self.invoices.lock().unwrap().push(invoice);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn failure(method: &'static str, path: String, status: u16) -> RemoteFailure {
        RemoteFailure::Status {
            method,
            path,
            status,
        }
    }

    fn next_id<T>(items: &[T], id: impl Fn(&T) -> i64) -> i64 {
        items.iter().map(id).max().unwrap_or(0) + 1
    }

    fn build_invoice(&self, id: i64, payload: &InvoicePayload) -> InvoiceRecord {
        let client = self
            .clients
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == payload.client_id)
            .cloned();

        let items: Vec<InvoiceItemRecord> = payload
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| InvoiceItemRecord {
                id: Some(i as i64 + 1),
                description: item.description.clone(),
                quantity: item.quantity,
                unit_price: item.unit_price,
                amount: item.quantity * item.unit_price,
            })
            .collect();
        let subtotal: Decimal = items.iter().map(|i| i.amount).sum();

        InvoiceRecord {
            id,
            invoice_number: payload.invoice_number.clone(),
            client_id: payload.client_id,
            client,
            issue_date: payload.issue_date.trim_end_matches('Z').to_string(),
            due_date: payload.due_date.trim_end_matches('Z').to_string(),
            status: payload.status,
            notes: Some(payload.notes.clone()),
            subtotal,
            tax_rate: payload.tax_rate,
            total: subtotal * (Decimal::ONE + payload.tax_rate / Decimal::ONE_HUNDRED),
            created_at: None,
            items,
        }
    }
}

impl InvoiceService for FakeService {
    async fn list_clients(&self) -> Result<Vec<ClientRecord>, RemoteFailure> {
        self.record("GET /clients".to_string());
        if self.fail_reads {
            return Err(Self::failure("GET", "/clients".to_string(), 500));
        }
        Ok(self.clients.lock().unwrap().clone())
    }

    async fn get_client(&self, id: i64) -> Result<ClientRecord, RemoteFailure> {
        let path = format!("/clients/{}", id);
        self.record(format!("GET {}", path));
        if self.fail_reads {
            return Err(Self::failure("GET", path, 500));
        }
        self.clients
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| Self::failure("GET", path, 404))
    }

    async fn create_client(&self, client: &ClientPayload) -> Result<ClientRecord, RemoteFailure> {
        self.record("POST /clients".to_string());
        if self.fail_writes {
            return Err(Self::failure("POST", "/clients".to_string(), 500));
        }
        let mut clients = self.clients.lock().unwrap();
        let record = ClientRecord {
            id: Self::next_id(&clients, |c| c.id),
            name: client.name.clone(),
            email: client.email.clone(),
            phone: Some(client.phone.clone()),
            address: Some(client.address.clone()),
            created_at: None,
        };
        clients.push(record.clone());
        Ok(record)
    }

    async fn update_client(
        &self,
        id: i64,
        client: &ClientPayload,
    ) -> Result<ClientRecord, RemoteFailure> {
        let path = format!("/clients/{}", id);
        self.record(format!("PUT {}", path));
        if self.fail_writes {
            return Err(Self::failure("PUT", path, 500));
        }
        let mut clients = self.clients.lock().unwrap();
        let record = clients
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| Self::failure("PUT", path, 404))?;
        record.name = client.name.clone();
        record.email = client.email.clone();
        record.phone = Some(client.phone.clone());
        record.address = Some(client.address.clone());
        Ok(record.clone())
    }

    async fn delete_client(&self, id: i64) -> Result<(), RemoteFailure> {
        let path = format!("/clients/{}", id);
        self.record(format!("DELETE {}", path));
        let referenced = self
            .invoices
            .lock()
            .unwrap()
            .iter()
            .any(|i| i.client_id == id);
        if self.fail_writes || (self.enforce_client_references && referenced) {
            return Err(Self::failure("DELETE", path, 500));
        }
        let mut clients = self.clients.lock().unwrap();
        let before = clients.len();
        clients.retain(|c| c.id != id);
        if clients.len() == before {
            return Err(Self::failure("DELETE", path, 404));
        }
        Ok(())
    }

    async fn list_invoices(&self) -> Result<Vec<InvoiceRecord>, RemoteFailure> {
        self.record("GET /invoices".to_string());
        if self.fail_reads {
            return Err(Self::failure("GET", "/invoices".to_string(), 500));
        }
        Ok(self.invoices.lock().unwrap().clone())
    }

    async fn get_invoice(&self, id: i64) -> Result<InvoiceRecord, RemoteFailure> {
        let path = format!("/invoices/{}", id);
        self.record(format!("GET {}", path));
        if self.fail_reads {
            return Err(Self::failure("GET", path, 500));
        }
        self.invoices
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or_else(|| Self::failure("GET", path, 404))
    }

    async fn create_invoice(
        &self,
        invoice: &InvoicePayload,
    ) -> Result<InvoiceRecord, RemoteFailure> {
        self.record("POST /invoices".to_string());
        *self.last_invoice_payload.lock().unwrap() = Some(invoice.clone());
        if self.fail_writes {
            return Err(Self::failure("POST", "/invoices".to_string(), 500));
        }
        let id = Self::next_id(&self.invoices.lock().unwrap(), |i| i.id);
        let record = self.build_invoice(id, invoice);
        self.invoices.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn update_invoice(
        &self,
        id: i64,
        invoice: &InvoicePayload,
    ) -> Result<InvoiceRecord, RemoteFailure> {
        let path = format!("/invoices/{}", id);
        self.record(format!("PUT {}", path));
        *self.last_invoice_payload.lock().unwrap() = Some(invoice.clone());
        if self.fail_writes {
            return Err(Self::failure("PUT", path, 500));
        }
        let record = self.build_invoice(id, invoice);
        let mut invoices = self.invoices.lock().unwrap();
        let slot = invoices
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| Self::failure("PUT", path, 404))?;
        *slot = record.clone();
        Ok(record)
    }

    async fn delete_invoice(&self, id: i64) -> Result<(), RemoteFailure> {
        let path = format!("/invoices/{}", id);
        self.record(format!("DELETE {}", path));
        if self.fail_writes {
            return Err(Self::failure("DELETE", path, 500));
        }
        let mut invoices = self.invoices.lock().unwrap();
        let before = invoices.len();
        invoices.retain(|i| i.id != id);
        if invoices.len() == before {
            return Err(Self::failure("DELETE", path, 404));
        }
        Ok(())
    }

    async fn invoice_pdf(&self, id: i64) -> Result<Vec<u8>, RemoteFailure> {
        let path = format!("/invoices/{}/pdf", id);
        self.record(format!("GET {}", path));
        if self.fail_reads {
            return Err(Self::failure("GET", path, 500));
        }
        Ok(b"%PDF-1.4 fake".to_vec())
    }

    async fn stats(&self) -> Result<Stats, RemoteFailure> {
        self.record("GET /stats".to_string());
        if self.fail_reads {
            return Err(Self::failure("GET", "/stats".to_string(), 500));
        }
        let invoices = self.invoices.lock().unwrap();
        let sum_for = |status: InvoiceStatus| {
            invoices
                .iter()
                .filter(|i| i.status == status)
                .map(|i| i.total)
                .sum::<Decimal>()
        };
        Ok(Stats {
            total_invoices: invoices.len() as u64,
            total_clients: self.clients.lock().unwrap().len() as u64,
            pending_invoices: invoices
                .iter()
                .filter(|i| i.status == InvoiceStatus::Pending)
                .count() as u64,
            paid_invoices: invoices
                .iter()
                .filter(|i| i.status == InvoiceStatus::Paid)
                .count() as u64,
            total_revenue: sum_for(InvoiceStatus::Paid),
            pending_amount: sum_for(InvoiceStatus::Pending),
        })
    }
}
