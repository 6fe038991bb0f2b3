use std::time::Duration;

use reqwest::{Method, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::RemoteFailure;
use crate::models::{ClientPayload, ClientRecord, InvoicePayload, InvoiceRecord, Stats};

#[cfg(test)]
pub mod fake;

/// Operations the invoicing service exposes to this client.
///
/// Forms and list views are generic over this trait so they can be driven
/// against [`ApiClient`] or an in-memory stand-in.
#[allow(async_fn_in_trait)]
pub trait InvoiceService {
    async fn list_clients(&self) -> Result<Vec<ClientRecord>, RemoteFailure>;
    async fn get_client(&self, id: i64) -> Result<ClientRecord, RemoteFailure>;
    async fn create_client(&self, client: &ClientPayload) -> Result<ClientRecord, RemoteFailure>;
    async fn update_client(
        &self,
        id: i64,
        client: &ClientPayload,
    ) -> Result<ClientRecord, RemoteFailure>;
    async fn delete_client(&self, id: i64) -> Result<(), RemoteFailure>;

    async fn list_invoices(&self) -> Result<Vec<InvoiceRecord>, RemoteFailure>;
    async fn get_invoice(&self, id: i64) -> Result<InvoiceRecord, RemoteFailure>;
    async fn create_invoice(
        &self,
        invoice: &InvoicePayload,
    ) -> Result<InvoiceRecord, RemoteFailure>;
    async fn update_invoice(
        &self,
        id: i64,
        invoice: &InvoicePayload,
    ) -> Result<InvoiceRecord, RemoteFailure>;
    async fn delete_invoice(&self, id: i64) -> Result<(), RemoteFailure>;

    /// Rendered PDF document for an invoice
    async fn invoice_pdf(&self, id: i64) -> Result<Vec<u8>, RemoteFailure>;

    async fn stats(&self) -> Result<Stats, RemoteFailure>;
}

/// HTTP client for the invoicing service
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client for the endpoint and timeout named in `config`
    pub fn new(config: &Config) -> Result<Self, RemoteFailure> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("invoice-hub/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(
        &self,
        method: Method,
        label: &'static str,
        path: String,
        body: Option<&(impl Serialize + ?Sized)>,
    ) -> Result<Response, RemoteFailure> {
        tracing::debug!("{} {}", label, path);

        let mut request = self.http.request(method, self.url(&path));
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!("{} {} returned status {}", label, path, status);
            return Err(RemoteFailure::Status {
                method: label,
                path,
                status: status.as_u16(),
            });
        }

        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: String) -> Result<T, RemoteFailure> {
        let response = self.send(Method::GET, "GET", path, None::<&()>).await?;
        Ok(response.json().await?)
    }

    async fn write_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        label: &'static str,
        path: String,
        body: &B,
    ) -> Result<T, RemoteFailure> {
        let response = self.send(method, label, path, Some(body)).await?;
        Ok(response.json().await?)
    }

    async fn delete(&self, path: String) -> Result<(), RemoteFailure> {
        self.send(Method::DELETE, "DELETE", path, None::<&()>).await?;
        Ok(())
    }
}

impl InvoiceService for ApiClient {
    async fn list_clients(&self) -> Result<Vec<ClientRecord>, RemoteFailure> {
        self.get_json("/clients".to_string()).await
    }

    async fn get_client(&self, id: i64) -> Result<ClientRecord, RemoteFailure> {
        self.get_json(format!("/clients/{}", id)).await
    }

    async fn create_client(&self, client: &ClientPayload) -> Result<ClientRecord, RemoteFailure> {
        self.write_json(Method::POST, "POST", "/clients".to_string(), client)
            .await
    }

    async fn update_client(
        &self,
        id: i64,
        client: &ClientPayload,
    ) -> Result<ClientRecord, RemoteFailure> {
        self.write_json(Method::PUT, "PUT", format!("/clients/{}", id), client)
            .await
    }

    async fn delete_client(&self, id: i64) -> Result<(), RemoteFailure> {
        self.delete(format!("/clients/{}", id)).await
    }

    async fn list_invoices(&self) -> Result<Vec<InvoiceRecord>, RemoteFailure> {
        self.get_json("/invoices".to_string()).await
    }

    async fn get_invoice(&self, id: i64) -> Result<InvoiceRecord, RemoteFailure> {
        self.get_json(format!("/invoices/{}", id)).await
    }

    async fn create_invoice(
        &self,
        invoice: &InvoicePayload,
    ) -> Result<InvoiceRecord, RemoteFailure> {
        self.write_json(Method::POST, "POST", "/invoices".to_string(), invoice)
            .await
    }

    async fn update_invoice(
        &self,
        id: i64,
        invoice: &InvoicePayload,
    ) -> Result<InvoiceRecord, RemoteFailure> {
        self.write_json(Method::PUT, "PUT", format!("/invoices/{}", id), invoice)
            .await
    }

    async fn delete_invoice(&self, id: i64) -> Result<(), RemoteFailure> {
        self.delete(format!("/invoices/{}", id)).await
    }

    async fn invoice_pdf(&self, id: i64) -> Result<Vec<u8>, RemoteFailure> {
        let response = self
            .send(Method::GET, "GET", format!("/invoices/{}/pdf", id), None::<&()>)
            .await?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn stats(&self) -> Result<Stats, RemoteFailure> {
        self.get_json("/stats".to_string()).await
    }
}
