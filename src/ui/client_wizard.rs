use crate::api::InvoiceService;
use crate::error::{FormError, ValidationError};
use crate::models::{ClientDraft, ClientPayload, ClientRecord};
use crate::ui::WizardPhase;

// Represents a field in the client form
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClientField {
    Name,
    Email,
    Phone,
    Address,
}

// Represents the client form state
#[derive(Default)]
pub struct ClientWizardState {
    client_id: Option<i64>,
    draft: ClientDraft,
    phase: WizardPhase,
    show_error: Option<String>,
}

impl ClientWizardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_existing(client: ClientRecord) -> Self {
        Self {
            client_id: Some(client.id),
            draft: ClientDraft::from(client),
            phase: WizardPhase::Editing,
            show_error: None,
        }
    }

    pub async fn load_for_edit<S: InvoiceService>(
        &mut self,
        service: &S,
        id: i64,
    ) -> Result<(), FormError> {
        match service.get_client(id).await {
            Ok(client) => {
                *self = Self::from_existing(client);
                Ok(())
            }
            Err(source) => {
                tracing::error!("Error loading client {}: {}", id, source);
                let err = FormError::Load {
                    entity: "client",
                    source,
                };
                self.show_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    pub fn client_id(&self) -> Option<i64> {
        self.client_id
    }

    pub fn draft(&self) -> &ClientDraft {
        &self.draft
    }

    pub fn phase(&self) -> WizardPhase {
        self.phase
    }

    pub fn show_error(&self) -> Option<&str> {
        self.show_error.as_deref()
    }

    pub fn can_submit(&self) -> bool {
        self.phase != WizardPhase::Submitting
    }

    pub fn update_field(&mut self, field: ClientField, value: &str) {
        let field_value = match field {
            ClientField::Name => &mut self.draft.name,
            ClientField::Email => &mut self.draft.email,
            ClientField::Phone => &mut self.draft.phone,
            ClientField::Address => &mut self.draft.address,
        };
        *field_value = value.to_string();

        self.show_error = None;
        if self.phase != WizardPhase::Editing {
            self.phase = WizardPhase::Editing;
        }
    }

    pub fn validate(&self) -> Result<ClientPayload, ValidationError> {
        let name = self.draft.name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingField("Name"));
        }

        let email = self.draft.email.trim();
        if email.is_empty() {
            return Err(ValidationError::MissingField("Email"));
        }
        if !looks_like_email(email) {
            return Err(ValidationError::InvalidEmail(email.to_string()));
        }

        Ok(ClientPayload {
            name: name.to_string(),
            email: email.to_string(),
            phone: self.draft.phone.trim().to_string(),
            address: self.draft.address.trim().to_string(),
        })
    }

    pub async fn submit<S: InvoiceService>(&mut self, service: &S) -> Result<ClientRecord, FormError> {
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

        let result = match self.client_id {
            Some(id) => service.update_client(id, &payload).await,
            None => service.create_client(&payload).await,
        };

        match result {
            Ok(client) => {
                tracing::info!("Saved client {} (id {})", client.name, client.id);
                self.phase = WizardPhase::Done;
                Ok(client)
            }
            Err(source) => {
                tracing::error!("Error saving client {}: {}", payload.name, source);
                let err = FormError::Save {
                    entity: "client",
                    source,
                };
                self.phase = WizardPhase::Editing;
                self.show_error = Some(err.to_string());
                Err(err)
            }
        }
    }
}

/// `local@domain` with a dot in the domain and no whitespace
fn looks_like_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.split('.').count() >= 2
                && domain.split('.').all(|part| !part.is_empty())
        }
        None => false,
    }
}
