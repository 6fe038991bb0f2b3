//! Error types for the invoicing client
//!
//! Local precondition failures never reach the service. Remote failures are
//! kept structured for logging but are surfaced to the user as a single
//! generic message per operation.

use thiserror::Error;

/// A draft failed a local check before submission
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please select a client")]
    NoClientSelected,

    #[error("Client #{0} does not exist")]
    UnknownClient(i64),

    #[error("Please add at least one item")]
    NoItems,

    #[error("Item {} needs a description", index + 1)]
    MissingItemDescription { index: usize },

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),

    #[error("{field} must be a number, got '{value}'")]
    InvalidNumber { field: String, value: String },

    #[error("{field} cannot be negative")]
    NegativeNumber { field: String },

    #[error("{field} is too large")]
    OutOfRange { field: String },

    #[error("{field} must be a date in YYYY-MM-DD form, got '{value}'")]
    InvalidDate { field: &'static str, value: String },

    #[error("Unknown invoice status '{0}' (expected pending, paid or overdue)")]
    UnknownStatus(String),
}

/// A call to the invoicing service did not succeed
#[derive(Error, Debug)]
pub enum RemoteFailure {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{method} {path} returned status {status}")]
    Status {
        method: &'static str,
        path: String,
        status: u16,
    },
}

/// What an edit form reports back to its caller
#[derive(Error, Debug)]
pub enum FormError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to load {entity}")]
    Load {
        entity: &'static str,
        #[source]
        source: RemoteFailure,
    },

    #[error("Failed to save {entity}")]
    Save {
        entity: &'static str,
        #[source]
        source: RemoteFailure,
    },

    #[error("A save is already in progress")]
    SubmitInProgress,
}

/// A list view operation failed
#[derive(Error, Debug)]
pub enum ViewError {
    #[error("{message}")]
    Delete {
        message: &'static str,
        #[source]
        source: RemoteFailure,
    },

    #[error("Could not ask for confirmation")]
    Confirm(#[source] inquire::InquireError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_facing_messages() {
        assert_eq!(
            ValidationError::MissingItemDescription { index: 0 }.to_string(),
            "Item 1 needs a description"
        );

        let err = FormError::Save {
            entity: "invoice",
            source: RemoteFailure::Status {
                method: "PUT",
                path: "/invoices/3".to_string(),
                status: 500,
            },
        };
        assert_eq!(err.to_string(), "Failed to save invoice");
    }
}
