pub mod client_wizard;
pub mod clients;
pub mod components;
pub mod dashboard;
pub mod invoice_wizard;
pub mod invoices;

/// Where a create/edit form is in its lifecycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WizardPhase {
    /// Defaults only, nothing typed yet
    #[default]
    New,
    Editing,
    /// A save request is in flight; submitting again is refused
    Submitting,
    /// Saved; the caller returns to the list
    Done,
}

/// Result of a delete request from a list view
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Cancelled,
}
