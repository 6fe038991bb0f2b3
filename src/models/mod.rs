mod client;
mod draft;
mod invoice;
mod stats;

pub use client::{ClientPayload, ClientRecord};
pub use draft::{ClientDraft, InvoiceDraft, LineItemDraft};
pub use invoice::{InvoiceItemPayload, InvoiceItemRecord, InvoicePayload, InvoiceRecord, InvoiceStatus};
pub use stats::Stats;
