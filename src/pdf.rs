use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::api::InvoiceService;

/// Saves service-rendered invoice PDFs to a local directory
pub struct PdfExporter {
    output_dir: PathBuf,
}

impl PdfExporter {
    pub fn new(output_dir: impl AsRef<Path>) -> Result<Self> {
        let path = output_dir.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("creating {}", path.display()))?;
        }

        Ok(Self {
            output_dir: path.to_path_buf(),
        })
    }

    /// Download the PDF for invoice `id` and write it as `invoice_<number>.pdf`
    pub async fn export<S: InvoiceService>(&self, service: &S, id: i64) -> Result<PathBuf> {
        let invoice = service
            .get_invoice(id)
            .await
            .context("Failed to load invoice")?;
        let bytes = service
            .invoice_pdf(id)
            .await
            .context("Failed to download invoice PDF")?;

        let path = self.output_dir.join(file_name(&invoice.invoice_number));
        fs::write(&path, bytes).with_context(|| format!("writing {}", path.display()))?;

        tracing::info!("Saved PDF for invoice {} to {}", invoice.invoice_number, path.display());
        Ok(path)
    }
}

/// Invoice numbers are user-typed, so path separators are replaced
fn file_name(invoice_number: &str) -> String {
    let safe: String = invoice_number
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    format!("invoice_{}.pdf", safe)
}
