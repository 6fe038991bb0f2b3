mod api;
mod compute;
mod config;
mod error;
mod models;
mod pdf;
mod ui;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::{ApiClient, InvoiceService};
use crate::error::ValidationError;
use crate::models::LineItemDraft;
use crate::pdf::PdfExporter;
use crate::ui::{
    DeleteOutcome,
    client_wizard::{ClientField, ClientWizardState},
    clients::ClientsState,
    components::confirm::{AssumeYes, Prompt},
    dashboard::DashboardState,
    invoice_wizard::{InvoiceField, InvoiceWizardState, LineItemField},
    invoices::{InvoicesState, render_invoice_detail},
};

#[derive(Parser)]
#[command(name = "invoice-hub", version, about = "Manage clients and invoices on an invoicing service")]
struct Cli {
    /// Service endpoint, overriding INVOICEHUB_API_BASE_URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show invoice and revenue totals
    Dashboard,
    /// Manage clients
    #[command(subcommand)]
    Clients(ClientCommand),
    /// Manage invoices
    #[command(subcommand)]
    Invoices(InvoiceCommand),
}

#[derive(Subcommand)]
enum ClientCommand {
    List,
    Show { id: i64 },
    New(ClientArgs),
    Edit {
        id: i64,
        #[command(flatten)]
        fields: ClientArgs,
    },
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Args)]
struct ClientArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    address: Option<String>,
}

#[derive(Subcommand)]
enum InvoiceCommand {
    List,
    Show { id: i64 },
    New(InvoiceArgs),
    Edit {
        id: i64,
        #[command(flatten)]
        fields: InvoiceArgs,
    },
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Download the invoice as a PDF
    Pdf {
        id: i64,
        /// Directory to write into, overriding INVOICEHUB_PDF_DIR
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(Args)]
struct InvoiceArgs {
    /// Invoice number (generated for new invoices)
    #[arg(long)]
    number: Option<String>,
    /// Id of the client billed
    #[arg(long)]
    client: Option<i64>,
    /// Issue date, YYYY-MM-DD
    #[arg(long)]
    issue_date: Option<String>,
    /// Due date, YYYY-MM-DD
    #[arg(long)]
    due_date: Option<String>,
    /// pending, paid or overdue
    #[arg(long)]
    status: Option<String>,
    /// Tax rate in percent
    #[arg(long)]
    tax_rate: Option<String>,
    #[arg(long)]
    notes: Option<String>,
    /// Line item as "description:quantity:unit_price"; repeat for more.
    /// On edit, giving any item replaces all items.
    #[arg(long = "item", value_parser = parse_item)]
    items: Vec<LineItemDraft>,
}

fn parse_item(value: &str) -> Result<LineItemDraft, String> {
    let mut parts = value.rsplitn(3, ':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(unit_price), Some(quantity), Some(description)) => {
            Ok(LineItemDraft::new(description, quantity, unit_price))
        }
        _ => Err(format!(
            "expected \"description:quantity:unit_price\", got \"{}\"",
            value
        )),
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "invoice_hub=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = config::init()?.with_api_base_url(cli.api_url);
    let service = ApiClient::new(&config)?;
    tracing::debug!("Using invoicing service at {}", service.base_url());

    match cli.command {
        Command::Dashboard => {
            let mut state = DashboardState::new();
            state.load(&service).await;
            println!("{}", state.render());
        }
        Command::Clients(command) => handle_clients_command(&service, command).await?,
        Command::Invoices(command) => {
            handle_invoices_command(&service, command, &config.pdf_dir).await?
        }
    }

    Ok(())
}

async fn show_clients<S: InvoiceService>(service: &S) {
    let mut state = ClientsState::new();
    state.load(service).await;
    println!("{}", state.render());
}

async fn show_invoices<S: InvoiceService>(service: &S) {
    let mut state = InvoicesState::new();
    state.load(service).await;
    println!("{}", state.render());
}

async fn handle_clients_command<S: InvoiceService>(service: &S, command: ClientCommand) -> Result<()> {
    match command {
        ClientCommand::List => show_clients(service).await,
        ClientCommand::Show { id } => {
            let client = service.get_client(id).await.context("Failed to load client")?;
            println!("{}", client.name);
            println!("Email:   {}", client.email);
            println!("Phone:   {}", client.phone.as_deref().unwrap_or("-"));
            println!("Address: {}", client.address.as_deref().unwrap_or("-"));
        }
        ClientCommand::New(fields) => {
            let mut state = ClientWizardState::new();
            apply_client_args(&mut state, fields);
            let client = state.submit(service).await?;
            println!("Created client {} (id {})", client.name, client.id);
            show_clients(service).await;
        }
        ClientCommand::Edit { id, fields } => {
            let mut state = ClientWizardState::new();
            state.load_for_edit(service, id).await?;
            apply_client_args(&mut state, fields);
            let client = state.submit(service).await?;
            println!("Updated client {} (id {})", client.name, client.id);
            show_clients(service).await;
        }
        ClientCommand::Delete { id, yes } => {
            let mut state = ClientsState::new();
            state.load(service).await;
            let outcome = if yes {
                state.delete(service, &AssumeYes, id).await?
            } else {
                state.delete(service, &Prompt, id).await?
            };
            if outcome == DeleteOutcome::Cancelled {
                println!("Cancelled");
                return Ok(());
            }
            println!("{}", state.render());
        }
    }

    Ok(())
}

fn apply_client_args(state: &mut ClientWizardState, fields: ClientArgs) {
    let updates = [
        (ClientField::Name, fields.name),
        (ClientField::Email, fields.email),
        (ClientField::Phone, fields.phone),
        (ClientField::Address, fields.address),
    ];
    for (field, value) in updates {
        if let Some(value) = value {
            state.update_field(field, &value);
        }
    }
}

async fn handle_invoices_command<S: InvoiceService>(
    service: &S,
    command: InvoiceCommand,
    pdf_dir: &str,
) -> Result<()> {
    match command {
        InvoiceCommand::List => show_invoices(service).await,
        InvoiceCommand::Show { id } => {
            let invoice = service.get_invoice(id).await.context("Failed to load invoice")?;
            println!("{}", render_invoice_detail(&invoice));
        }
        InvoiceCommand::New(fields) => {
            let mut state = InvoiceWizardState::new();
            state.load_clients(service).await?;
            apply_invoice_args(&mut state, fields)?;
            save_invoice(service, &mut state).await?;
        }
        InvoiceCommand::Edit { id, fields } => {
            let mut state = InvoiceWizardState::new();
            state.load_for_edit(service, id).await?;
            state.load_clients(service).await?;
            apply_invoice_args(&mut state, fields)?;
            save_invoice(service, &mut state).await?;
        }
        InvoiceCommand::Delete { id, yes } => {
            let mut state = InvoicesState::new();
            state.load(service).await;
            let outcome = if yes {
                state.delete(service, &AssumeYes, id).await?
            } else {
                state.delete(service, &Prompt, id).await?
            };
            if outcome == DeleteOutcome::Cancelled {
                println!("Cancelled");
                return Ok(());
            }
            println!("{}", state.render());
        }
        InvoiceCommand::Pdf { id, output } => {
            let exporter = PdfExporter::new(output.as_deref().unwrap_or(pdf_dir))?;
            let path = exporter.export(service, id).await?;
            println!("Saved {}", path.display());
        }
    }

    Ok(())
}

async fn save_invoice<S: InvoiceService>(service: &S, state: &mut InvoiceWizardState) -> Result<()> {
    println!("{}", state.render_summary());

    let invoice = state.submit(service).await?;
    let verb = if state.invoice_id().is_some() { "Updated" } else { "Created" };
    println!("{} invoice {} (id {})", verb, invoice.invoice_number, invoice.id);

    show_invoices(service).await;
    Ok(())
}

fn apply_invoice_args(state: &mut InvoiceWizardState, fields: InvoiceArgs) -> Result<(), ValidationError> {
    if let Some(client) = fields.client {
        state.select_client(Some(client));
    }

    let updates = [
        (InvoiceField::InvoiceNumber, fields.number),
        (InvoiceField::IssueDate, fields.issue_date),
        (InvoiceField::DueDate, fields.due_date),
        (InvoiceField::Status, fields.status),
        (InvoiceField::TaxRate, fields.tax_rate),
        (InvoiceField::Notes, fields.notes),
    ];
    for (field, value) in updates {
        if let Some(value) = value {
            state.update_field(field, &value)?;
        }
    }

    if !fields.items.is_empty() {
        replace_items(state, &fields.items);
    }

    Ok(())
}

/// Swap the draft's items for `items`, going through the same edits a user would
fn replace_items(state: &mut InvoiceWizardState, items: &[LineItemDraft]) {
    while state.remove_item(state.draft().items.len() - 1) {}

    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            state.add_item();
        }
        state.update_item(index, LineItemField::Description, &item.description);
        state.update_item(index, LineItemField::Quantity, &item.quantity);
        state.update_item(index, LineItemField::UnitPrice, &item.unit_price);
    }
}
