//! Ticketapp command-line front end.
//!
//! Presentation glue only: parses arguments, calls the application layer,
//! and renders whatever comes back. All invariants live below this crate.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ticketapp_application::{SessionService, TicketService};
use ticketapp_core::{KeyValueStore, Ticket, TicketDraft, TicketError};
use ticketapp_infrastructure::JsonFileStore;

#[derive(Parser)]
#[command(name = "ticketapp")]
#[command(about = "Ticketapp - a local-first ticket tracker", long_about = None)]
struct Cli {
    /// Directory holding the persisted slots (defaults to the platform
    /// data directory).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Establish a session for the given email
    Login {
        email: String,
        /// Optional display name
        #[arg(long)]
        name: Option<String>,
    },
    /// Clear the current session
    Logout,
    /// Show who is currently logged in
    Whoami,
    /// List all tickets in creation order
    List,
    /// Show one ticket
    Show { id: String },
    /// Create a new ticket
    Create {
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// One of: open, in_progress, closed
        #[arg(long, default_value = "open")]
        status: String,
    },
    /// Edit an existing ticket (omitted fields keep their current value)
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// One of: open, in_progress, closed
        #[arg(long)]
        status: Option<String>,
    },
    /// Delete a ticket
    Delete { id: String },
    /// Show per-status ticket counts
    Stats,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), TicketError> {
    let store: Arc<dyn KeyValueStore> = match &cli.data_dir {
        Some(dir) => Arc::new(JsonFileStore::new(dir)?),
        None => Arc::new(JsonFileStore::open_default()?),
    };
    let sessions = SessionService::new(store.clone());
    let tickets = TicketService::new(store, sessions.clone());

    match cli.command {
        Commands::Login { email, name } => {
            let session = sessions.login(email, name)?;
            println!("Logged in as {}", session.display_name());
        }
        Commands::Logout => {
            sessions.clear_session()?;
            println!("Logged out");
        }
        Commands::Whoami => match sessions.current_session() {
            Some(session) => println!("{} <{}>", session.display_name(), session.email),
            None => println!("Not logged in"),
        },
        Commands::List => {
            let all = tickets.list_tickets()?;
            if all.is_empty() {
                println!("No tickets yet");
            } else {
                for ticket in &all {
                    print_ticket_line(ticket);
                }
            }
        }
        Commands::Show { id } => match tickets.get_ticket(&id)? {
            Some(ticket) => print_ticket_full(&ticket),
            None => return Err(TicketError::not_found("ticket", id)),
        },
        Commands::Create {
            title,
            description,
            status,
        } => {
            let created = tickets.create_ticket(&TicketDraft::new(title, description, status))?;
            println!("Created ticket {}", created.id);
        }
        Commands::Update {
            id,
            title,
            description,
            status,
        } => {
            // Pre-fill omitted fields from the current ticket, like the
            // edit form does.
            let current = tickets
                .get_ticket(&id)?
                .ok_or_else(|| TicketError::not_found("ticket", id.clone()))?;
            let draft = TicketDraft::new(
                title.unwrap_or(current.title),
                description.or(current.description),
                status.unwrap_or_else(|| current.status.as_str().to_string()),
            );
            let updated = tickets.update_ticket(&id, &draft)?;
            println!("Updated ticket {}", updated.id);
        }
        Commands::Delete { id } => {
            tickets.delete_ticket(&id)?;
            println!("Deleted ticket {id}");
        }
        Commands::Stats => {
            let stats = tickets.ticket_stats()?;
            println!("Total:       {}", stats.total);
            println!("Open:        {}", stats.open);
            println!("In progress: {}", stats.in_progress);
            println!("Closed:      {}", stats.closed);
        }
    }

    Ok(())
}

fn print_ticket_line(ticket: &Ticket) {
    println!(
        "{}  [{}]  {}",
        ticket.id,
        ticket.status.label(),
        ticket.title
    );
}

fn print_ticket_full(ticket: &Ticket) {
    println!("id:          {}", ticket.id);
    println!("title:       {}", ticket.title);
    println!("status:      {}", ticket.status.label());
    println!("created at:  {}", ticket.created_at);
    if let Some(description) = &ticket.description {
        println!("description: {description}");
    }
}

fn report(err: &TicketError) {
    match err {
        TicketError::Unauthorized => {
            eprintln!("Not logged in. Run `ticketapp login <email>` first.");
        }
        TicketError::Validation(errors) => {
            for (field, message) in errors.iter() {
                eprintln!("{field}: {message}");
            }
        }
        TicketError::NotFound { entity_type, id } => {
            eprintln!("No such {entity_type}: {id}");
        }
        other => eprintln!("Error: {other}"),
    }
}
