//! CLI interface for the ticket store.
//!
//! Each subcommand is non-interactive: arguments in, JSON out. Successful
//! results are printed to stdout wrapped as `{"data": ...}`; a one-line human
//! summary of any change goes to stderr.
//!
//! ```text
//! tickets list
//! tickets create --flight 322 --passport P123
//! tickets update --ticket TICKET… --action status --value cancelled
//! tickets update --ticket TICKET… --seat 17
//! tickets flights
//! ```

mod format;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::error;

use crate::model::{Field, FieldValue, FlightId, TicketId};
use crate::storage::{StoreError, TicketStore};

use format::{envelope, ticket_summary};

/// Tickets — issue and amend airline tickets.
#[derive(Debug, Parser)]
#[command(name = "tickets")]
pub struct Cli {
    /// Tickets file to use instead of the configured one.
    #[arg(long, global = true)]
    pub data_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every ticket, oldest first.
    List,

    /// Show a single ticket.
    Show {
        /// Ticket id.
        ticket: String,
    },

    /// Issue a ticket on a flight. Prints the created ticket.
    Create {
        /// Flight id from the catalog (see `tickets flights`).
        #[arg(long)]
        flight: u32,

        /// Passenger passport number.
        #[arg(long)]
        passport: String,
    },

    /// Change the seat or status of a ticket. Prints the updated ticket.
    ///
    /// `--value` is read as JSON when it parses as a number or string
    /// (`17`, `"5"`), and as plain text otherwise (`cancelled`).
    Update {
        /// Ticket id.
        #[arg(long)]
        ticket: String,

        /// Field to change.
        #[arg(
            long,
            value_enum,
            requires = "value",
            conflicts_with = "seat",
            required_unless_present = "seat"
        )]
        action: Option<ActionArg>,

        /// New value for the field.
        #[arg(long, requires = "action")]
        value: Option<String>,

        /// New seat; shorthand for `--action seat --value <n>`.
        #[arg(long)]
        seat: Option<i64>,
    },

    /// List the flights tickets can be issued for.
    Flights,
}

/// CLI-facing update field, mapped to the domain `Field`.
#[derive(Debug, Clone, ValueEnum)]
pub enum ActionArg {
    /// Seat number, 1 to 32.
    Seat,
    /// Free-form status, e.g. `cancelled`.
    Status,
}

impl ActionArg {
    fn to_domain(&self) -> Field {
        match self {
            Self::Seat => Field::Seat,
            Self::Status => Field::Status,
        }
    }
}

/// Run one command against the store, returning an error message on failure.
pub fn run(command: Command, store: &TicketStore) -> Result<(), String> {
    match command {
        Command::List => cmd_list(store),
        Command::Show { ticket } => cmd_show(store, &ticket),
        Command::Create { flight, passport } => cmd_create(store, flight, &passport),
        Command::Update {
            ticket,
            action,
            value,
            seat,
        } => {
            let (field, value) = update_request(action.as_ref(), value.as_deref(), seat)?;
            cmd_update(store, &ticket, field, value)
        }
        Command::Flights => cmd_flights(store),
    }
}

fn cmd_list(store: &TicketStore) -> Result<(), String> {
    let tickets = store.list();
    if tickets.is_empty() {
        eprintln!("No tickets in {}", store.path().display());
    }
    println!("{}", envelope(&tickets)?);
    Ok(())
}

fn cmd_show(store: &TicketStore, ticket: &str) -> Result<(), String> {
    let ticket = store
        .get(&TicketId::new(ticket))
        .map_err(|e| report("show ticket", &e))?;
    println!("{}", envelope(&ticket)?);
    Ok(())
}

fn cmd_create(store: &TicketStore, flight: u32, passport: &str) -> Result<(), String> {
    let ticket = store
        .create(FlightId(flight), passport)
        .map_err(|e| report("create ticket", &e))?;

    println!("{}", envelope(&ticket)?);
    eprintln!("Created {}", ticket_summary(&ticket));
    Ok(())
}

fn cmd_update(
    store: &TicketStore,
    ticket: &str,
    field: Field,
    value: FieldValue,
) -> Result<(), String> {
    let ticket = store
        .update(&TicketId::new(ticket), field, value)
        .map_err(|e| report("update ticket", &e))?;

    println!("{}", envelope(&ticket)?);
    eprintln!("Updated {field} on {}", ticket_summary(&ticket));
    Ok(())
}

fn cmd_flights(store: &TicketStore) -> Result<(), String> {
    let flights: Vec<_> = store.catalog().flights().collect();
    println!("{}", envelope(&flights)?);
    Ok(())
}

/// Renders a store error for the user, logging the ones that leave the
/// tickets file in doubt.
fn report(action: &str, e: &StoreError) -> String {
    if e.is_persistence() {
        error!(error = %e, "{action} failed while persisting tickets");
    }
    format!("failed to {action}: {e}")
}

/// Turns the two spellings of `update` into a field and value.
fn update_request(
    action: Option<&ActionArg>,
    value: Option<&str>,
    seat: Option<i64>,
) -> Result<(Field, FieldValue), String> {
    match (action, value, seat) {
        (Some(action), Some(value), None) => Ok((action.to_domain(), parse_value(value))),
        (None, None, Some(seat)) => Ok((Field::Seat, FieldValue::Integer(seat))),
        _ => Err("update needs either --action with --value, or --seat".to_string()),
    }
}

/// Reads a raw `--value` argument.
///
/// JSON integers and strings keep their type; anything else is plain text.
fn parse_value(raw: &str) -> FieldValue {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Number(n)) => n
            .as_i64()
            .map_or_else(|| FieldValue::Text(raw.to_string()), FieldValue::Integer),
        Ok(serde_json::Value::String(s)) => FieldValue::Text(s),
        _ => FieldValue::Text(raw.to_string()),
    }
}
