//! The ticket store: the in-memory ticket collection and its backing file.
//!
//! The whole collection lives in a single JSON document:
//!
//! ```text
//! <data-file>          # [ { id, flight { id, origin, destination, departure }, seat, passport, status }, ... ]
//! <data-file>.tmp      # Transient, only while a rewrite is in flight
//! ```
//!
//! Every mutation builds the next collection, rewrites the file with it, and
//! only then swaps it into memory. Memory and disk agree after every call,
//! including failed ones. The rewrite is O(n) in the number of tickets.

mod file;

use std::{
    collections::HashMap,
    io,
    path::{Path, PathBuf},
};

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::catalog::FlightCatalog;
use crate::generator::TicketGenerator;
use crate::model::{Field, FieldValue, FlightId, STATUS_ACTIVE, Seat, Ticket, TicketId};

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("flight not found: {0}")]
    InvalidFlight(FlightId),

    #[error("ticket not found: {0}")]
    TicketNotFound(TicketId),

    #[error("invalid {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("no unused ticket id after {0} attempts")]
    IdsExhausted(usize),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    /// Whether this error came from reading or writing the data file.
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Json(_))
    }
}

pub type Result<T> = core::result::Result<T, StoreError>;

/// Tries at drawing a fresh id before giving up on the generator.
const MAX_ID_ATTEMPTS: usize = 64;

/// The ticket collection plus everything needed to mutate it.
///
/// Guarded as one unit so each create/update is a single critical section.
struct Inner {
    tickets: Vec<Ticket>,
    /// Position of the first ticket with each id.
    index: HashMap<TicketId, usize>,
    generator: Box<dyn TicketGenerator>,
}

impl Inner {
    fn commit(&mut self, tickets: Vec<Ticket>) {
        self.index = index_of(&tickets);
        self.tickets = tickets;
    }

    fn fresh_id(&mut self) -> Result<TicketId> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = self.generator.ticket_id();
            if !self.index.contains_key(&id) {
                return Ok(id);
            }
            debug!(%id, "generated ticket id already taken, drawing again");
        }
        Err(StoreError::IdsExhausted(MAX_ID_ATTEMPTS))
    }
}

fn index_of(tickets: &[Ticket]) -> HashMap<TicketId, usize> {
    let mut index = HashMap::with_capacity(tickets.len());
    for (pos, ticket) in tickets.iter().enumerate() {
        index.entry(ticket.id.clone()).or_insert(pos);
    }
    index
}

/// Owns the ticket collection and keeps its data file in sync.
///
/// Safe to share between threads behind an `Arc`: mutations are serialized,
/// reads get a consistent snapshot.
pub struct TicketStore {
    path: PathBuf,
    catalog: FlightCatalog,
    inner: RwLock<Inner>,
}

impl TicketStore {
    /// Opens the store backed by `path`, loading any tickets already there.
    ///
    /// A missing file yields an empty store; the file is created on the first
    /// mutation. An unreadable or corrupt file is an error rather than an
    /// empty store, so existing tickets are never silently dropped.
    pub fn open(
        path: impl Into<PathBuf>,
        catalog: FlightCatalog,
        generator: impl TicketGenerator + 'static,
    ) -> Result<Self> {
        let path = path.into();
        let tickets = file::load(&path)?;
        let index = index_of(&tickets);
        if index.len() != tickets.len() {
            warn!(
                path = %path.display(),
                duplicates = tickets.len() - index.len(),
                "tickets file holds duplicate ticket ids"
            );
        }
        info!(path = %path.display(), tickets = tickets.len(), "ticket store opened");

        Ok(Self {
            path,
            catalog,
            inner: RwLock::new(Inner {
                tickets,
                index,
                generator: Box::new(generator),
            }),
        })
    }

    /// The file this store persists to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The flights tickets can be created for.
    pub fn catalog(&self) -> &FlightCatalog {
        &self.catalog
    }

    /// All tickets, in the order they were created.
    pub fn list(&self) -> Vec<Ticket> {
        self.inner.read().tickets.clone()
    }

    /// Looks up a single ticket.
    pub fn get(&self, id: &TicketId) -> Result<Ticket> {
        let inner = self.inner.read();
        inner
            .index
            .get(id)
            .map(|&pos| inner.tickets[pos].clone())
            .ok_or_else(|| StoreError::TicketNotFound(id.clone()))
    }

    /// Issues a new ticket on `flight_id` for `passport`.
    ///
    /// The ticket gets a fresh id, a generated seat, and status `active`.
    pub fn create(&self, flight_id: FlightId, passport: &str) -> Result<Ticket> {
        let flight = self
            .catalog
            .lookup(flight_id)
            .ok_or(StoreError::InvalidFlight(flight_id))?
            .clone();
        if passport.trim().is_empty() {
            return Err(StoreError::InvalidValue {
                field: "passport",
                reason: "must not be empty".into(),
            });
        }

        let mut inner = self.inner.write();
        let ticket = Ticket {
            id: inner.fresh_id()?,
            flight,
            seat: inner.generator.seat(),
            passport: passport.to_string(),
            status: STATUS_ACTIVE.to_string(),
        };

        let mut next = Vec::with_capacity(inner.tickets.len() + 1);
        next.extend_from_slice(&inner.tickets);
        next.push(ticket.clone());

        file::write(&self.path, &next)?;
        inner.commit(next);

        info!(ticket = %ticket.id, flight = %flight_id, seat = %ticket.seat, "ticket created");
        Ok(ticket)
    }

    /// Replaces one field on the ticket with id `id`.
    ///
    /// Seats take an integer in `1..=32`, statuses a non-empty string. An
    /// unknown id is reported before the value is checked. Should several tickets ever share `id`, all of them are updated.
    pub fn update(&self, id: &TicketId, field: Field, value: FieldValue) -> Result<Ticket> {
        let mut inner = self.inner.write();
        let Some(&first) = inner.index.get(id) else {
            return Err(StoreError::TicketNotFound(id.clone()));
        };
        let change = Update::parse(field, value)?;

        let next: Vec<Ticket> = inner
            .tickets
            .iter()
            .map(|ticket| {
                if &ticket.id == id {
                    change.apply_to(ticket)
                } else {
                    ticket.clone()
                }
            })
            .collect();
        let updated = next[first].clone();

        file::write(&self.path, &next)?;
        inner.commit(next);

        info!(ticket = %id, %field, "ticket updated");
        Ok(updated)
    }
}

/// A field update whose value has been checked against the field.
enum Update {
    Seat(Seat),
    Status(String),
}

impl Update {
    fn parse(field: Field, value: FieldValue) -> Result<Self> {
        let invalid = |reason: String| StoreError::InvalidValue {
            field: field.as_str(),
            reason,
        };

        match (field, value) {
            (Field::Seat, FieldValue::Integer(n)) => u8::try_from(n)
                .ok()
                .and_then(Seat::new)
                .map(Self::Seat)
                .ok_or_else(|| {
                    invalid(format!("{n} is outside {}..={}", Seat::FIRST, Seat::LAST))
                }),
            (Field::Status, FieldValue::Text(s)) if !s.trim().is_empty() => Ok(Self::Status(s)),
            (Field::Status, FieldValue::Text(_)) => Err(invalid("must not be empty".into())),
            (Field::Seat, other) => Err(invalid(format!("expected integer, got {}", other.kind()))),
            (Field::Status, other) => Err(invalid(format!("expected string, got {}", other.kind()))),
        }
    }

    fn apply_to(&self, ticket: &Ticket) -> Ticket {
        let mut ticket = ticket.clone();
        match self {
            Self::Seat(seat) => ticket.seat = *seat,
            Self::Status(status) => ticket.status.clone_from(status),
        }
        ticket
    }
}
