//! Core data model: flights and the tickets issued against them.

mod flight;
mod ticket;

pub use flight::{Flight, FlightId};
pub use ticket::{Field, FieldValue, STATUS_ACTIVE, Seat, Ticket, TicketId};
