//! Ticket types: one passenger's reservation on one flight.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Flight;

/// Status given to every newly created ticket.
pub const STATUS_ACTIVE: &str = "active";

/// Opaque, globally unique ticket identifier.
///
/// Compared by exact string equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(String);

impl TicketId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A seat number in `1..=32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Seat(u8);

impl Seat {
    pub const FIRST: u8 = 1;
    pub const LAST: u8 = 32;

    /// Returns `None` when `n` is outside `1..=32`.
    pub fn new(n: u8) -> Option<Self> {
        (Self::FIRST..=Self::LAST).contains(&n).then_some(Self(n))
    }

    /// Pulls `n` into `1..=32`.
    pub fn clamped(n: u8) -> Self {
        Self(n.clamp(Self::FIRST, Self::LAST))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Seat {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Self::new(n).ok_or_else(|| format!("seat {n} is outside {}..={}", Self::FIRST, Self::LAST))
    }
}

impl From<Seat> for u8 {
    fn from(seat: Seat) -> Self {
        seat.get()
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A ticket record, as held in memory and persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub flight: Flight,
    pub seat: Seat,
    pub passport: String,
    /// Open vocabulary: `"active"` at creation, anything afterwards.
    pub status: String,
}

/// A ticket field that may be changed after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Seat,
    Status,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Seat => "seat",
            Self::Status => "status",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A loosely typed value for a field update.
///
/// The store checks that it fits the target [`Field`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Integer(i64),
    Text(String),
}

impl FieldValue {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Integer(_) => "integer",
            Self::Text(_) => "string",
        }
    }
}
