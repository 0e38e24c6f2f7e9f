//! Flight types: immutable reference data embedded into tickets.

use std::fmt;

use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};

/// Format of [`Flight::departure`], e.g. `2023-05-11 14:30`.
pub const DEPARTURE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Numeric flight identifier, e.g. `322`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlightId(pub u32);

impl fmt::Display for FlightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A scheduled flight.
///
/// Tickets hold their own copy, taken when the ticket is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flight {
    pub id: FlightId,
    pub origin: String,
    pub destination: String,
    /// Local departure time, kept verbatim as written in the catalog.
    pub departure: String,
}

impl Flight {
    /// Parses [`Self::departure`] into a civil date-time.
    pub fn departs_at(&self) -> Result<DateTime, jiff::Error> {
        DateTime::strptime(DEPARTURE_FORMAT, &self.departure)
    }
}
