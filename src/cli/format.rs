//! Output formatting for CLI display.

use serde::Serialize;

use crate::model::Ticket;

#[derive(Serialize)]
struct Envelope<'a, T: ?Sized> {
    data: &'a T,
}

/// Wrap a result as `{"data": ...}` pretty JSON.
pub(super) fn envelope<T: Serialize + ?Sized>(data: &T) -> Result<String, String> {
    serde_json::to_string_pretty(&Envelope { data })
        .map_err(|e| format!("failed to encode output: {e}"))
}

/// Format a ticket as a one-line human-readable summary.
pub(super) fn ticket_summary(ticket: &Ticket) -> String {
    let flight = &ticket.flight;
    let departs = flight.departs_at().map_or_else(
        |_| flight.departure.clone(),
        |at| at.strftime("%a %-d %b %H:%M").to_string(),
    );
    format!(
        "{}: flight {} {} → {}, {departs}, seat {}, {}",
        ticket.id, flight.id, flight.origin, flight.destination, ticket.seat, ticket.status
    )
}
