//! The flight catalog: the fixed set of flights tickets can be issued for.
//!
//! Built once at startup, either from the built-in table or from the
//! `[[flights]]` table of the config file, and never mutated afterwards.

use std::collections::BTreeMap;

use crate::model::{Flight, FlightId};

/// Errors from building a catalog out of a flight table.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("flight {0} is listed more than once")]
    DuplicateFlight(FlightId),

    #[error("flight {0} has an empty {1}")]
    MissingField(FlightId, &'static str),

    #[error("flight {id} departure {departure:?} is not `YYYY-MM-DD HH:MM`: {source}")]
    InvalidDeparture {
        id: FlightId,
        departure: String,
        source: jiff::Error,
    },
}

/// Read-only lookup table of flights by id.
#[derive(Debug, Clone)]
pub struct FlightCatalog {
    flights: BTreeMap<FlightId, Flight>,
}

impl FlightCatalog {
    /// Builds a catalog, validating every entry.
    pub fn new(flights: impl IntoIterator<Item = Flight>) -> Result<Self, CatalogError> {
        let mut table = BTreeMap::new();
        for flight in flights {
            if flight.origin.trim().is_empty() {
                return Err(CatalogError::MissingField(flight.id, "origin"));
            }
            if flight.destination.trim().is_empty() {
                return Err(CatalogError::MissingField(flight.id, "destination"));
            }
            if let Err(source) = flight.departs_at() {
                return Err(CatalogError::InvalidDeparture {
                    id: flight.id,
                    departure: flight.departure,
                    source,
                });
            }
            let id = flight.id;
            if table.insert(id, flight).is_some() {
                return Err(CatalogError::DuplicateFlight(id));
            }
        }
        Ok(Self { flights: table })
    }

    /// The flights served when no config overrides them.
    pub fn builtin() -> Self {
        let flights = [
            (322, "Arlanda", "Schipol", "2023-05-11 14:30"),
            (431, "Arlanda", "Berlin", "2023-05-11 18:30"),
        ]
        .into_iter()
        .map(|(id, origin, destination, departure)| {
            (
                FlightId(id),
                Flight {
                    id: FlightId(id),
                    origin: origin.into(),
                    destination: destination.into(),
                    departure: departure.into(),
                },
            )
        })
        .collect();
        Self { flights }
    }

    /// Looks up a flight by id.
    pub fn lookup(&self, id: FlightId) -> Option<&Flight> {
        self.flights.get(&id)
    }

    /// All flights, ordered by id.
    pub fn flights(&self) -> impl Iterator<Item = &Flight> {
        self.flights.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flight(id: u32, departure: &str) -> Flight {
        Flight {
            id: FlightId(id),
            origin: "Arlanda".into(),
            destination: "Oslo".into(),
            departure: departure.into(),
        }
    }

    #[test]
    fn builtin_has_known_flights() {
        let catalog = FlightCatalog::builtin();

        let schipol = catalog.lookup(FlightId(322)).unwrap();
        assert_eq!(schipol.origin, "Arlanda");
        assert_eq!(schipol.destination, "Schipol");
        assert_eq!(schipol.departure, "2023-05-11 14:30");

        let berlin = catalog.lookup(FlightId(431)).unwrap();
        assert_eq!(berlin.destination, "Berlin");
        assert_eq!(berlin.departure, "2023-05-11 18:30");
    }

    #[test]
    fn unknown_flight_is_none() {
        let catalog = FlightCatalog::builtin();
        assert!(catalog.lookup(FlightId(999)).is_none());
    }

    #[test]
    fn builtin_entries_pass_validation() {
        let builtin = FlightCatalog::builtin();
        let rebuilt = FlightCatalog::new(builtin.flights().cloned()).unwrap();
        assert_eq!(rebuilt.flights().count(), 2);
    }

    #[test]
    fn flights_ordered_by_id() {
        let catalog =
            FlightCatalog::new([flight(9, "2024-01-01 10:00"), flight(3, "2024-01-01 09:00")])
                .unwrap();
        let ids: Vec<_> = catalog.flights().map(|f| f.id.0).collect();
        assert_eq!(ids, [3, 9]);
    }

    #[test]
    fn duplicate_flight_rejected() {
        let err = FlightCatalog::new([flight(1, "2024-01-01 10:00"), flight(1, "2024-01-02 10:00")])
            .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateFlight(FlightId(1))));
    }

    #[test]
    fn bad_departure_rejected() {
        let err = FlightCatalog::new([flight(1, "soon")]).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidDeparture { .. }));
    }

    #[test]
    fn empty_origin_rejected() {
        let mut f = flight(1, "2024-01-01 10:00");
        f.origin = " ".into();
        let err = FlightCatalog::new([f]).unwrap_err();
        assert!(matches!(err, CatalogError::MissingField(_, "origin")));
    }
}
