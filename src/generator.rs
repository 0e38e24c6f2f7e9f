//! Sources of ticket ids and seat numbers.
//!
//! The store draws both through [`TicketGenerator`] so tests can swap in a
//! deterministic sequence.

use rand::Rng;
use uuid::Uuid;

use crate::model::{Seat, TicketId};

/// Prefix shared by every generated ticket id.
pub const TICKET_ID_PREFIX: &str = "TICKET";

/// Produces candidate ticket ids and seat assignments.
///
/// Ids need not be unique on their own: the store re-draws until it gets one
/// that isn't already taken.
pub trait TicketGenerator: Send + Sync {
    fn ticket_id(&mut self) -> TicketId;

    fn seat(&mut self) -> Seat;
}

/// Random UUID-based ids and uniformly drawn seats.
#[derive(Debug, Default)]
pub struct RandomGenerator;

impl TicketGenerator for RandomGenerator {
    fn ticket_id(&mut self) -> TicketId {
        TicketId::new(format!(
            "{TICKET_ID_PREFIX}{}",
            Uuid::new_v4().simple().to_string().to_uppercase()
        ))
    }

    fn seat(&mut self) -> Seat {
        Seat::clamped(rand::thread_rng().gen_range(Seat::FIRST..=Seat::LAST))
    }
}

/// Deterministic generator for tests: ids and seats come from fixed lists,
/// cycling when exhausted.
#[cfg(test)]
pub(crate) struct SequenceGenerator {
    ids: Vec<&'static str>,
    seats: Vec<u8>,
    next_id: usize,
    next_seat: usize,
}

#[cfg(test)]
impl SequenceGenerator {
    pub(crate) fn new(ids: Vec<&'static str>, seats: Vec<u8>) -> Self {
        assert!(!ids.is_empty() && !seats.is_empty());
        Self {
            ids,
            seats,
            next_id: 0,
            next_seat: 0,
        }
    }
}

#[cfg(test)]
impl TicketGenerator for SequenceGenerator {
    fn ticket_id(&mut self) -> TicketId {
        let id = self.ids[self.next_id % self.ids.len()];
        self.next_id += 1;
        TicketId::new(id)
    }

    fn seat(&mut self) -> Seat {
        let n = self.seats[self.next_seat % self.seats.len()];
        self.next_seat += 1;
        Seat::new(n).expect("test seat in range")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn random_ids_are_prefixed_and_distinct() {
        let mut generator = RandomGenerator;
        let ids: HashSet<_> = (0..100).map(|_| generator.ticket_id()).collect();

        assert_eq!(ids.len(), 100);
        assert!(ids.iter().all(|id| id.as_str().starts_with(TICKET_ID_PREFIX)));
    }

    #[test]
    fn random_seats_stay_in_range() {
        let mut generator = RandomGenerator;
        for _ in 0..500 {
            let seat = generator.seat().get();
            assert!((1..=32).contains(&seat));
        }
    }

    #[test]
    fn sequence_cycles() {
        let mut generator = SequenceGenerator::new(vec!["A", "B"], vec![5]);
        let ids: Vec<_> = (0..3).map(|_| generator.ticket_id().to_string()).collect();
        assert_eq!(ids, ["A", "B", "A"]);
        assert_eq!(generator.seat().get(), 5);
        assert_eq!(generator.seat().get(), 5);
    }
}
