use hopn_core::{ExitAffordance, ExitOutcome, ExitPolicy, ModalParams, ModalSession};

use crate::luggage::{OversizedCounts, OversizedKind, MAX_OVERSIZED_COUNT};
use crate::passengers::Direction;
use crate::TripResult;

/// Per-kind counters for oversized items.
///
/// Every kind the rider touches stays in the emitted mapping, including ones
/// stepped back down to zero, so the parent can tell "removed" from "untouched".
/// Kinds are emitted in the order they were first touched. Each counter stops
/// at [`MAX_OVERSIZED_COUNT`].
pub struct OversizedLuggageModal {
    session: ModalSession<OversizedCounts>,
}

impl OversizedLuggageModal {
    pub fn open(params: ModalParams<OversizedCounts>) -> Self {
        Self {
            session: ModalSession::open("oversized", params, OversizedCounts::new(), ExitPolicy::EmitOnConfirm),
        }
    }

    pub fn count(&self, kind: OversizedKind) -> u32 {
        self.session.read(|counts| counts.get(&kind).copied().unwrap_or(0))
    }

    pub fn counts(&self) -> OversizedCounts {
        self.session.value()
    }

    pub fn change(&self, kind: OversizedKind, direction: Direction) -> TripResult<u32> {
        Ok(self.session.update(|counts| {
            let entry = counts.entry(kind).or_insert(0);
            *entry = match direction {
                Direction::Increment if *entry < MAX_OVERSIZED_COUNT => *entry + 1,
                Direction::Increment => *entry,
                Direction::Decrement => entry.saturating_sub(1),
            };
            *entry
        })?)
    }

    pub fn done(&mut self) -> TripResult<ExitOutcome> {
        Ok(self.session.exit(ExitAffordance::PrimaryAction)?)
    }

    pub fn close(&mut self) -> TripResult<ExitOutcome> {
        Ok(self.session.exit(ExitAffordance::CloseButton)?)
    }
}
