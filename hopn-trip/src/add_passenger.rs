use hopn_core::{ExitAffordance, ExitOutcome, ExitPolicy, ModalParams, ModalSession};

use crate::passengers::{Direction, PassengerCounts, PassengerField, SeatKind, MAX_PASSENGERS};
use crate::TripResult;

/// The passenger and child-seat picker.
///
/// Counts always have a sensible value, so every way out of the sheet reports
/// them back to the trip screen.
pub struct AddPassengerModal {
    session: ModalSession<PassengerCounts>,
}

impl AddPassengerModal {
    pub fn open(params: ModalParams<PassengerCounts>) -> Self {
        Self {
            session: ModalSession::open("passengers", params, PassengerCounts::default(), ExitPolicy::AlwaysEmit),
        }
    }

    pub fn counts(&self) -> PassengerCounts {
        self.session.value()
    }

    pub fn increment(&self, field: PassengerField) -> TripResult<u32> {
        Ok(self
            .session
            .update(|c| c.change(field, Direction::Increment, 0, MAX_PASSENGERS))?)
    }

    /// The adults row never goes below one
    pub fn decrement(&self, field: PassengerField) -> TripResult<u32> {
        let min = if field == PassengerField::Adults { 1 } else { 0 };
        Ok(self
            .session
            .update(|c| c.change(field, Direction::Decrement, min, MAX_PASSENGERS))?)
    }

    pub fn change_seat(&self, seat: SeatKind, direction: Direction) -> TripResult<u32> {
        Ok(self.session.update(|c| c.change_seat(seat, direction))?)
    }

    pub fn close(&mut self) -> TripResult<ExitOutcome> {
        self.exit(ExitAffordance::CloseButton)
    }

    pub fn tap_backdrop(&mut self) -> TripResult<ExitOutcome> {
        self.exit(ExitAffordance::Backdrop)
    }

    pub fn hardware_back(&mut self) -> TripResult<ExitOutcome> {
        self.exit(ExitAffordance::HardwareBack)
    }

    pub fn skip(&mut self) -> TripResult<ExitOutcome> {
        self.exit(ExitAffordance::PrimaryAction)
    }

    fn exit(&mut self, affordance: ExitAffordance) -> TripResult<ExitOutcome> {
        Ok(self.session.exit(affordance)?)
    }
}
