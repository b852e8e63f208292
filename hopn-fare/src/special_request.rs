use hopn_core::{ExitAffordance, ExitOutcome, ExitPolicy, ModalParams, ModalSession};

use crate::models::SpecialRequest;
use crate::FareResult;

/// Pet / quiet ride / note editor. Only "Save" reports back.
pub struct SpecialRequestModal {
    session: ModalSession<SpecialRequest>,
}

impl SpecialRequestModal {
    pub fn open(params: ModalParams<SpecialRequest>) -> Self {
        Self {
            session: ModalSession::open("special_request", params, SpecialRequest::default(), ExitPolicy::EmitOnConfirm),
        }
    }

    pub fn payload(&self) -> SpecialRequest {
        self.session.value()
    }

    pub fn set_caring_pet(&self, on: bool) -> FareResult<()> {
        Ok(self.session.update(|r| r.caring_pet = on)?)
    }

    pub fn set_quiet_ride(&self, on: bool) -> FareResult<()> {
        Ok(self.session.update(|r| r.quiet_ride = on)?)
    }

    pub fn set_note(&self, note: &str) -> FareResult<()> {
        Ok(self.session.update(|r| r.note = note.to_string())?)
    }

    pub fn save(&mut self) -> FareResult<ExitOutcome> {
        Ok(self.session.exit(ExitAffordance::PrimaryAction)?)
    }

    pub fn cancel(&mut self) -> FareResult<ExitOutcome> {
        Ok(self.session.exit(ExitAffordance::CloseButton)?)
    }
}
