use hopn_core::{ExitAffordance, ExitOutcome, ExitPolicy, ModalParams, ModalSession};

use crate::luggage::{
    self, counts_from_luggage, merge_oversized, summarize_luggage, LuggageItem, OversizedCounts, StandardLuggage,
    StandardSize, MAX_STANDARD_COUNT,
};
use crate::passengers::Direction;
use crate::TripResult;

/// The luggage sheet: one standard bag size with a count, plus a link to the
/// oversized items editor.
pub struct AddLuggageModal {
    session: ModalSession<Vec<LuggageItem>>,
}

impl AddLuggageModal {
    pub fn open(params: ModalParams<Vec<LuggageItem>>) -> Self {
        Self {
            session: ModalSession::open("luggage", params, Vec::new(), ExitPolicy::EmitOnConfirm),
        }
    }

    pub fn items(&self) -> Vec<LuggageItem> {
        self.session.value()
    }

    pub fn primary(&self) -> Option<StandardLuggage> {
        self.session.read(|items| luggage::primary(items).cloned())
    }

    pub fn summary(&self) -> String {
        self.session.read(|items| summarize_luggage(items))
    }

    /// Pick a size. The current count carries over; picking a size with no
    /// bag selected yet starts at one.
    pub fn select_size(&self, size: StandardSize) -> TripResult<()> {
        Ok(self.session.update(|items| {
            let next = match luggage::primary(items) {
                Some(current) => StandardLuggage {
                    size,
                    ..current.clone()
                },
                None => StandardLuggage::new(size, 1),
            };
            *items = luggage::set_primary(items, Some(next));
        })?)
    }

    /// Step the standard bag count. Reaching zero removes the entry.
    pub fn change_count(&self, direction: Direction) -> TripResult<u32> {
        Ok(self.session.update(|items| {
            let Some(current) = luggage::primary(items).cloned() else {
                return 0;
            };
            let count = match direction {
                Direction::Increment => (current.count + 1).min(MAX_STANDARD_COUNT),
                Direction::Decrement => current.count.saturating_sub(1),
            };
            *items = luggage::set_primary(items, Some(StandardLuggage { count, ..current }));
            count
        })?)
    }

    /// Hand the oversized items to their own editor. Its result is merged into
    /// this sheet's list when it reports back.
    pub fn open_oversized(&self) -> TripResult<ModalParams<OversizedCounts>> {
        Ok(self.session.open_child(
            |items| Some(counts_from_luggage(items)),
            |items, counts| *items = merge_oversized(items, &counts),
        )?)
    }

    pub fn done(&mut self) -> TripResult<ExitOutcome> {
        Ok(self.session.exit(ExitAffordance::PrimaryAction)?)
    }

    pub fn close(&mut self) -> TripResult<ExitOutcome> {
        Ok(self.session.exit(ExitAffordance::CloseButton)?)
    }

    pub fn hardware_back(&mut self) -> TripResult<ExitOutcome> {
        Ok(self.session.exit(ExitAffordance::HardwareBack)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::luggage::OversizedKind;
    use crate::oversized::OversizedLuggageModal;
    use std::sync::{Arc, Mutex};

    fn recording_params(initial: Vec<LuggageItem>) -> (ModalParams<Vec<LuggageItem>>, Arc<Mutex<Option<Vec<LuggageItem>>>>) {
        let seen = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&seen);
        let params = ModalParams::new(Some(initial)).on_done(move |items| *sink.lock().unwrap() = Some(items));
        (params, seen)
    }

    #[test]
    fn test_single_standard_selection() {
        let (params, seen) = recording_params(Vec::new());
        let mut modal = AddLuggageModal::open(params);
        modal.select_size(StandardSize::L).unwrap();
        modal.change_count(Direction::Increment).unwrap();
        modal.select_size(StandardSize::CarryOn).unwrap();

        assert_eq!(modal.primary(), Some(StandardLuggage::new(StandardSize::CarryOn, 2)));
        assert_eq!(modal.items().len(), 1);

        modal.done().unwrap();
        assert_eq!(
            seen.lock().unwrap().clone(),
            Some(vec![LuggageItem::standard(StandardSize::CarryOn, 2)])
        );
    }

    #[test]
    fn test_count_to_zero_removes_bag() {
        let (params, _seen) = recording_params(vec![LuggageItem::standard(StandardSize::M, 1)]);
        let modal = AddLuggageModal::open(params);
        assert_eq!(modal.change_count(Direction::Decrement).unwrap(), 0);
        assert!(modal.primary().is_none());
        assert_eq!(modal.change_count(Direction::Increment).unwrap(), 0);
    }

    #[test]
    fn test_count_capped() {
        let (params, _seen) = recording_params(vec![LuggageItem::standard(StandardSize::S, 7)]);
        let modal = AddLuggageModal::open(params);
        modal.change_count(Direction::Increment).unwrap();
        assert_eq!(modal.change_count(Direction::Increment).unwrap(), MAX_STANDARD_COUNT);
    }

    #[test]
    fn test_oversized_round_trip_through_child() {
        let initial = vec![
            LuggageItem::standard(StandardSize::L, 1),
            LuggageItem::oversized(OversizedKind::Golf, "golf", 2),
        ];
        let (params, seen) = recording_params(initial);
        let mut modal = AddLuggageModal::open(params);

        let child_params = modal.open_oversized().unwrap();
        assert_eq!(child_params.initial.as_ref().and_then(|c| c.get(&OversizedKind::Golf)), Some(&2));

        let mut child = OversizedLuggageModal::open(child_params);
        // The parent sheet is covered while the child is open
        assert!(modal.select_size(StandardSize::XL).is_err());
        assert!(modal.done().is_err());

        child.change(OversizedKind::Golf, Direction::Decrement).unwrap();
        child.change(OversizedKind::Golf, Direction::Decrement).unwrap();
        child.change(OversizedKind::Bicycles, Direction::Increment).unwrap();
        child.done().unwrap();
        drop(child);

        assert_eq!(modal.summary(), "L 1 · bicycles 1");
        modal.done().unwrap();
        let items = seen.lock().unwrap().clone().unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_oversized_items_listed_in_touch_order() {
        let (params, _seen) = recording_params(Vec::new());
        let modal = AddLuggageModal::open(params);

        let mut child = OversizedLuggageModal::open(modal.open_oversized().unwrap());
        child.change(OversizedKind::Golf, Direction::Increment).unwrap();
        child.change(OversizedKind::Bicycles, Direction::Increment).unwrap();
        child.done().unwrap();
        drop(child);

        assert_eq!(modal.summary(), "golf 1 · bicycles 1");
    }

    #[test]
    fn test_close_keeps_parent_state() {
        let (params, seen) = recording_params(Vec::new());
        let mut modal = AddLuggageModal::open(params);
        modal.select_size(StandardSize::XL).unwrap();
        assert_eq!(modal.hardware_back().unwrap(), ExitOutcome::Cancelled);
        assert!(seen.lock().unwrap().is_none());
    }
}
