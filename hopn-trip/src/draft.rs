use chrono::{DateTime, FixedOffset, Utc};
use hopn_core::geolocation::LocationProvider;
use hopn_core::{ModalParams, Slot};
use hopn_shared::{Destination, Position};
use serde::{Deserialize, Serialize};

use crate::luggage::{normalize_luggage, summarize_luggage, LuggageItem};
use crate::passengers::PassengerCounts;
use crate::TripResult;

/// The in-flight booking attempt held by the trip screen.
///
/// Each field is its own [`Slot`]: a modal that edits passengers cannot touch
/// luggage, and while the passenger sheet is open nobody else can write
/// passengers. Nothing here is persisted.
pub struct TripDraft {
    pub start: Slot<Option<Destination>>,
    pub dest: Slot<Option<Destination>>,
    pub when: Slot<Option<DateTime<Utc>>>,
    pub passengers: Slot<PassengerCounts>,
    pub luggage: Slot<Vec<LuggageItem>>,
}

/// Read-only copy of a draft, e.g. for a ride request or an API response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TripSnapshot {
    pub start: Option<Destination>,
    pub dest: Option<Destination>,
    pub when: Option<DateTime<Utc>>,
    pub passengers: PassengerCounts,
    pub luggage: Vec<LuggageItem>,
}

impl Default for TripDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl TripDraft {
    pub fn new() -> Self {
        Self {
            start: Slot::new("start", None),
            dest: Slot::new("dest", None),
            when: Slot::new("when", None),
            passengers: Slot::new("passengers", PassengerCounts::default()),
            luggage: Slot::new("luggage", Vec::new()),
        }
    }

    pub fn open_passengers(&self) -> TripResult<ModalParams<PassengerCounts>> {
        Ok(self.passengers.open_editor()?)
    }

    pub fn open_luggage(&self) -> TripResult<ModalParams<Vec<LuggageItem>>> {
        Ok(self.luggage.open_editor()?)
    }

    /// Place search for the pickup; a pick replaces the previous start
    pub fn open_start_picker(&self) -> TripResult<ModalParams<Destination>> {
        Ok(self.start.open_editor_with(|start| start.clone(), |start, pick| *start = Some(pick))?)
    }

    pub fn open_dest_picker(&self) -> TripResult<ModalParams<Destination>> {
        Ok(self.dest.open_editor_with(|dest| dest.clone(), |dest, pick| *dest = Some(pick))?)
    }

    pub fn open_schedule(&self) -> TripResult<ModalParams<DateTime<Utc>>> {
        Ok(self.when.open_editor_with(|when| *when, |when, picked| *when = Some(picked))?)
    }

    pub fn chip_text(&self) -> String {
        self.passengers.read(PassengerCounts::chip_text)
    }

    /// Pickup time in the rider's offset, or "Now" for an immediate ride
    pub fn when_text(&self, offset: FixedOffset) -> String {
        match self.when.get() {
            Some(when) => when.with_timezone(&offset).format("%a, %b %-d · %-I:%M %p").to_string(),
            None => "Now".to_string(),
        }
    }

    pub fn luggage_summary(&self) -> String {
        self.luggage.read(|items| summarize_luggage(items))
    }

    /// Copy every field; zero-count luggage is left out
    pub fn snapshot(&self) -> TripSnapshot {
        TripSnapshot {
            start: self.start.get(),
            dest: self.dest.get(),
            when: self.when.get(),
            passengers: self.passengers.get(),
            luggage: self.luggage.read(|items| normalize_luggage(items)),
        }
    }

    /// Where to center the map: the pickup if known, else the device fix
    pub async fn map_center(&self, location: &dyn LocationProvider) -> Option<Position> {
        if let Some(start) = self.start.get() {
            return Some(start.position());
        }
        if !location.granted() {
            return None;
        }
        match location.get_current().await {
            Ok(position) => Some(position),
            Err(e) => {
                tracing::warn!("Could not get a location fix: {}", e);
                None
            }
        }
    }
}
