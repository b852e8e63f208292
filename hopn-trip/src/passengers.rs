use serde::{Deserialize, Serialize};

/// Upper bound of every passenger stepper
pub const MAX_PASSENGERS: u32 = 8;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PassengerField {
    Adults,
    Children,
    Infants,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum SeatKind {
    InfantRear,
    ToddlerRear,
    ToddlerFront,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Increment,
    Decrement,
}

impl Direction {
    fn delta(self) -> i64 {
        match self {
            Direction::Increment => 1,
            Direction::Decrement => -1,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SeatCounts {
    #[serde(default)]
    pub infant_rear: u32,
    #[serde(default)]
    pub toddler_rear: u32,
    #[serde(default)]
    pub toddler_front: u32,
}

impl SeatCounts {
    pub fn get(&self, kind: SeatKind) -> u32 {
        match kind {
            SeatKind::InfantRear => self.infant_rear,
            SeatKind::ToddlerRear => self.toddler_rear,
            SeatKind::ToddlerFront => self.toddler_front,
        }
    }

    fn get_mut(&mut self, kind: SeatKind) -> &mut u32 {
        match kind {
            SeatKind::InfantRear => &mut self.infant_rear,
            SeatKind::ToddlerRear => &mut self.toddler_rear,
            SeatKind::ToddlerFront => &mut self.toddler_front,
        }
    }

    /// Saturates; seat counters have no upper bound of their own
    pub fn total(&self) -> u32 {
        self.infant_rear
            .saturating_add(self.toddler_rear)
            .saturating_add(self.toddler_front)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PassengerCounts {
    pub adults: u32,
    pub children: u32,
    pub infants: u32,
    #[serde(default)]
    pub seats: SeatCounts,
}

impl Default for PassengerCounts {
    fn default() -> Self {
        Self {
            adults: 1,
            children: 0,
            infants: 0,
            seats: SeatCounts::default(),
        }
    }
}

impl PassengerCounts {
    pub fn get(&self, field: PassengerField) -> u32 {
        match field {
            PassengerField::Adults => self.adults,
            PassengerField::Children => self.children,
            PassengerField::Infants => self.infants,
        }
    }

    /// Step one passenger count, clamping the result into `[min, max]`.
    /// Swapped bounds are put back in order. Returns the new value.
    pub fn change(&mut self, field: PassengerField, direction: Direction, min: u32, max: u32) -> u32 {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let slot = match field {
            PassengerField::Adults => &mut self.adults,
            PassengerField::Children => &mut self.children,
            PassengerField::Infants => &mut self.infants,
        };
        let next = (*slot as i64 + direction.delta()).clamp(min as i64, max as i64);
        *slot = next as u32;
        *slot
    }

    /// Step a child-seat count. Only the lower bound of 0 applies.
    pub fn change_seat(&mut self, kind: SeatKind, direction: Direction) -> u32 {
        let slot = self.seats.get_mut(kind);
        *slot = match direction {
            Direction::Increment => slot.saturating_add(1),
            Direction::Decrement => slot.saturating_sub(1),
        };
        *slot
    }

    pub fn total_passengers(&self) -> u32 {
        self.adults.saturating_add(self.children).saturating_add(self.infants)
    }

    /// Label on the passenger chip of the trip screen
    pub fn chip_text(&self) -> String {
        let passengers = self.total_passengers();
        let mut text = format!(
            "{} {}",
            passengers,
            if passengers == 1 { "passenger" } else { "passengers" }
        );
        let seats = self.seats.total();
        if seats > 0 {
            text.push_str(&format!(" · {} {}", seats, if seats == 1 { "seat" } else { "seats" }));
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let counts = PassengerCounts::default();
        assert_eq!(counts.adults, 1);
        assert_eq!(counts.total_passengers(), 1);
        assert_eq!(counts.seats.total(), 0);
    }

    #[test]
    fn test_change_clamps_to_range() {
        let mut counts = PassengerCounts::default();
        for _ in 0..20 {
            counts.change(PassengerField::Children, Direction::Increment, 0, MAX_PASSENGERS);
            assert!(counts.children <= MAX_PASSENGERS);
        }
        assert_eq!(counts.children, 8);
        for _ in 0..20 {
            counts.change(PassengerField::Children, Direction::Decrement, 0, MAX_PASSENGERS);
        }
        assert_eq!(counts.children, 0);
    }

    #[test]
    fn test_adults_floor_when_min_is_one() {
        let mut counts = PassengerCounts::default();
        assert_eq!(counts.change(PassengerField::Adults, Direction::Decrement, 1, MAX_PASSENGERS), 1);
        assert_eq!(counts.change(PassengerField::Adults, Direction::Decrement, 0, MAX_PASSENGERS), 0);
    }

    #[test]
    fn test_seats_have_no_upper_bound() {
        let mut counts = PassengerCounts::default();
        for _ in 0..12 {
            counts.change_seat(SeatKind::ToddlerFront, Direction::Increment);
        }
        assert_eq!(counts.seats.toddler_front, 12);
        assert_eq!(counts.change_seat(SeatKind::InfantRear, Direction::Decrement), 0);
    }

    #[test]
    fn test_swapped_bounds_do_not_panic() {
        let mut counts = PassengerCounts::default();
        assert_eq!(counts.change(PassengerField::Children, Direction::Increment, MAX_PASSENGERS, 0), 1);
        assert_eq!(counts.change(PassengerField::Adults, Direction::Decrement, 3, 2), 2);
    }

    #[test]
    fn test_huge_seat_counts_saturate() {
        let json = r#"{"adults": 4294967295, "children": 1, "infants": 0,
                      "seats": {"infantRear": 4294967295, "toddlerRear": 1}}"#;
        let counts: PassengerCounts = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(counts.seats.total(), u32::MAX);
        assert_eq!(counts.total_passengers(), u32::MAX);
        assert!(counts.chip_text().ends_with("4294967295 seats"));
    }

    #[test]
    fn test_chip_text() {
        let mut counts = PassengerCounts::default();
        assert_eq!(counts.chip_text(), "1 passenger");
        counts.change(PassengerField::Infants, Direction::Increment, 0, MAX_PASSENGERS);
        counts.change_seat(SeatKind::InfantRear, Direction::Increment);
        assert_eq!(counts.chip_text(), "2 passengers · 1 seat");
    }

    #[test]
    fn test_seat_wire_names() {
        let json = r#"{"adults": 2, "children": 1, "infants": 0, "seats": {"toddlerRear": 1}}"#;
        let counts: PassengerCounts = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(counts.seats.get(SeatKind::ToddlerRear), 1);
        assert_eq!(counts.seats.get(SeatKind::InfantRear), 0);
    }
}
