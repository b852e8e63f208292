pub mod luggage;
pub mod passengers;
pub mod add_passenger;
pub mod add_luggage;
pub mod oversized;
pub mod draft;

pub use luggage::{
    counts_from_luggage, merge_oversized, summarize_luggage, validate_luggage, validate_oversized, LuggageItem,
    OversizedCounts, OversizedKind, OversizedLuggage, StandardLuggage, StandardSize, MAX_OVERSIZED_COUNT,
};
pub use passengers::{Direction, PassengerCounts, PassengerField, SeatKind};
pub use add_passenger::AddPassengerModal;
pub use add_luggage::AddLuggageModal;
pub use oversized::OversizedLuggageModal;
pub use draft::{TripDraft, TripSnapshot};

use hopn_core::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum TripError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Invalid luggage item: {0}")]
    InvalidLuggage(String),
}

pub type TripResult<T> = Result<T, TripError>;
