pub mod models;
pub mod generator;
pub mod selection;
pub mod special_request;
pub mod confirm;
pub mod booking;
pub mod flow;

pub use models::{FareQuote, SpecialRequest};
pub use generator::{FarePolicy, FareTier, QuoteGenerator};
pub use selection::FareOptions;
pub use special_request::SpecialRequestModal;
pub use confirm::ConfirmRequest;
pub use booking::{BookingReceipt, BookingStatus, BookingSubmitter, MockBookingSubmitter, RideRequest};
pub use flow::{BookingFlow, FlowState};

use hopn_core::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum FareError {
    #[error("Invalid state transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("No fare quote selected")]
    NoQuoteSelected,

    #[error("Unknown fare quote: {0}")]
    UnknownQuote(String),

    #[error("Pickup location is required")]
    MissingStart,

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type FareResult<T> = Result<T, FareError>;
