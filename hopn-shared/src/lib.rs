pub mod models;
pub mod pii;

pub use models::geo::{Coordinates, Destination, Position};
pub use pii::Masked;
