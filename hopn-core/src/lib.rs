pub mod modal;
pub mod slot;
pub mod payment;
pub mod places;
pub mod geolocation;
pub mod auth;
pub mod favourites;

pub use modal::{ExitAffordance, ExitOutcome, ExitPolicy, ModalParams, ModalSession};
pub use slot::Slot;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Internal service error: {0}")]
    InternalError(String),
    #[error("Authentication failed: {0}")]
    AuthError(String),
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
    #[error("Field '{0}' is already being edited")]
    SlotBusy(&'static str),
    #[error("Not found: {0}")]
    NotFound(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
