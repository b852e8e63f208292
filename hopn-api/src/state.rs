use hopn_core::payment::PaymentAdapter;
use hopn_fare::{BookingFlow, BookingSubmitter, QuoteGenerator};
use hopn_trip::TripDraft;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// One rider's booking attempt: the trip draft plus, once prices were
/// fetched, the fare flow
pub struct BookingSession {
    pub draft: TripDraft,
    pub flow: Option<BookingFlow>,
}

impl BookingSession {
    pub fn new() -> Self {
        Self {
            draft: TripDraft::new(),
            flow: None,
        }
    }

    pub fn state_name(&self) -> &'static str {
        self.flow.as_ref().map(|flow| flow.state().name()).unwrap_or("DRAFT")
    }
}

impl Default for BookingSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Each trip has its own lock, so a slow collaborator call on one trip does
/// not hold up the others. The map lock is only taken to look a trip up.
pub type SharedSession = Arc<Mutex<BookingSession>>;
pub type Sessions = Arc<Mutex<HashMap<Uuid, SharedSession>>>;

#[derive(Clone)]
pub struct AppState {
    pub sessions: Sessions,
    pub quotes: Arc<QuoteGenerator>,
    pub booking: Arc<dyn BookingSubmitter>,
    pub payments: Arc<dyn PaymentAdapter>,
}

impl AppState {
    pub fn new(
        quotes: QuoteGenerator,
        booking: Arc<dyn BookingSubmitter>,
        payments: Arc<dyn PaymentAdapter>,
    ) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            quotes: Arc::new(quotes),
            booking,
            payments,
        }
    }
}
