use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hopn_core::{CoreError, CoreResult};
use hopn_shared::Destination;
use hopn_trip::{LuggageItem, PassengerCounts};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use uuid::Uuid;

use crate::models::{FareQuote, SpecialRequest};

/// Everything the booking backend needs for one ride
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RideRequest {
    pub start: Destination,
    pub dest: Option<Destination>,
    pub when: Option<DateTime<Utc>>,
    pub passengers: PassengerCounts,
    pub luggage: Vec<LuggageItem>,
    pub quote: FareQuote,
    /// `None` when the rider switched special requests off
    pub special_request: Option<SpecialRequest>,
    pub pay_method_id: Option<String>,
    pub coupon: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Requested,
    DriverAssigned,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingReceipt {
    pub booking_id: Uuid,
    pub status: BookingStatus,
    pub quote_id: String,
    pub requested_at: DateTime<Utc>,
}

#[async_trait]
pub trait BookingSubmitter: Send + Sync {
    async fn submit(&self, request: &RideRequest) -> CoreResult<BookingReceipt>;
}

/// Accepts every request and remembers it
#[derive(Default)]
pub struct MockBookingSubmitter {
    submitted: Mutex<Vec<RideRequest>>,
}

impl MockBookingSubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submitted(&self) -> Vec<RideRequest> {
        self.submitted
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl BookingSubmitter for MockBookingSubmitter {
    async fn submit(&self, request: &RideRequest) -> CoreResult<BookingReceipt> {
        self.submitted
            .lock()
            .map_err(|e| CoreError::InternalError(e.to_string()))?
            .push(request.clone());

        Ok(BookingReceipt {
            booking_id: Uuid::new_v4(),
            status: BookingStatus::Requested,
            quote_id: request.quote.id.clone(),
            requested_at: Utc::now(),
        })
    }
}
