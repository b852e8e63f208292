use hopn_core::payment::SavedCard;
use hopn_trip::TripSnapshot;

use crate::booking::{BookingReceipt, BookingSubmitter};
use crate::confirm::ConfirmRequest;
use crate::models::FareQuote;
use crate::selection::FareOptions;
use crate::{FareError, FareResult};

/// Where the rider is between seeing prices and having a booked ride
pub enum FlowState {
    SelectingFare(FareOptions),
    ConfiguringRequest(ConfirmRequest),
    Confirmed(BookingReceipt),
}

impl FlowState {
    pub fn name(&self) -> &'static str {
        match self {
            FlowState::SelectingFare(_) => "SELECTING_FARE",
            FlowState::ConfiguringRequest(_) => "CONFIGURING_REQUEST",
            FlowState::Confirmed(_) => "CONFIRMED",
        }
    }
}

/// Drives SelectingFare → ConfiguringRequest → Confirmed
pub struct BookingFlow {
    state: FlowState,
    pay_method: Option<SavedCard>,
}

impl BookingFlow {
    pub fn start(quotes: Vec<FareQuote>, pay_method: Option<SavedCard>) -> Self {
        Self {
            state: FlowState::SelectingFare(FareOptions::new(quotes)),
            pay_method,
        }
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn fare_options(&self) -> Option<&FareOptions> {
        match &self.state {
            FlowState::SelectingFare(options) => Some(options),
            _ => None,
        }
    }

    pub fn fare_options_mut(&mut self) -> Option<&mut FareOptions> {
        match &mut self.state {
            FlowState::SelectingFare(options) => Some(options),
            _ => None,
        }
    }

    pub fn confirm_request(&self) -> Option<&ConfirmRequest> {
        match &self.state {
            FlowState::ConfiguringRequest(confirm) => Some(confirm),
            _ => None,
        }
    }

    pub fn confirm_request_mut(&mut self) -> Option<&mut ConfirmRequest> {
        match &mut self.state {
            FlowState::ConfiguringRequest(confirm) => Some(confirm),
            _ => None,
        }
    }

    pub fn receipt(&self) -> Option<&BookingReceipt> {
        match &self.state {
            FlowState::Confirmed(receipt) => Some(receipt),
            _ => None,
        }
    }

    /// Transition: SelectingFare → ConfiguringRequest ("Confirm and Request")
    pub fn confirm_and_request(&mut self) -> FareResult<()> {
        let FlowState::SelectingFare(options) = &self.state else {
            return Err(self.invalid_transition("CONFIGURING_REQUEST"));
        };
        let quote = options.selected().cloned().ok_or(FareError::NoQuoteSelected)?;
        let confirm = ConfirmRequest::new(quote, self.pay_method.clone(), options.special_request());

        tracing::info!("Fare {} selected, configuring request", confirm.quote().id);
        self.state = FlowState::ConfiguringRequest(confirm);
        Ok(())
    }

    /// Transition: ConfiguringRequest → Confirmed.
    /// A failed submission leaves the flow where it was so the rider can retry.
    pub async fn submit(&mut self, trip: &TripSnapshot, booking: &dyn BookingSubmitter) -> FareResult<BookingReceipt> {
        let FlowState::ConfiguringRequest(confirm) = &self.state else {
            return Err(self.invalid_transition("CONFIRMED"));
        };
        let request = confirm.build_request(trip)?;

        let receipt = booking.submit(&request).await.map_err(|e| {
            tracing::error!("Booking submission failed: {}", e);
            e
        })?;

        tracing::info!("Ride {} requested with fare {}", receipt.booking_id, receipt.quote_id);
        self.state = FlowState::Confirmed(receipt.clone());
        Ok(receipt)
    }

    fn invalid_transition(&self, to: &str) -> FareError {
        FareError::InvalidTransition {
            from: self.state.name().to_string(),
            to: to.to_string(),
        }
    }
}
