use hopn_core::payment::SavedCard;
use hopn_core::{ModalParams, Slot};
use hopn_trip::TripSnapshot;

use crate::booking::RideRequest;
use crate::models::{FareQuote, SpecialRequest};
use crate::{FareError, FareResult};

/// The confirm-request screen: the chosen quote plus the last-minute
/// payment, coupon and special request edits.
pub struct ConfirmRequest {
    quote: FareQuote,
    pay_method: Slot<Option<SavedCard>>,
    special_request: Slot<Option<SpecialRequest>>,
    coupon: Option<String>,
}

impl ConfirmRequest {
    pub fn new(quote: FareQuote, pay_method: Option<SavedCard>, special_request: Option<SpecialRequest>) -> Self {
        Self {
            quote,
            pay_method: Slot::new("pay_method", pay_method),
            special_request: Slot::new("special_request", special_request),
            coupon: None,
        }
    }

    pub fn quote(&self) -> &FareQuote {
        &self.quote
    }

    pub fn pay_method(&self) -> Option<SavedCard> {
        self.pay_method.get()
    }

    pub fn special_request(&self) -> Option<SpecialRequest> {
        self.special_request.get()
    }

    pub fn coupon(&self) -> Option<&str> {
        self.coupon.as_deref()
    }

    /// Codes are stored upper-cased; blank input removes the coupon
    pub fn apply_coupon(&mut self, code: &str) {
        let code = code.trim();
        self.coupon = if code.is_empty() { None } else { Some(code.to_uppercase()) };
    }

    /// Open the payment method picker
    pub fn open_payment(&self) -> FareResult<ModalParams<SavedCard>> {
        Ok(self
            .pay_method
            .open_editor_with(|card| card.clone(), |slot, card| *slot = Some(card))?)
    }

    /// Reopen the special request editor
    pub fn open_special_request(&self) -> FareResult<ModalParams<SpecialRequest>> {
        Ok(self.special_request.open_editor_with(
            |current| Some(current.clone().unwrap_or_default()),
            |slot, payload| *slot = Some(payload),
        )?)
    }

    /// Switch the special request off again
    pub fn clear_special_request(&self) -> FareResult<()> {
        Ok(self.special_request.set(None)?)
    }

    /// Combine the trip draft with this screen's choices
    pub fn build_request(&self, trip: &TripSnapshot) -> FareResult<RideRequest> {
        let start = trip.start.clone().ok_or(FareError::MissingStart)?;
        Ok(RideRequest {
            start,
            dest: trip.dest.clone(),
            when: trip.when,
            passengers: trip.passengers,
            luggage: trip.luggage.clone(),
            quote: self.quote.clone(),
            special_request: self.special_request.get(),
            pay_method_id: self.pay_method.get().map(|card| card.id),
            coupon: self.coupon.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hopn_shared::Destination;
    use hopn_trip::PassengerCounts;

    fn quote() -> FareQuote {
        FareQuote {
            id: "premium".to_string(),
            tier: "Premium".to_string(),
            price: 6500,
            old_price: 7800,
            seat_text: None,
        }
    }

    fn trip(start: Option<Destination>) -> TripSnapshot {
        TripSnapshot {
            start,
            dest: None,
            when: None,
            passengers: PassengerCounts::default(),
            luggage: Vec::new(),
        }
    }

    fn home() -> Destination {
        Destination {
            latitude: 40.7,
            longitude: -74.0,
            description: "Home".to_string(),
            place_id: "home".to_string(),
        }
    }

    #[test]
    fn test_coupon_normalised() {
        let mut confirm = ConfirmRequest::new(quote(), None, None);
        confirm.apply_coupon("  welcome10 ");
        assert_eq!(confirm.coupon(), Some("WELCOME10"));
        confirm.apply_coupon("   ");
        assert_eq!(confirm.coupon(), None);
    }

    #[test]
    fn test_requires_start() {
        let confirm = ConfirmRequest::new(quote(), None, None);
        assert!(matches!(confirm.build_request(&trip(None)), Err(FareError::MissingStart)));
    }

    #[test]
    fn test_payment_pick_flows_into_request() {
        let confirm = ConfirmRequest::new(quote(), None, None);
        let picker = confirm.open_payment().unwrap();
        assert!(picker.initial.is_none());
        picker.complete(SavedCard {
            id: "card_7".to_string(),
            brand: "visa".to_string(),
            last4: "4242".to_string(),
            exp: "01/29".to_string(),
        });

        let request = confirm.build_request(&trip(Some(home()))).unwrap();
        assert_eq!(request.pay_method_id.as_deref(), Some("card_7"));
        assert_eq!(request.quote.id, "premium");
        assert!(request.special_request.is_none());
    }

    #[test]
    fn test_special_request_edit_while_configuring() {
        let confirm = ConfirmRequest::new(quote(), None, None);
        let params = confirm.open_special_request().unwrap();
        assert!(confirm.open_special_request().is_err());
        params.complete(SpecialRequest {
            caring_pet: true,
            ..Default::default()
        });
        assert_eq!(confirm.special_request().map(|r| r.caring_pet), Some(true));

        confirm.clear_special_request().unwrap();
        assert!(confirm.special_request().is_none());
    }
}
