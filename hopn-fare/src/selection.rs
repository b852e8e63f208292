use hopn_core::{ModalParams, Slot};

use crate::models::{FareQuote, SpecialRequest};
use crate::{FareError, FareResult};

/// The fare options sheet: a single-choice list of quotes plus the special
/// request switch.
pub struct FareOptions {
    quotes: Vec<FareQuote>,
    selected_id: Option<String>,
    special_request: Slot<Option<SpecialRequest>>,
}

impl FareOptions {
    /// The first quote starts out selected
    pub fn new(quotes: Vec<FareQuote>) -> Self {
        Self::with_special_request(quotes, None)
    }

    pub fn with_special_request(quotes: Vec<FareQuote>, special_request: Option<SpecialRequest>) -> Self {
        let selected_id = quotes.first().map(|q| q.id.clone());
        Self {
            quotes,
            selected_id,
            special_request: Slot::new("special_request", special_request),
        }
    }

    pub fn quotes(&self) -> &[FareQuote] {
        &self.quotes
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    /// Replace the selection
    pub fn select(&mut self, id: &str) -> FareResult<()> {
        if !self.quotes.iter().any(|q| q.id == id) {
            return Err(FareError::UnknownQuote(id.to_string()));
        }
        self.selected_id = Some(id.to_string());
        Ok(())
    }

    /// The selected quote, falling back to the first one; `None` only when
    /// there are no quotes at all
    pub fn selected(&self) -> Option<&FareQuote> {
        self.selected_id
            .as_deref()
            .and_then(|id| self.quotes.iter().find(|q| q.id == id))
            .or_else(|| self.quotes.first())
    }

    /// Whether "Confirm and Request" is enabled
    pub fn can_confirm(&self) -> bool {
        self.selected().is_some()
    }

    pub fn special_request_enabled(&self) -> bool {
        self.special_request.read(Option::is_some)
    }

    /// `None` when the switch is off
    pub fn special_request(&self) -> Option<SpecialRequest> {
        self.special_request.get()
    }

    /// What the editor shows: the saved request, or the empty one
    pub fn special_request_payload(&self) -> SpecialRequest {
        self.special_request.get().unwrap_or_default()
    }

    /// Flip the special request switch.
    ///
    /// Turning it on opens the editor seeded with the current payload and
    /// returns its parameters; saving turns the request on, cancelling leaves
    /// the switch as it was. Turning it off clears the request and opens
    /// nothing.
    pub fn toggle_special_request(&self, on: bool) -> FareResult<Option<ModalParams<SpecialRequest>>> {
        if !on {
            self.special_request.set(None)?;
            return Ok(None);
        }
        let params = self.special_request.open_editor_with(
            |current| Some(current.clone().unwrap_or_default()),
            |slot, payload| *slot = Some(payload),
        )?;
        Ok(Some(params))
    }
}
