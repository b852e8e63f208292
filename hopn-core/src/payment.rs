use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

use crate::{CoreError, CoreResult};

/// A card saved with the payment processor. Only the opaque `id` travels with
/// a ride request; the rest is for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SavedCard {
    pub id: String,
    pub brand: String,
    pub last4: String,
    pub exp: String,
}

impl SavedCard {
    pub fn label(&self) -> String {
        format!("{} •••• {}", self.brand, self.last4)
    }
}

#[async_trait]
pub trait PaymentAdapter: Send + Sync {
    /// Cards the rider has saved with the processor
    async fn list_cards(&self, customer_id: &str) -> CoreResult<Vec<SavedCard>>;

    /// Turn a processor token (from the card form) into a saved card
    async fn create_card(&self, customer_id: &str, processor_token: &str) -> CoreResult<SavedCard>;
}

/// In-memory processor used by tests and local development
#[derive(Default)]
pub struct MockPaymentAdapter {
    cards: Mutex<Vec<(String, SavedCard)>>,
}

impl MockPaymentAdapter {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaymentAdapter for MockPaymentAdapter {
    async fn list_cards(&self, customer_id: &str) -> CoreResult<Vec<SavedCard>> {
        let cards = self
            .cards
            .lock()
            .map_err(|e| CoreError::InternalError(e.to_string()))?;
        Ok(cards
            .iter()
            .filter(|(owner, _)| owner == customer_id)
            .map(|(_, card)| card.clone())
            .collect())
    }

    async fn create_card(&self, customer_id: &str, processor_token: &str) -> CoreResult<SavedCard> {
        // Mock tokens look like "tok_<brand>_<digits>"
        let mut parts = processor_token.split('_');
        let (Some("tok"), Some(brand), Some(digits)) = (parts.next(), parts.next(), parts.next()) else {
            return Err(CoreError::ValidationError(format!(
                "unrecognised processor token: {}",
                processor_token
            )));
        };
        if digits.len() < 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(CoreError::ValidationError("card number is too short".to_string()));
        }

        let mut cards = self
            .cards
            .lock()
            .map_err(|e| CoreError::InternalError(e.to_string()))?;
        let card = SavedCard {
            id: format!("card_{}", cards.len() + 1),
            brand: brand.to_string(),
            last4: digits[digits.len() - 4..].to_string(),
            exp: "12/30".to_string(),
        };
        cards.push((customer_id.to_string(), card.clone()));
        tracing::info!("Saved card {} for customer", card.id);
        Ok(card)
    }
}
