use hopn_trip::luggage::oversized_pieces;
use hopn_trip::TripSnapshot;
use serde::{Deserialize, Serialize};

use crate::models::FareQuote;

/// A ride class the fleet offers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FareTier {
    pub id: String,
    pub name: String,
    /// Base fare in cents
    pub base_price: i32,
    /// Passenger capacity
    pub seats: u32,
}

/// Pricing knobs for quote generation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FarePolicy {
    pub currency: String,
    /// Multiplier applied to the price to get the struck-through reference price
    #[serde(default = "default_markup")]
    pub old_price_markup: f64,
    /// Added per oversized item, in cents
    #[serde(default)]
    pub oversized_surcharge: i32,
    pub tiers: Vec<FareTier>,
}

fn default_markup() -> f64 {
    1.0
}

impl Default for FarePolicy {
    fn default() -> Self {
        Self {
            currency: "USD".to_string(),
            old_price_markup: 1.2,
            oversized_surcharge: 1500,
            tiers: vec![
                FareTier {
                    id: "escalade".to_string(),
                    name: "Escalade".to_string(),
                    base_price: 9500,
                    seats: 6,
                },
                FareTier {
                    id: "premium".to_string(),
                    name: "Premium".to_string(),
                    base_price: 6500,
                    seats: 4,
                },
                FareTier {
                    id: "economy".to_string(),
                    name: "Economy".to_string(),
                    base_price: 3900,
                    seats: 4,
                },
            ],
        }
    }
}

/// Stand-in for the server-side quote endpoint
pub struct QuoteGenerator {
    policy: FarePolicy,
}

impl QuoteGenerator {
    pub fn new(policy: FarePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &FarePolicy {
        &self.policy
    }

    /// One quote per tier that can seat the party, in configured order.
    /// A party larger than every tier gets no quotes. Prices saturate at
    /// `i32::MAX` cents instead of wrapping.
    pub fn generate(&self, trip: &TripSnapshot) -> Vec<FareQuote> {
        let party = trip.passengers.total_passengers();
        let pieces = i32::try_from(oversized_pieces(&trip.luggage)).unwrap_or(i32::MAX);
        let surcharge = self.policy.oversized_surcharge.saturating_mul(pieces);

        let quotes: Vec<FareQuote> = self
            .policy
            .tiers
            .iter()
            .filter(|tier| tier.seats >= party)
            .map(|tier| {
                let price = tier.base_price.saturating_add(surcharge);
                // Float to int casts saturate
                let old_price = (price as f64 * self.policy.old_price_markup).round() as i32;
                FareQuote {
                    id: tier.id.clone(),
                    tier: tier.name.clone(),
                    price,
                    old_price,
                    seat_text: Some(format!(" · {} seats", tier.seats)),
                }
            })
            .collect();

        tracing::debug!("Generated {} quotes for a party of {}", quotes.len(), party);
        quotes
    }
}

impl Default for QuoteGenerator {
    fn default() -> Self {
        Self::new(FarePolicy::default())
    }
}
