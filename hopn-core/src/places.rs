use async_trait::async_trait;
use hopn_shared::Destination;
use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlacePrediction {
    pub description: String,
    pub place_id: String,
}

/// Address and airport search backed by an external geocoding API
#[async_trait]
pub trait PlacesProvider: Send + Sync {
    async fn autocomplete(&self, query: &str) -> CoreResult<Vec<PlacePrediction>>;

    /// Resolve a prediction into the pick delivered to the trip draft
    async fn details(&self, place_id: &str) -> CoreResult<Destination>;
}

/// Fixed gazetteer used by tests and local development
pub struct MockPlacesProvider {
    places: Vec<Destination>,
}

impl MockPlacesProvider {
    pub fn new(places: Vec<Destination>) -> Self {
        Self { places }
    }

    pub fn with_airports() -> Self {
        Self::new(vec![
            Destination {
                latitude: 40.6413,
                longitude: -73.7781,
                description: "John F. Kennedy International Airport (JFK)".to_string(),
                place_id: "airport-jfk".to_string(),
            },
            Destination {
                latitude: 40.7769,
                longitude: -73.8740,
                description: "LaGuardia Airport (LGA)".to_string(),
                place_id: "airport-lga".to_string(),
            },
            Destination {
                latitude: 40.6895,
                longitude: -74.1745,
                description: "Newark Liberty International Airport (EWR)".to_string(),
                place_id: "airport-ewr".to_string(),
            },
        ])
    }
}

#[async_trait]
impl PlacesProvider for MockPlacesProvider {
    async fn autocomplete(&self, query: &str) -> CoreResult<Vec<PlacePrediction>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self
            .places
            .iter()
            .filter(|p| p.description.to_lowercase().contains(&needle))
            .map(|p| PlacePrediction {
                description: p.description.clone(),
                place_id: p.place_id.clone(),
            })
            .collect())
    }

    async fn details(&self, place_id: &str) -> CoreResult<Destination> {
        self.places
            .iter()
            .find(|p| p.place_id == place_id)
            .cloned()
            .ok_or_else(|| CoreError::NotFound(format!("place {}", place_id)))
    }
}
