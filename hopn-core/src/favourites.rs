use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FavouriteLabel {
    Home,
    Work,
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FavouriteCoords {
    pub latitude: f64,
    pub longitude: f64,
    pub place_id: String,
}

/// What the "save favourite" sheet submits
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FavouritePayload {
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coords: Option<FavouriteCoords>,
    pub label: FavouriteLabel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_title: Option<String>,
    #[serde(default)]
    pub is_starred: bool,
}

impl FavouritePayload {
    pub fn validate(&self) -> CoreResult<()> {
        if self.address.trim().is_empty() {
            return Err(CoreError::ValidationError("address is required".to_string()));
        }
        if self.label == FavouriteLabel::Other
            && self.custom_title.as_deref().map_or(true, |t| t.trim().is_empty())
        {
            return Err(CoreError::ValidationError(
                "a custom title is required for label Other".to_string(),
            ));
        }
        Ok(())
    }

    pub fn title(&self) -> String {
        match self.label {
            FavouriteLabel::Home => "Home".to_string(),
            FavouriteLabel::Work => "Work".to_string(),
            FavouriteLabel::Other => self
                .custom_title
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .to_string(),
        }
    }
}
