use serde::{Deserialize, Serialize};

/// A point on the map as reported by the places collaborator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A picked place: pickup or drop-off
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub latitude: f64,
    pub longitude: f64,
    pub description: String,
    pub place_id: String,
}

impl Destination {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    pub fn position(&self) -> Position {
        Position {
            lat: self.latitude,
            lon: self.longitude,
        }
    }
}

/// Map position used only for centering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lon: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_camel_case_wire_format() {
        let json = r#"{"latitude":40.64,"longitude":-73.78,"description":"JFK Terminal 4","placeId":"ChIJ-jfk"}"#;
        let dest: Destination = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(dest.place_id, "ChIJ-jfk");
        assert_eq!(dest.position(), Position { lat: 40.64, lon: -73.78 });
    }
}
