use serde::{Deserialize, Serialize};

/// One priced ride class offered for a trip. Prices are in cents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FareQuote {
    pub id: String,
    pub tier: String,
    pub price: i32,
    /// Struck-through reference price
    pub old_price: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seat_text: Option<String>,
}

impl FareQuote {
    pub fn savings(&self) -> i32 {
        (self.old_price - self.price).max(0)
    }
}

/// Formats cents as "$12.34"
pub fn format_price(cents: i32) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    format!("{}${}.{:02}", sign, cents / 100, cents % 100)
}

/// Rider annotations attached to a request
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct SpecialRequest {
    pub caring_pet: bool,
    pub quiet_ride: bool,
    pub note: String,
}

impl SpecialRequest {
    pub fn is_empty(&self) -> bool {
        !self.caring_pet && !self.quiet_ride && self.note.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(4250), "$42.50");
        assert_eq!(format_price(5), "$0.05");
        assert_eq!(format_price(-120), "-$1.20");
    }

    #[test]
    fn test_quote_wire_format() {
        let json = r#"{"id": "premium", "tier": "Premium", "price": 6500, "oldPrice": 7800}"#;
        let quote: FareQuote = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(quote.savings(), 1300);
        assert!(quote.seat_text.is_none());
    }

    #[test]
    fn test_empty_special_request() {
        assert!(SpecialRequest::default().is_empty());
        let quiet = SpecialRequest {
            quiet_ride: true,
            ..Default::default()
        };
        assert!(!quiet.is_empty());
    }
}
