use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Half-hourly unit rate as served by the backend and Octopus.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricedSlot {
    /// Inclusive.
    pub valid_from: DateTime<Utc>,

    /// Exclusive, the backend may omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_to: Option<DateTime<Utc>>,

    /// Pence per kilowatt-hour including VAT.
    pub value_inc_vat: f64,
}

impl PricedSlot {
    #[cfg(test)]
    pub fn new(valid_from: &str, value_inc_vat: f64) -> Self {
        Self { valid_from: valid_from.parse().unwrap(), valid_to: None, value_inc_vat }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_deserialize_octopus_result() {
        let slot: PricedSlot = serde_json::from_str(
            r#"{
                "value_exc_vat": 10,
                "value_inc_vat": 12.6,
                "valid_from": "2023-04-01T00:00:00Z",
                "valid_to": "2023-04-01T00:30:00Z",
                "payment_method": null
            }"#,
        )
        .unwrap();
        assert_eq!(slot.valid_from.to_rfc3339(), "2023-04-01T00:00:00+00:00");
        assert!(slot.valid_to.is_some());
        assert_abs_diff_eq!(slot.value_inc_vat, 12.6);
    }

    #[test]
    fn test_deserialize_without_valid_to() {
        let slot: PricedSlot =
            serde_json::from_str(r#"{"valid_from": "2024-01-01T00:00:00Z", "value_inc_vat": 10}"#)
                .unwrap();
        assert!(slot.valid_to.is_none());
    }

    #[test]
    fn test_deserialize_missing_price_fails() {
        let result =
            serde_json::from_str::<PricedSlot>(r#"{"valid_from": "2024-01-01T00:00:00Z"}"#);
        assert!(result.is_err());
    }
}
