//! Checkout metadata
//!
//! The bundle attached to a payment session at draft time and returned
//! verbatim by the gateway with the asynchronous confirmation. It carries
//! every field needed to materialize the order later, so an abandoned
//! checkout leaves no trace in our store.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Metadata carried through the payment session
///
/// Gateways transport metadata as a string-to-string map, hence the
/// `to_map` / `from_map` round trip. Computed amounts here are what the
/// customer saw at draft time; confirmation recomputes from fresh pricing
/// and only cross-checks these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutMetadata {
    pub user_id: Option<String>,
    pub customer_email: Option<String>,
    pub postal_code: String,
    pub zone_id: i64,
    pub slot_id: i64,
    pub est_bags: i64,
    pub instructions: Option<String>,
    pub subtotal_cents: i64,
    pub fee_cents: i64,
    pub tip_cents: i64,
    pub total_cents: i64,
}

/// Metadata decode failure; the confirmation payload was malformed
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("missing metadata field: {0}")]
    Missing(&'static str),
    #[error("invalid metadata field {0}: {1}")]
    Invalid(&'static str, String),
}

fn parse_i64(map: &BTreeMap<String, String>, key: &'static str) -> Result<i64, MetadataError> {
    let raw = map.get(key).ok_or(MetadataError::Missing(key))?;
    raw.parse()
        .map_err(|_| MetadataError::Invalid(key, raw.clone()))
}

fn opt_string(map: &BTreeMap<String, String>, key: &str) -> Option<String> {
    map.get(key).filter(|v| !v.is_empty()).cloned()
}

impl CheckoutMetadata {
    /// Encode as the gateway's string-to-string metadata map
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert(
            "user_id".into(),
            self.user_id.clone().unwrap_or_default(),
        );
        map.insert(
            "customer_email".into(),
            self.customer_email.clone().unwrap_or_default(),
        );
        map.insert("postal_code".into(), self.postal_code.clone());
        map.insert("zone_id".into(), self.zone_id.to_string());
        map.insert("slot_id".into(), self.slot_id.to_string());
        map.insert("est_bags".into(), self.est_bags.to_string());
        map.insert(
            "instructions".into(),
            self.instructions.clone().unwrap_or_default(),
        );
        map.insert("subtotal_cents".into(), self.subtotal_cents.to_string());
        map.insert("fee_cents".into(), self.fee_cents.to_string());
        map.insert("tip_cents".into(), self.tip_cents.to_string());
        map.insert("total_cents".into(), self.total_cents.to_string());
        map
    }

    /// Decode from the gateway's metadata map
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self, MetadataError> {
        Ok(Self {
            user_id: opt_string(map, "user_id"),
            customer_email: opt_string(map, "customer_email"),
            postal_code: map
                .get("postal_code")
                .cloned()
                .ok_or(MetadataError::Missing("postal_code"))?,
            zone_id: parse_i64(map, "zone_id")?,
            slot_id: parse_i64(map, "slot_id")?,
            est_bags: parse_i64(map, "est_bags")?,
            instructions: opt_string(map, "instructions"),
            subtotal_cents: parse_i64(map, "subtotal_cents")?,
            fee_cents: parse_i64(map, "fee_cents")?,
            tip_cents: parse_i64(map, "tip_cents")?,
            total_cents: parse_i64(map, "total_cents")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CheckoutMetadata {
        CheckoutMetadata {
            user_id: None,
            customer_email: Some("guest@example.com".into()),
            postal_code: "44107".into(),
            zone_id: 3,
            slot_id: 17,
            est_bags: 2,
            instructions: Some("side door".into()),
            subtotal_cents: 5000,
            fee_cents: 300,
            tip_cents: 0,
            total_cents: 5300,
        }
    }

    #[test]
    fn map_round_trip() {
        let meta = sample();
        let map = meta.to_map();
        // Absent optionals travel as empty strings, the gateway convention
        assert_eq!(map.get("user_id").map(String::as_str), Some(""));
        let back = CheckoutMetadata::from_map(&map).unwrap();
        assert_eq!(back, meta);
    }

    #[test]
    fn missing_slot_id_is_rejected() {
        let mut map = sample().to_map();
        map.remove("slot_id");
        assert!(matches!(
            CheckoutMetadata::from_map(&map),
            Err(MetadataError::Missing("slot_id"))
        ));
    }

    #[test]
    fn non_numeric_amount_is_rejected() {
        let mut map = sample().to_map();
        map.insert("total_cents".into(), "53.00".into());
        assert!(matches!(
            CheckoutMetadata::from_map(&map),
            Err(MetadataError::Invalid("total_cents", _))
        ));
    }
}
