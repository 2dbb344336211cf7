//! Decimal-string encoding for [`Wei`] amounts.
//!
//! Amounts routinely exceed 2^53, the largest integer a JavaScript number
//! holds exactly, so they are written as decimal strings. Reading accepts
//! either a string or an integer, so older snapshots and hand-written
//! request bodies still decode.
//!
//! Use with `#[serde(with = "cryptopet_types::wei")]`.

use core::fmt;

use serde::de::{self, Visitor};
use serde::{Deserializer, Serializer};

use crate::structs::Wei;

/// Write `amount` as a decimal string.
pub fn serialize<S>(amount: &Wei, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(amount)
}

/// Read an amount from a decimal string or a non-negative integer.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Wei, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(WeiVisitor)
}

struct WeiVisitor;

impl Visitor<'_> for WeiVisitor {
    type Value = Wei;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative amount of wei as a decimal string or integer")
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Wei, E> {
        Ok(Wei::from(value))
    }

    fn visit_u128<E: de::Error>(self, value: u128) -> Result<Wei, E> {
        Ok(value)
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Wei, E> {
        Wei::try_from(value).map_err(|e| E::custom(format!("invalid amount {value}: {e}")))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Wei, E> {
        if !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(E::invalid_value(de::Unexpected::Str(value), &self));
        }
        value
            .parse()
            .map_err(|e| E::custom(format!("invalid amount {value:?}: {e}")))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    struct Amount {
        #[serde(with = "crate::wei")]
        value: Wei,
    }

    #[test]
    fn large_amounts_are_exact_strings() {
        let amount = Amount { value: Wei::MAX };
        let json = serde_json::to_string(&amount).unwrap();
        assert_eq!(
            json,
            r#"{"value":"340282366920938463463374607431768211455"}"#
        );
        assert_eq!(serde_json::from_str::<Amount>(&json).unwrap(), amount);
    }

    #[test]
    fn integers_are_accepted() {
        let amount: Amount = serde_json::from_str(r#"{"value": 10000000000000000}"#).unwrap();
        assert_eq!(amount.value, 10_000_000_000_000_000);
    }

    #[test]
    fn malformed_amounts_rejected() {
        for body in [
            r#"{"value": -1}"#,
            r#"{"value": "-1"}"#,
            r#"{"value": "+1"}"#,
            r#"{"value": ""}"#,
            r#"{"value": "1e18"}"#,
            r#"{"value": 1.5}"#,
        ] {
            assert!(serde_json::from_str::<Amount>(body).is_err(), "{body}");
        }
    }
}
