//! Newtype IDs for type-safe identifiers.
//!
//! The backend emits numeric ids while client-side storage keys them as
//! strings, so every id is held as its string form. Ids deserialize from
//! either JSON numbers or strings, and serialize back as numbers whenever
//! the string is a canonical integer.
//!
//! Ordering follows JavaScript object key order: canonical non-negative
//! integers first in numeric order, then everything else by string.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// Parse `s` as a canonical non-negative integer ("7" yes, "07" and "+7" no).
fn canonical_index(s: &str) -> Option<u64> {
    let value: u64 = s.parse().ok()?;
    (value.to_string() == s).then_some(value)
}

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }

            /// The numeric value, when the id is a canonical integer.
            pub fn as_number(&self) -> Option<u64> {
                canonical_index(&self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<u64> for $name {
            fn from(n: u64) -> Self {
                Self(n.to_string())
            }
        }

        impl From<i64> for $name {
            fn from(n: i64) -> Self {
                Self(n.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                match (self.as_number(), other.as_number()) {
                    (Some(a), Some(b)) => a.cmp(&b),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => self.0.cmp(&other.0),
                }
            }
        }

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                match self.as_number() {
                    Some(n) => serializer.serialize_u64(n),
                    None => serializer.serialize_str(&self.0),
                }
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                deserializer.deserialize_any(IdVisitor).map(Self)
            }
        }
    };
}

/// Accepts strings and integral numbers, yielding the string form.
struct IdVisitor;

impl<'de> Visitor<'de> for IdVisitor {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string or integer identifier")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
        Ok(v)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
        if v.is_finite() && v.fract() == 0.0 && v.abs() < 9.0e15 {
            Ok(format!("{}", v as i64))
        } else {
            Err(E::invalid_value(de::Unexpected::Float(v), &self))
        }
    }
}

define_id!(
    /// Identifier of a catalog product; also the cart's mapping key.
    ProductId
);
define_id!(CategoryId);
define_id!(
    /// Identifier of a bookable spa service.
    ServiceId
);
define_id!(ReservationId);
define_id!(OrderId);
define_id!(UserId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ProductId::new("prod-123");
        assert_eq!(id.as_str(), "prod-123");
    }

    #[test]
    fn test_numeric_ids_are_stringified() {
        assert_eq!(ProductId::from(7u64).as_str(), "7");
        let id: ProductId = serde_json::from_str("7").unwrap();
        assert_eq!(id, ProductId::new("7"));
    }

    #[test]
    fn test_string_ids_deserialize() {
        let id: ProductId = serde_json::from_str(r#""abc""#).unwrap();
        assert_eq!(id.as_str(), "abc");
    }

    #[test]
    fn test_serialize_numeric_as_number() {
        assert_eq!(serde_json::to_string(&CategoryId::new("3")).unwrap(), "3");
        assert_eq!(serde_json::to_string(&CategoryId::new("03")).unwrap(), r#""03""#);
        assert_eq!(serde_json::to_string(&CategoryId::new("x")).unwrap(), r#""x""#);
    }

    #[test]
    fn test_map_keys_roundtrip() {
        let mut map = std::collections::BTreeMap::new();
        map.insert(ProductId::new("7"), 2u32);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"7":2}"#);

        let back: std::collections::BTreeMap<ProductId, u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }

    #[test]
    fn test_ordering_matches_object_key_order() {
        let mut ids = vec![
            ProductId::new("b"),
            ProductId::new("10"),
            ProductId::new("a"),
            ProductId::new("7"),
            ProductId::new("07"),
        ];
        ids.sort();
        let order: Vec<&str> = ids.iter().map(|i| i.as_str()).collect();
        assert_eq!(order, vec!["7", "10", "07", "a", "b"]);
    }
}
