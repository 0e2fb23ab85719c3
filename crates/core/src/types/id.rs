//! Product identifiers.
//!
//! Product ids are the creation timestamp in milliseconds since the Unix
//! epoch, rendered as a decimal string. They are generated once and never
//! regenerated, so every edit, toggle and delete resolves its target by an
//! exact string match.

use core::fmt;

use chrono::{DateTime, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Stable identity of a product record.
///
/// Serialized as a plain JSON string. Numeric ids written by hand are read as
/// their decimal string.
///
/// # Example
///
/// ```rust
/// use av_store_core::ProductId;
///
/// let id = ProductId::new("1700000000000");
/// assert_eq!(id.as_str(), "1700000000000");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Wrap an existing id string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh id from `now`.
    ///
    /// The id is `now` in epoch milliseconds. When two records are created in
    /// the same millisecond, the candidate is bumped forward until it no
    /// longer collides with any id in `taken`.
    #[must_use]
    pub fn generate<'a, I>(now: DateTime<Utc>, taken: I) -> Self
    where
        I: IntoIterator<Item = &'a Self>,
    {
        let taken: Vec<&Self> = taken.into_iter().collect();
        let mut millis = now.timestamp_millis();
        loop {
            let candidate = millis.to_string();
            if !taken.iter().any(|id| id.0 == candidate) {
                return Self(candidate);
            }
            millis += 1;
        }
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ProductIdVisitor)
    }
}

struct ProductIdVisitor;

impl Visitor<'_> for ProductIdVisitor {
    type Value = ProductId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a product id string or number")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(ProductId::new(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(ProductId(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(ProductId(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(ProductId(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(ProductId(v.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(millis).unwrap()
    }

    #[test]
    fn test_generate_uses_epoch_millis() {
        let id = ProductId::generate(at(1_700_000_000_123), []);
        assert_eq!(id.as_str(), "1700000000123");
    }

    #[test]
    fn test_generate_skips_taken_ids() {
        let taken = [
            ProductId::new("1700000000123"),
            ProductId::new("1700000000124"),
        ];
        let id = ProductId::generate(at(1_700_000_000_123), &taken);
        assert_eq!(id.as_str(), "1700000000125");
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = ProductId::new("42");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"42\"");
        let parsed: ProductId = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_numeric_id_reads_as_string() {
        let parsed: ProductId = serde_json::from_str("1714564800000").unwrap();
        assert_eq!(parsed.as_str(), "1714564800000");
        assert!(serde_json::from_str::<ProductId>("{}").is_err());
    }
}
