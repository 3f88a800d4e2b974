//! Evaluation session identity

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of one variant-under-evaluation session, based on UUIDv7
///
/// A new id is issued whenever the evidence table is (re)seeded, so ids sort
/// in the order sessions were started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct EvaluationId(u128);

impl EvaluationId {
    /// Generate a new UUIDv7-based EvaluationId
    ///
    /// # Examples
    ///
    /// ```
    /// use vareval_domain::EvaluationId;
    ///
    /// let id = EvaluationId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create an EvaluationId from a raw u128 value
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse an EvaluationId from its UUID string form
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid UUIDv7 string: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }

    /// Milliseconds since the Unix epoch at which the session started
    pub fn timestamp(&self) -> u64 {
        (self.0 >> 80) as u64
    }
}

impl Default for EvaluationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EvaluationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

impl From<EvaluationId> for String {
    fn from(id: EvaluationId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for EvaluationId {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_string(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_chronological() {
        let id1 = EvaluationId::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let id2 = EvaluationId::new();
        assert!(id1 < id2);
        assert!(id1.timestamp() <= id2.timestamp());
    }

    #[test]
    fn test_display_and_parse() {
        let id = EvaluationId::new();
        let parsed = EvaluationId::from_string(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
        assert!(EvaluationId::from_string("not-a-uuid").is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let id = EvaluationId::from_value(42);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));
        let parsed: EvaluationId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }
}
