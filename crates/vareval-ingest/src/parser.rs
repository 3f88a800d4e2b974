//! Parse raw predictor responses into payloads
//!
//! Predictor services wrap their results differently depending on version.
//! The parsers here accept the known shapes and skip malformed entries with a
//! warning rather than failing the whole response. Evaluation documents read
//! their payload fields through the same parsers.

use crate::error::{IngestError, Result};
use crate::types::{AutoAcmgEntry, AutoAcmgPrediction, AutoCnvEntry, InterVarCall, InterVarPayload};
use serde_json::{Map, Value};
use tracing::warn;

/// Parse an InterVar response: an object of `id -> 0/1`
pub fn parse_intervar_response(response: &str) -> Result<InterVarPayload> {
    intervar_from_value(&serde_json::from_str(response.trim())?)
}

/// InterVar calls from an already-decoded response
pub fn intervar_from_value(json: &Value) -> Result<InterVarPayload> {
    let obj = json
        .as_object()
        .ok_or_else(|| IngestError::InvalidFormat("Expected JSON object of calls".to_string()))?;

    let mut payload = InterVarPayload::default();
    for (id, value) in obj {
        let call = match value {
            Value::Bool(met) => InterVarCall::Bool(*met),
            Value::Number(n) => match n.as_u64() {
                Some(flag) => InterVarCall::Flag(u8::from(flag != 0)),
                None => {
                    warn!("InterVar call for {} is not a flag: {}", id, n);
                    continue;
                }
            },
            other => {
                warn!("InterVar call for {} is not a flag: {}", id, other);
                continue;
            }
        };
        payload.calls.insert(id.clone(), call);
    }
    Ok(payload)
}

/// Parse an AutoACMG response
///
/// Accepts a list of entries, an object keyed by criterion id, or either of
/// those wrapped in `{"criteria": ...}` / `{"prediction": {"criteria": ...}}`.
pub fn parse_autoacmg_response(response: &str) -> Result<Vec<AutoAcmgEntry>> {
    autoacmg_from_value(&serde_json::from_str(response.trim())?)
}

/// AutoACMG entries from an already-decoded response
pub fn autoacmg_from_value(json: &Value) -> Result<Vec<AutoAcmgEntry>> {
    let criteria = unwrap_criteria(json);

    let mut entries = Vec::new();
    match criteria {
        Value::Array(items) => {
            for (idx, item) in items.iter().enumerate() {
                match parse_autoacmg_entry(None, item) {
                    Ok(entry) => entries.push(entry),
                    Err(e) => warn!("Failed to parse AutoACMG entry {}: {}", idx, e),
                }
            }
        }
        Value::Object(map) => {
            for (key, item) in map {
                match parse_autoacmg_entry(Some(key), item) {
                    Ok(entry) => entries.push(entry),
                    Err(e) => warn!("Failed to parse AutoACMG entry {}: {}", key, e),
                }
            }
        }
        _ => {
            return Err(IngestError::InvalidFormat(
                "Expected AutoACMG criteria as array or object".to_string(),
            ))
        }
    }
    Ok(entries)
}

fn unwrap_criteria(json: &Value) -> &Value {
    let inner = json.get("prediction").unwrap_or(json);
    inner.get("criteria").unwrap_or(inner)
}

fn parse_autoacmg_entry(key: Option<&String>, json: &Value) -> std::result::Result<AutoAcmgEntry, String> {
    let obj = json
        .as_object()
        .ok_or_else(|| "Entry is not a JSON object".to_string())?;

    let name = string_field(obj, "name")
        .or_else(|| key.cloned())
        .ok_or_else(|| "Missing or invalid 'name'".to_string())?;

    let prediction = obj
        .get("prediction")
        .and_then(|v| v.as_str())
        .ok_or_else(|| "Missing or invalid 'prediction'".to_string())?;
    let prediction = AutoAcmgPrediction::parse(prediction)
        .ok_or_else(|| format!("Unknown prediction '{}'", prediction))?;

    Ok(AutoAcmgEntry {
        name,
        prediction,
        strength: string_field(obj, "strength"),
        summary: string_field(obj, "summary").filter(|s| !s.trim().is_empty()),
    })
}

/// Parse an AutoCNV response: a list of `{criterion, score, summary?}`
pub fn parse_autocnv_response(response: &str) -> Result<Vec<AutoCnvEntry>> {
    autocnv_from_value(&serde_json::from_str(response.trim())?)
}

/// AutoCNV entries from an already-decoded response
pub fn autocnv_from_value(json: &Value) -> Result<Vec<AutoCnvEntry>> {
    let criteria = unwrap_criteria(json);
    let items = criteria
        .as_array()
        .ok_or_else(|| IngestError::InvalidFormat("Expected JSON array of scores".to_string()))?;

    let mut entries = Vec::new();
    for (idx, item) in items.iter().enumerate() {
        match serde_json::from_value::<AutoCnvEntry>(item.clone()) {
            Ok(entry) if entry.score.is_finite() => entries.push(entry),
            Ok(entry) => warn!("AutoCNV score for {} is not finite", entry.criterion),
            Err(e) => warn!("Failed to parse AutoCNV entry {}: {}", idx, e),
        }
    }
    Ok(entries)
}

fn string_field(obj: &Map<String, Value>, field: &str) -> Option<String> {
    obj.get(field).and_then(|v| v.as_str()).map(|s| s.to_string())
}

/// `deserialize_with` adapters for document payload fields
///
/// A payload of the wrong shape still fails the document; malformed entries
/// inside it are skipped.
pub(crate) mod tolerant {
    use super::{autoacmg_from_value, autocnv_from_value, intervar_from_value};
    use crate::types::{AutoAcmgEntry, AutoCnvEntry, InterVarPayload};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn intervar<'de, D>(deserializer: D) -> Result<Option<InterVarPayload>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(None),
            Some(json) => intervar_from_value(&json).map(Some).map_err(D::Error::custom),
        }
    }

    pub fn autoacmg<'de, D>(deserializer: D) -> Result<Vec<AutoAcmgEntry>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(Vec::new()),
            json => autoacmg_from_value(&json).map_err(D::Error::custom),
        }
    }

    pub fn autocnv<'de, D>(deserializer: D) -> Result<Vec<AutoCnvEntry>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(Vec::new()),
            json => autocnv_from_value(&json).map_err(D::Error::custom),
        }
    }
}
