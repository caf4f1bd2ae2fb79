//! Property values: the closed set of value shapes that appear in host
//! trait and property maps.
//!
//! Host payloads arrive as loosely typed JSON. Every value is lifted into
//! [`PropertyValue`] once, at the boundary, so the mapping rules can match on
//! the variant instead of probing runtime types.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Ordered string-keyed property map. Ordering keeps translation output
/// deterministic; on key collision the last write wins.
pub type PropertyMap = BTreeMap<String, PropertyValue>;

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    Date(DateTime<Utc>),
    Map(PropertyMap),
    Sequence(Vec<PropertyValue>),
}

impl PropertyValue {
    /// String, number and boolean values are the only shapes the engagement
    /// SDK accepts without further translation.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            PropertyValue::String(_) | PropertyValue::Number(_) | PropertyValue::Bool(_)
        )
    }

    pub fn is_map(&self) -> bool {
        matches!(self, PropertyValue::Map(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&PropertyMap> {
        match self {
            PropertyValue::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<&DateTime<Utc>> {
        match self {
            PropertyValue::Date(d) => Some(d),
            _ => None,
        }
    }

    /// Convert back into plain JSON. Dates become RFC 3339 strings.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            PropertyValue::Null => serde_json::Value::Null,
            PropertyValue::Bool(b) => serde_json::Value::Bool(*b),
            PropertyValue::Number(n) => serde_json::Value::Number(n.clone()),
            PropertyValue::String(s) => serde_json::Value::String(s.clone()),
            PropertyValue::Date(d) => {
                serde_json::Value::String(d.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            PropertyValue::Map(m) => serde_json::Value::Object(
                m.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
            PropertyValue::Sequence(items) => {
                serde_json::Value::Array(items.iter().map(PropertyValue::to_json).collect())
            }
        }
    }
}

/// Lift a JSON object into a property map. Anything other than an object
/// yields `None`.
pub fn property_map(value: serde_json::Value) -> Option<PropertyMap> {
    match PropertyValue::from(value) {
        PropertyValue::Map(m) => Some(m),
        _ => None,
    }
}

impl From<serde_json::Value> for PropertyValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => PropertyValue::Null,
            serde_json::Value::Bool(b) => PropertyValue::Bool(b),
            serde_json::Value::Number(n) => PropertyValue::Number(n),
            serde_json::Value::String(s) => PropertyValue::String(s),
            serde_json::Value::Array(items) => {
                PropertyValue::Sequence(items.into_iter().map(PropertyValue::from).collect())
            }
            serde_json::Value::Object(obj) => PropertyValue::Map(
                obj.into_iter()
                    .map(|(k, v)| (k, PropertyValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::String(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        PropertyValue::Number(value.into())
    }
}

impl From<u64> for PropertyValue {
    fn from(value: u64) -> Self {
        PropertyValue::Number(value.into())
    }
}

impl From<DateTime<Utc>> for PropertyValue {
    fn from(value: DateTime<Utc>) -> Self {
        PropertyValue::Date(value)
    }
}

impl From<PropertyMap> for PropertyValue {
    fn from(value: PropertyMap) -> Self {
        PropertyValue::Map(value)
    }
}

impl From<Vec<PropertyValue>> for PropertyValue {
    fn from(value: Vec<PropertyValue>) -> Self {
        PropertyValue::Sequence(value)
    }
}

impl Serialize for PropertyValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PropertyValue::Null => serializer.serialize_unit(),
            PropertyValue::Bool(b) => serializer.serialize_bool(*b),
            PropertyValue::Number(n) => n.serialize(serializer),
            PropertyValue::String(s) => serializer.serialize_str(s),
            PropertyValue::Date(d) => {
                serializer.serialize_str(&d.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            PropertyValue::Map(m) => m.serialize(serializer),
            PropertyValue::Sequence(items) => items.serialize(serializer),
        }
    }
}

// JSON carries no date type, so deserialization never produces `Date`.
// Hosts that hold real dates construct the variant directly.
impl<'de> Deserialize<'de> for PropertyValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(PropertyValue::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_from_json_lifts_nested_shapes() {
        let map = property_map(json!({
            "name": "Ada",
            "age": 36,
            "vip": true,
            "company": {"id": "42"},
            "tags": ["a", 1],
            "missing": null
        }))
        .unwrap();

        assert_eq!(map["name"], PropertyValue::from("Ada"));
        assert_eq!(map["age"], PropertyValue::from(36i64));
        assert_eq!(map["vip"], PropertyValue::Bool(true));
        assert!(map["company"].is_map());
        assert!(matches!(map["tags"], PropertyValue::Sequence(_)));
        assert_eq!(map["missing"], PropertyValue::Null);
    }

    #[test]
    fn test_property_map_rejects_non_objects() {
        assert!(property_map(json!([1, 2])).is_none());
        assert!(property_map(json!("x")).is_none());
    }

    #[test]
    fn test_scalar_classification() {
        assert!(PropertyValue::from("x").is_scalar());
        assert!(PropertyValue::from(1i64).is_scalar());
        assert!(PropertyValue::Bool(false).is_scalar());
        assert!(!PropertyValue::Null.is_scalar());
        assert!(!PropertyValue::Sequence(vec![]).is_scalar());
        assert!(!PropertyValue::Map(PropertyMap::new()).is_scalar());
        assert!(!PropertyValue::Date(Utc::now()).is_scalar());
    }

    #[test]
    fn test_date_serializes_as_rfc3339() {
        let dob = Utc.with_ymd_and_hms(1990, 5, 17, 0, 0, 0).unwrap();
        let value = PropertyValue::Date(dob);
        assert_eq!(
            serde_json::to_value(&value).unwrap(),
            json!("1990-05-17T00:00:00.000Z")
        );
        assert_eq!(value.to_json(), json!("1990-05-17T00:00:00.000Z"));
    }

    #[test]
    fn test_deserialize_matches_from_json() {
        let raw = json!({"revenue": 9.99, "products": [{"product_id": "P1"}]});
        let parsed: PropertyMap = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(Some(parsed.clone()), property_map(raw.clone()));
        assert_eq!(PropertyValue::Map(parsed).to_json(), raw);
    }
}
