//! Record types for the administrative-division dataset.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Number, Value};

/// Administrative code (`mahc`) of a province.
///
/// The source file mixes numeric and textual codes, so both are accepted
/// and kept in their original JSON form. Lookups compare the [`Display`]
/// form, which renders numbers without quotes and strings verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdminCode {
    /// Numeric code, e.g. `1`.
    Number(Number),
    /// Textual code, e.g. `"01"`.
    Text(String),
}

impl AdminCode {
    /// Whether this code's string form equals `key`.
    pub fn matches(&self, key: &str) -> bool {
        match self {
            AdminCode::Text(s) => s == key,
            AdminCode::Number(n) => n.to_string() == key,
        }
    }
}

impl fmt::Display for AdminCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdminCode::Number(n) => write!(f, "{n}"),
            AdminCode::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for AdminCode {
    fn from(code: i64) -> Self {
        AdminCode::Number(code.into())
    }
}

impl From<&str> for AdminCode {
    fn from(code: &str) -> Self {
        AdminCode::Text(code.to_string())
    }
}

/// Province-level ("tinh") entry.
///
/// Only `mahc` is interpreted; descriptive fields such as `ten`, `dan_so`
/// or `dientich_km2` pass through untouched. Serializes back to the exact
/// object it was read from, keys in file order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct Province {
    mahc: AdminCode,
    fields: Map<String, Value>,
}

impl Province {
    /// Administrative code used as the lookup key.
    pub fn mahc(&self) -> &AdminCode {
        &self.mahc
    }

    /// Every field of the entry, `mahc` included, in file order.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Display name (`ten`), when present.
    pub fn name(&self) -> Option<&str> {
        self.fields.get("ten").and_then(Value::as_str)
    }
}

impl TryFrom<Map<String, Value>> for Province {
    type Error = String;

    fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
        let mahc = fields.get("mahc").ok_or("missing field `mahc`")?;
        let mahc = AdminCode::deserialize(mahc).map_err(|e| format!("invalid `mahc`: {e}"))?;
        Ok(Self { mahc, fields })
    }
}

impl Serialize for Province {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

/// One dataset entry: a province and its communes ("xa").
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct Record {
    /// Province entry.
    pub tinh: Province,
    /// Commune entries, opaque.
    pub xa: Vec<Value>,
    /// Any other top-level keys of the entry.
    pub extra: Map<String, Value>,
    key_order: Vec<String>,
}

impl TryFrom<Map<String, Value>> for Record {
    type Error = String;

    fn try_from(mut extra: Map<String, Value>) -> Result<Self, Self::Error> {
        let key_order = extra.keys().cloned().collect();

        let tinh = extra.remove("tinh").ok_or("missing field `tinh`")?;
        let tinh = Province::deserialize(tinh).map_err(|e| format!("invalid `tinh`: {e}"))?;
        let xa = extra.remove("xa").ok_or("missing field `xa`")?;
        let xa = Vec::<Value>::deserialize(xa).map_err(|e| format!("invalid `xa`: {e}"))?;

        Ok(Self {
            tinh,
            xa,
            extra,
            key_order,
        })
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.key_order.len()))?;
        for key in &self.key_order {
            match key.as_str() {
                "tinh" => map.serialize_entry(key, &self.tinh)?,
                "xa" => map.serialize_entry(key, &self.xa)?,
                other => {
                    if let Some(value) = self.extra.get(other) {
                        map.serialize_entry(key, value)?;
                    }
                }
            }
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn admin_code_string_forms() {
        assert_eq!(AdminCode::from(1).to_string(), "1");
        assert_eq!(AdminCode::from("01").to_string(), "01");

        let float: AdminCode = serde_json::from_value(json!(1.5)).unwrap();
        assert_eq!(float.to_string(), "1.5");
    }

    #[test]
    fn admin_code_matching_is_string_based() {
        assert!(AdminCode::from(1).matches("1"));
        assert!(!AdminCode::from(1).matches("01"));
        assert!(AdminCode::from("01").matches("01"));
        assert!(!AdminCode::from("01").matches("1"));
        assert!(AdminCode::from("7").matches("7"));
    }

    #[test]
    fn admin_code_rejects_other_json_types() {
        assert!(serde_json::from_value::<AdminCode>(json!(true)).is_err());
        assert!(serde_json::from_value::<AdminCode>(json!(null)).is_err());
    }

    #[test]
    fn record_keeps_opaque_fields() {
        let raw = json!({
            "tinh": {"mahc": 1, "ten": "Hà Nội", "dan_so": 8_000_000},
            "xa": [{"ten": "Phường Ba Đình", "loai": "Phường"}],
            "nguon": "2025"
        });

        let record: Record = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(record.tinh.mahc(), &AdminCode::from(1));
        assert_eq!(record.tinh.name(), Some("Hà Nội"));
        assert_eq!(record.xa.len(), 1);
        assert_eq!(record.extra.get("nguon"), Some(&json!("2025")));
        assert_eq!(serde_json::to_value(&record).unwrap(), raw);
    }

    #[test]
    fn record_requires_mahc_and_xa() {
        assert!(serde_json::from_value::<Record>(json!({"tinh": {"ten": "A"}, "xa": []})).is_err());
        assert!(serde_json::from_value::<Record>(json!({"tinh": {"mahc": 1}})).is_err());
        assert!(serde_json::from_value::<Record>(json!({"tinh": [1], "xa": []})).is_err());
        assert!(serde_json::from_value::<Record>(json!({"tinh": {"mahc": 1}, "xa": {}})).is_err());
        assert!(serde_json::from_value::<Record>(json!({"tinh": {"mahc": true}, "xa": []})).is_err());
    }

    #[test]
    fn serialization_keeps_file_key_order() {
        let raw = r#"{"nguon":"2025","xa":[{"ten":"X","loai":"Xã"}],"tinh":{"ten":"A","mahc":1,"dan_so":10}}"#;

        let record: Record = serde_json::from_str(raw).unwrap();

        assert_eq!(serde_json::to_string(&record).unwrap(), raw);
        assert_eq!(
            serde_json::to_string(&record.tinh).unwrap(),
            r#"{"ten":"A","mahc":1,"dan_so":10}"#
        );
    }
}
