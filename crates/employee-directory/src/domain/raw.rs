//! Raw list items as delivered by the record source.
//!
//! List items carry no fixed schema. [`RawRecord`] keeps keys in the order the
//! source produced them because name resolution scans keys in that order, and
//! [`RawValue`] closes the set of shapes a column value may take.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Number, Value};

/// One weakly typed column value inside a raw list item.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// JSON `null`, or a lookup column with nothing selected.
    Null,
    /// Yes/No column value.
    Bool(bool),
    /// Numeric column value in its JSON form.
    Number(Number),
    /// Text column value, exactly as stored.
    String(String),
    /// Expanded person or lookup object.
    Object(RawRecord),
    /// Multi-value person or lookup column.
    Array(Vec<RawValue>),
}

impl From<Value> for RawValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(flag) => Self::Bool(flag),
            Value::Number(number) => Self::Number(number),
            Value::String(text) => Self::String(text),
            Value::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => Self::Object(RawRecord::from(map)),
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self {
        Self::Number(Number::from(value))
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        Self::Number(Number::from(value))
    }
}

impl From<RawRecord> for RawValue {
    fn from(value: RawRecord) -> Self {
        Self::Object(value)
    }
}

impl From<Vec<RawValue>> for RawValue {
    fn from(value: Vec<RawValue>) -> Self {
        Self::Array(value)
    }
}

/// A single list item: string keys mapped to [`RawValue`]s in source order.
///
/// Lookups are exact-match on the key. Inserting an existing key replaces
/// its value without moving it.
///
/// # Examples
///
/// ```
/// use employee_directory::domain::{RawRecord, RawValue};
///
/// let record = RawRecord::new()
///     .with("Id", 7)
///     .with("Title", "EMP007")
///     .with("EmployeeName", "Jane Doe");
///
/// assert_eq!(record.len(), 3);
/// assert_eq!(record.get("Title"), Some(&RawValue::from("EMP007")));
/// assert_eq!(record.keys().collect::<Vec<_>>(), ["Id", "Title", "EmployeeName"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawRecord {
    entries: Vec<(String, RawValue)>,
}

impl RawRecord {
    /// Create an empty record.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Builder-style insert used by fixtures and adapters.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a value, replacing any existing value under the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<RawValue>) {
        let owned_key = key.into();
        let owned_value = value.into();
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|(existing, _)| *existing == owned_key)
        {
            entry.1 = owned_value;
            return;
        }
        self.entries.push((owned_key, owned_value));
    }

    /// Look up a value by exact key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    /// Look up the first value whose key matches ignoring ASCII case.
    #[must_use]
    pub fn get_ignore_ascii_case(&self, key: &str) -> Option<&RawValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(key))
            .map(|(_, value)| value)
    }

    /// Iterate entries in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value))
    }

    /// Iterate keys in source order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Number of entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the record has no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Map<String, Value>> for RawRecord {
    fn from(map: Map<String, Value>) -> Self {
        map.into_iter().collect()
    }
}

impl TryFrom<Value> for RawRecord {
    type Error = Value;

    /// Convert a JSON object; any other JSON shape is handed back unchanged.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self::from(map)),
            other => Err(other),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for RawRecord
where
    K: Into<String>,
    V: Into<RawValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}

impl<'de> Deserialize<'de> for RawRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Map::<String, Value>::deserialize(deserializer).map(Self::from)
    }
}
