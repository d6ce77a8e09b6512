// File: formcraft-schema/src/id.rs
// Purpose: Field identifiers

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifier of a field within a schema
///
/// Editors usually hand out integers, but string ids are accepted too.
/// A string made only of ASCII digits is the same id as the number it
/// spells, so submission keys (always strings in JSON objects) line up with
/// numeric schema ids.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldId {
    Numeric(u64),
    Text(String),
}

impl FieldId {
    /// Numeric value of the id, if it has one
    pub fn as_number(&self) -> Option<u64> {
        match self {
            FieldId::Numeric(n) => Some(*n),
            FieldId::Text(_) => None,
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldId::Numeric(n) => write!(f, "{}", n),
            FieldId::Text(s) => f.write_str(s),
        }
    }
}

impl FromStr for FieldId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(FieldId::from(s))
    }
}

impl From<u64> for FieldId {
    fn from(n: u64) -> Self {
        FieldId::Numeric(n)
    }
}

impl From<u32> for FieldId {
    fn from(n: u32) -> Self {
        FieldId::Numeric(u64::from(n))
    }
}

impl From<usize> for FieldId {
    fn from(n: usize) -> Self {
        FieldId::Numeric(n as u64)
    }
}

impl From<i32> for FieldId {
    fn from(n: i32) -> Self {
        match u64::try_from(n) {
            Ok(n) => FieldId::Numeric(n),
            Err(_) => FieldId::Text(n.to_string()),
        }
    }
}

impl From<&str> for FieldId {
    fn from(s: &str) -> Self {
        let all_digits = !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        match s.parse::<u64>() {
            Ok(n) if all_digits => FieldId::Numeric(n),
            _ => FieldId::Text(s.to_string()),
        }
    }
}

impl From<String> for FieldId {
    fn from(s: String) -> Self {
        match FieldId::from(s.as_str()) {
            FieldId::Text(_) => FieldId::Text(s),
            numeric => numeric,
        }
    }
}

impl Serialize for FieldId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldId::Numeric(n) => serializer.serialize_u64(*n),
            FieldId::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for FieldId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(u64),
            Float(f64),
            Text(String),
        }

        match RawId::deserialize(deserializer)? {
            RawId::Number(n) => Ok(FieldId::Numeric(n)),
            RawId::Float(f) if f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 => {
                Ok(FieldId::Numeric(f as u64))
            }
            RawId::Float(f) => Ok(FieldId::Text(f.to_string())),
            RawId::Text(s) => Ok(FieldId::from(s)),
        }
    }
}
