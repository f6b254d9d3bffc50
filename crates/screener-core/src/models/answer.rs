use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;

/// A yes/no response, carried on the wire as `1` / `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnswerValue {
    No,
    Yes,
}

impl AnswerValue {
    pub fn as_int(self) -> u8 {
        match self {
            AnswerValue::No => 0,
            AnswerValue::Yes => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AnswerValue::No => "No",
            AnswerValue::Yes => "Yes",
        }
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<bool> for AnswerValue {
    fn from(yes: bool) -> Self {
        if yes { AnswerValue::Yes } else { AnswerValue::No }
    }
}

impl TryFrom<i64> for AnswerValue {
    type Error = CoreError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(AnswerValue::No),
            1 => Ok(AnswerValue::Yes),
            other => Err(CoreError::InvalidAnswer(other)),
        }
    }
}

impl Serialize for AnswerValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_int())
    }
}

impl<'de> Deserialize<'de> for AnswerValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        AnswerValue::try_from(raw).map_err(serde::de::Error::custom)
    }
}

/// Answers keyed by question `field`.
///
/// Entries keep the order in which they were first inserted, so a map built
/// by walking the question list serialises in display order. Entries are
/// only ever added or overwritten; the whole map is cleared on reset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerMap {
    entries: Vec<(String, AnswerValue)>,
}

impl AnswerMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the answer for `field`, returning the previous answer if any.
    pub fn insert(&mut self, field: impl Into<String>, value: AnswerValue) -> Option<AnswerValue> {
        let field = field.into();
        match self.entries.iter_mut().find(|(f, _)| *f == field) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((field, value));
                None
            }
        }
    }

    pub fn get(&self, field: &str) -> Option<AnswerValue> {
        self.entries
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, v)| *v)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, AnswerValue)> {
        self.entries.iter().map(|(f, v)| (f.as_str(), *v))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Serialize for AnswerMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, value) in &self.entries {
            map.serialize_entry(field, value)?;
        }
        map.end()
    }
}
