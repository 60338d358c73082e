use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

/// Wire prefix for free-text entries in single-select answers.
pub const CUSTOM_PREFIX: &str = "custom:";

/// A single answer; the shape follows the question's input kind.
///
/// Text and single-select answers share the string shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Flag(bool),
    Text(String),
    Selection(Vec<String>),
    Counts(BTreeMap<String, u32>),
}

impl AnswerValue {
    pub fn shape(&self) -> &'static str {
        match self {
            AnswerValue::Flag(_) => "boolean",
            AnswerValue::Text(_) => "string",
            AnswerValue::Selection(_) => "list",
            AnswerValue::Counts(_) => "counter map",
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        AnswerValue::Text(value.into())
    }

    pub fn selection<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for value in values {
            let value = value.into();
            if !out.contains(&value) {
                out.push(value);
            }
        }
        AnswerValue::Selection(out)
    }

    pub fn counts<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        AnswerValue::Counts(
            entries
                .into_iter()
                .map(|(key, count)| (key.into(), count))
                .collect(),
        )
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerValue::Flag(true) => f.write_str("yes"),
            AnswerValue::Flag(false) => f.write_str("no"),
            AnswerValue::Text(text) => match ChoiceValue::parse(text) {
                ChoiceValue::Custom(custom) => write!(f, "{custom} (custom)"),
                ChoiceValue::Preset(value) => f.write_str(value),
            },
            AnswerValue::Selection(values) => f.write_str(&values.join(", ")),
            AnswerValue::Counts(counts) => {
                let parts = counts
                    .iter()
                    .filter(|(_, count)| **count > 0)
                    .map(|(key, count)| format!("{key} x{count}"))
                    .collect::<Vec<_>>();
                f.write_str(&parts.join(", "))
            }
        }
    }
}

/// Tagged view over a single-select answer string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceValue<'a> {
    Preset(&'a str),
    Custom(&'a str),
}

impl<'a> ChoiceValue<'a> {
    pub fn parse(raw: &'a str) -> Self {
        match raw.strip_prefix(CUSTOM_PREFIX) {
            Some(text) => ChoiceValue::Custom(text),
            None => ChoiceValue::Preset(raw),
        }
    }

    /// Formats a free-text entry as the wire sentinel.
    pub fn custom_answer(text: &str) -> String {
        format!("{CUSTOM_PREFIX}{text}")
    }
}

impl fmt::Display for ChoiceValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChoiceValue::Preset(value) => f.write_str(value),
            ChoiceValue::Custom(text) => write!(f, "{CUSTOM_PREFIX}{text}"),
        }
    }
}

/// Answers collected so far, keyed by question id.
///
/// An absent key (or a JSON `null` on input) means the question is unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "BTreeMap<String, Option<AnswerValue>>")]
pub struct AnswerMap {
    values: BTreeMap<String, AnswerValue>,
}

impl From<BTreeMap<String, Option<AnswerValue>>> for AnswerMap {
    fn from(raw: BTreeMap<String, Option<AnswerValue>>) -> Self {
        Self {
            values: raw
                .into_iter()
                .filter_map(|(key, value)| value.map(|value| (key, value)))
                .collect(),
        }
    }
}

impl Serialize for AnswerMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.values.serialize(serializer)
    }
}

impl<K: Into<String>> FromIterator<(K, AnswerValue)> for AnswerMap {
    fn from_iter<T: IntoIterator<Item = (K, AnswerValue)>>(iter: T) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        }
    }
}

impl AnswerMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&AnswerValue> {
        self.values.get(id)
    }

    pub fn insert(&mut self, id: impl Into<String>, value: AnswerValue) -> Option<AnswerValue> {
        self.values.insert(id.into(), value)
    }

    pub fn remove(&mut self, id: &str) -> Option<AnswerValue> {
        self.values.remove(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.values.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnswerValue)> {
        self.values.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn text(&self, id: &str) -> Option<&str> {
        match self.values.get(id) {
            Some(AnswerValue::Text(text)) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn choice(&self, id: &str) -> Option<ChoiceValue<'_>> {
        self.text(id).map(ChoiceValue::parse)
    }

    /// Selected values, empty when unset or not a selection.
    pub fn selection(&self, id: &str) -> &[String] {
        match self.values.get(id) {
            Some(AnswerValue::Selection(values)) => values,
            _ => &[],
        }
    }

    pub fn counts(&self, id: &str) -> Option<&BTreeMap<String, u32>> {
        match self.values.get(id) {
            Some(AnswerValue::Counts(counts)) => Some(counts),
            _ => None,
        }
    }

    pub fn flag(&self, id: &str) -> Option<bool> {
        match self.values.get(id) {
            Some(AnswerValue::Flag(flag)) => Some(*flag),
            _ => None,
        }
    }

    /// Adds or removes one value of a multi-select answer, keeping selection order.
    pub fn toggle(&mut self, id: &str, value: &str) {
        let entry = self
            .values
            .entry(id.to_string())
            .or_insert_with(|| AnswerValue::Selection(Vec::new()));
        if !matches!(entry, AnswerValue::Selection(_)) {
            *entry = AnswerValue::Selection(Vec::new());
        }
        if let AnswerValue::Selection(values) = entry {
            if let Some(index) = values.iter().position(|existing| existing == value) {
                values.remove(index);
            } else {
                values.push(value.to_string());
            }
        }
    }

    /// Sets one counter of a counter-group answer.
    pub fn set_count(&mut self, id: &str, option: &str, count: u32) {
        let entry = self
            .values
            .entry(id.to_string())
            .or_insert_with(|| AnswerValue::Counts(BTreeMap::new()));
        if !matches!(entry, AnswerValue::Counts(_)) {
            *entry = AnswerValue::Counts(BTreeMap::new());
        }
        if let AnswerValue::Counts(counts) = entry {
            counts.insert(option.to_string(), count);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nulls_are_dropped_on_load() {
        let answers: AnswerMap = serde_json::from_value(json!({
            "has_pets": null,
            "frequency": "weekly",
            "services": ["regular_home"],
            "residential_areas": { "kitchen": 1 }
        }))
        .unwrap();
        assert!(!answers.contains("has_pets"));
        assert_eq!(answers.text("frequency"), Some("weekly"));
        assert_eq!(answers.selection("services"), ["regular_home".to_string()]);
        assert_eq!(answers.counts("residential_areas").unwrap()["kitchen"], 1);
    }

    #[test]
    fn toggle_preserves_selection_order() {
        let mut answers = AnswerMap::new();
        answers.toggle("extra_services", "oven");
        answers.toggle("extra_services", "ironing");
        answers.toggle("extra_services", "windows");
        answers.toggle("extra_services", "oven");
        assert_eq!(
            answers.selection("extra_services"),
            ["ironing".to_string(), "windows".to_string()]
        );
    }

    #[test]
    fn custom_sentinel_parses_into_tagged_view() {
        assert_eq!(
            ChoiceValue::parse("custom:boathouse"),
            ChoiceValue::Custom("boathouse")
        );
        assert_eq!(ChoiceValue::parse("house"), ChoiceValue::Preset("house"));
        assert_eq!(ChoiceValue::custom_answer("loft"), "custom:loft");
    }
}
