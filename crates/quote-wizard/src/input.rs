use std::collections::BTreeMap;

use anyhow::{Context, Result, anyhow, bail};
use quote_spec::{AnswerValue, CUSTOM_PREFIX, InputKind, QuestionSpec, flatten_options};

/// Parses one line of terminal input into an answer for `question`.
///
/// Options may be picked by number, value, or label.
pub fn parse_input(question: &QuestionSpec, raw: &str) -> Result<AnswerValue> {
    let raw = raw.trim();
    match question.kind {
        InputKind::Text => Ok(AnswerValue::text(raw)),
        InputKind::SingleSelect => {
            if raw.starts_with(CUSTOM_PREFIX) {
                return Ok(AnswerValue::text(raw));
            }
            resolve_option(question, raw).map(AnswerValue::Text)
        }
        InputKind::MultiSelect => {
            let values = split_list(raw)
                .map(|entry| resolve_option(question, entry))
                .collect::<Result<Vec<_>>>()?;
            Ok(AnswerValue::selection(values))
        }
        InputKind::CounterGroup => {
            let mut counts = BTreeMap::new();
            for entry in split_list(raw) {
                let (key, count) = entry
                    .split_once('=')
                    .ok_or_else(|| anyhow!("expected value=count, got '{entry}'"))?;
                let count = count
                    .trim()
                    .parse::<u32>()
                    .with_context(|| format!("count for '{}' must be a whole number", key.trim()))?;
                counts.insert(resolve_option(question, key.trim())?, count);
            }
            Ok(AnswerValue::Counts(counts))
        }
        InputKind::Boolean => match raw.to_ascii_lowercase().as_str() {
            "y" | "yes" | "true" | "1" => Ok(AnswerValue::Flag(true)),
            "n" | "no" | "false" | "0" => Ok(AnswerValue::Flag(false)),
            _ => bail!("answer yes or no"),
        },
    }
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|entry| !entry.is_empty())
}

fn resolve_option(question: &QuestionSpec, entry: &str) -> Result<String> {
    let options = flatten_options(question);
    if let Ok(number) = entry.parse::<usize>() {
        return options
            .iter()
            .find(|option| option.number == number)
            .map(|option| option.value.clone())
            .ok_or_else(|| anyhow!("no option numbered {number}"));
    }
    options
        .iter()
        .find(|option| option.value == entry || option.label.eq_ignore_ascii_case(entry))
        .map(|option| option.value.clone())
        .ok_or_else(|| anyhow!("'{entry}' is not one of the options"))
}
