use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::answers::{AnswerMap, AnswerValue, ChoiceValue};
use crate::error::AnswerError;
use crate::progress::is_answered;
use crate::spec::form::QuoteForm;
use crate::spec::question::{InputKind, QuestionSpec};
use crate::visibility::active_questions;

/// One problem found in the collected answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub question_id: String,
    pub message: String,
    pub code: String,
}

/// Result of checking a complete answer map before handoff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ValidationIssue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_required: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unknown_fields: Vec<String>,
}

impl ValidationReport {
    /// Flattened one-line-per-problem description.
    pub fn messages(&self) -> Vec<String> {
        let mut out = self
            .errors
            .iter()
            .map(|issue| format!("{}: {}", issue.question_id, issue.message))
            .collect::<Vec<_>>();
        out.extend(
            self.missing_required
                .iter()
                .map(|id| format!("missing required: {id}")),
        );
        out.extend(
            self.unknown_fields
                .iter()
                .map(|id| format!("unknown field: {id}")),
        );
        out
    }
}

/// Shape-checks a single answer against its question.
pub fn check_answer(question: &QuestionSpec, value: &AnswerValue) -> Result<(), AnswerError> {
    let mismatch = |expected: &'static str| AnswerError::KindMismatch {
        id: question.id.clone(),
        expected,
        actual: value.shape(),
    };
    let unknown = |option: &str| AnswerError::UnknownOption {
        id: question.id.clone(),
        value: option.to_string(),
    };

    match (question.kind, value) {
        (InputKind::Text, AnswerValue::Text(_)) => Ok(()),
        (InputKind::SingleSelect, AnswerValue::Text(text)) => match ChoiceValue::parse(text) {
            ChoiceValue::Custom(_) if question.accepts_custom() => Ok(()),
            ChoiceValue::Custom(_) => Err(AnswerError::CustomNotAllowed {
                id: question.id.clone(),
            }),
            ChoiceValue::Preset(preset) if question.has_option(preset) => Ok(()),
            ChoiceValue::Preset(preset) => Err(unknown(preset)),
        },
        (InputKind::MultiSelect, AnswerValue::Selection(values)) => {
            match values.iter().find(|value| !question.has_option(value)) {
                Some(value) => Err(unknown(value)),
                None => Ok(()),
            }
        }
        (InputKind::CounterGroup, AnswerValue::Counts(counts)) => {
            match counts.keys().find(|key| !question.has_option(key)) {
                Some(key) => Err(unknown(key)),
                None => Ok(()),
            }
        }
        (InputKind::Boolean, AnswerValue::Flag(_)) => Ok(()),
        (InputKind::Text | InputKind::SingleSelect, _) => Err(mismatch("string")),
        (InputKind::MultiSelect, _) => Err(mismatch("list")),
        (InputKind::CounterGroup, _) => Err(mismatch("counter map")),
        (InputKind::Boolean, _) => Err(mismatch("boolean")),
    }
}

/// Checks every active question; answers to hidden questions are kept but not checked.
pub fn validate_answers(form: &QuoteForm, answers: &AnswerMap) -> ValidationReport {
    let mut errors = Vec::new();
    let mut missing_required = Vec::new();

    for question in active_questions(form, answers) {
        if let Some(value) = answers.get(&question.id)
            && let Err(err) = check_answer(question, value)
        {
            errors.push(ValidationIssue {
                question_id: question.id.clone(),
                message: err.to_string(),
                code: issue_code(&err).to_string(),
            });
            continue;
        }
        if !is_answered(question, answers) {
            missing_required.push(question.id.clone());
        }
    }

    let known: BTreeSet<&str> = form
        .questions
        .iter()
        .map(|question| question.id.as_str())
        .collect();
    let unknown_fields = answers
        .iter()
        .map(|(key, _)| key)
        .filter(|key| !known.contains(key))
        .map(str::to_string)
        .collect::<Vec<_>>();

    ValidationReport {
        valid: errors.is_empty() && missing_required.is_empty() && unknown_fields.is_empty(),
        errors,
        missing_required,
        unknown_fields,
    }
}

fn issue_code(err: &AnswerError) -> &'static str {
    match err {
        AnswerError::UnknownQuestion { .. } => "unknown_question",
        AnswerError::KindMismatch { .. } => "type_mismatch",
        AnswerError::UnknownOption { .. } => "unknown_option",
        AnswerError::CustomNotAllowed { .. } => "custom_not_allowed",
    }
}
