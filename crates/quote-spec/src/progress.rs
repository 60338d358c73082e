use serde::{Deserialize, Serialize};

use crate::answers::{AnswerMap, AnswerValue, ChoiceValue};
use crate::error::FormError;
use crate::spec::form::QuoteForm;
use crate::spec::question::{InputKind, QuestionSpec};
use crate::visibility::active_questions;

/// Cursor into the active question list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "index", rename_all = "snake_case")]
pub enum Step {
    Question(usize),
    /// Summary view after the last active question.
    Complete,
}

impl Step {
    pub fn index(&self) -> Option<usize> {
        match self {
            Step::Question(index) => Some(*index),
            Step::Complete => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Step::Complete)
    }

    /// Pulls a question cursor back inside an active list of `len` entries.
    pub fn clamp(self, len: usize) -> Step {
        match self {
            Step::Question(_) if len == 0 => Step::Complete,
            Step::Question(index) if index >= len => Step::Question(len - 1),
            other => other,
        }
    }
}

/// Progress indicator counters over the active list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// 1-based position of the current question, equal to `total` once complete.
    pub position: usize,
    pub answered: usize,
    pub total: usize,
}

impl Progress {
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        ((self.answered * 100) / self.total) as u8
    }
}

/// Whether a question's answer is sufficient to move past it.
pub fn is_answered(question: &QuestionSpec, answers: &AnswerMap) -> bool {
    if !question.required {
        return true;
    }
    let Some(value) = answers.get(&question.id) else {
        return false;
    };
    match (question.kind, value) {
        (InputKind::CounterGroup, AnswerValue::Counts(counts)) => {
            counts.values().any(|count| *count > 0)
        }
        (InputKind::MultiSelect, AnswerValue::Selection(values)) => !values.is_empty(),
        (InputKind::Boolean, AnswerValue::Flag(_)) => true,
        (InputKind::SingleSelect, AnswerValue::Text(text)) => match ChoiceValue::parse(text) {
            ChoiceValue::Custom(custom) => !custom.is_empty(),
            ChoiceValue::Preset(preset) => !preset.is_empty(),
        },
        (InputKind::Text, AnswerValue::Text(text)) => !text.is_empty(),
        _ => false,
    }
}

/// Moves forward when the current question is answered.
///
/// An unanswered current question leaves the step unchanged.
pub fn advance(step: Step, active: &[&QuestionSpec], answers: &AnswerMap) -> Step {
    let Step::Question(index) = step.clamp(active.len()) else {
        return Step::Complete;
    };
    if !is_answered(active[index], answers) {
        return Step::Question(index);
    }
    if index + 1 >= active.len() {
        Step::Complete
    } else {
        Step::Question(index + 1)
    }
}

/// Moves back one question; the first question has no predecessor.
pub fn retreat(step: Step, active_len: usize) -> Step {
    match step {
        Step::Complete if active_len == 0 => Step::Complete,
        Step::Complete => Step::Question(active_len - 1),
        Step::Question(0) => Step::Question(0).clamp(active_len),
        Step::Question(index) => Step::Question(index - 1).clamp(active_len),
    }
}

/// Step that edits `question_id`, if it is currently active.
///
/// Only valid from `Step::Complete`; `WizardSession::edit` enforces that.
pub fn jump_to(question_id: &str, active: &[&QuestionSpec]) -> Option<Step> {
    active
        .iter()
        .position(|question| question.id == question_id)
        .map(Step::Question)
}

/// A validated master list ready to drive the wizard.
#[derive(Debug, Clone)]
pub struct QuestionFlow {
    form: QuoteForm,
}

impl QuestionFlow {
    pub fn new(form: QuoteForm) -> Result<Self, FormError> {
        form.validate_structure()?;
        tracing::debug!(
            form = %form.id,
            questions = form.questions.len(),
            "question flow ready"
        );
        Ok(Self { form })
    }

    pub fn form(&self) -> &QuoteForm {
        &self.form
    }

    pub fn active<'a>(&'a self, answers: &AnswerMap) -> Vec<&'a QuestionSpec> {
        active_questions(&self.form, answers)
    }

    /// Starting step: complete when resuming answers that satisfy every active question.
    pub fn initial_step(&self, answers: &AnswerMap) -> Step {
        let active = self.active(answers);
        if answers.is_empty() {
            return Step::Question(0).clamp(active.len());
        }
        if active.iter().all(|question| is_answered(question, answers)) {
            Step::Complete
        } else {
            Step::Question(0)
        }
    }

    pub fn progress(&self, step: Step, answers: &AnswerMap) -> Progress {
        let active = self.active(answers);
        let answered = active
            .iter()
            .filter(|question| answers.contains(&question.id) && is_answered(question, answers))
            .count();
        let position = match step.clamp(active.len()) {
            Step::Question(index) => index + 1,
            Step::Complete => active.len(),
        };
        Progress {
            position,
            answered,
            total: active.len(),
        }
    }
}
