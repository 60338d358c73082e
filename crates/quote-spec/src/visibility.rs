use std::collections::BTreeMap;

use crate::answers::{AnswerMap, AnswerValue};
use crate::spec::form::QuoteForm;
use crate::spec::question::{QuestionSpec, VisibilityRule};

pub type VisibilityMap = BTreeMap<String, bool>;

/// Whether a question belongs to the active set for these answers.
///
/// A missing dependency answer never matches.
pub fn is_visible(question: &QuestionSpec, answers: &AnswerMap) -> bool {
    match &question.visible_if {
        None => true,
        Some(rule) => rule_matches(rule, answers),
    }
}

fn rule_matches(rule: &VisibilityRule, answers: &AnswerMap) -> bool {
    match answers.get(&rule.depends_on) {
        None => false,
        Some(AnswerValue::Text(text)) => rule.matcher.accepts(text),
        Some(AnswerValue::Flag(flag)) => rule.matcher.accepts(if *flag { "true" } else { "false" }),
        Some(AnswerValue::Selection(values)) => {
            values.iter().any(|value| rule.matcher.accepts(value))
        }
        Some(AnswerValue::Counts(_)) => false,
    }
}

/// Filters the master list down to the applicable questions, keeping master order.
pub fn active_questions<'a>(form: &'a QuoteForm, answers: &AnswerMap) -> Vec<&'a QuestionSpec> {
    form.questions
        .iter()
        .filter(|question| is_visible(question, answers))
        .collect()
}

/// The answers that belong to active questions; hidden and unknown keys are left out.
pub fn visible_answers(form: &QuoteForm, answers: &AnswerMap) -> AnswerMap {
    active_questions(form, answers)
        .into_iter()
        .filter_map(|question| {
            answers
                .get(&question.id)
                .map(|value| (question.id.clone(), value.clone()))
        })
        .collect()
}

pub fn resolve_visibility(form: &QuoteForm, answers: &AnswerMap) -> VisibilityMap {
    form.questions
        .iter()
        .map(|question| (question.id.clone(), is_visible(question, answers)))
        .collect()
}
