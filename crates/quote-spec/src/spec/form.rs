use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::FormError;
use crate::spec::question::{MatchRule, QuestionSpec};

/// Master ordered question list for the quote wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct QuoteForm {
    pub id: String,
    pub title: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub questions: Vec<QuestionSpec>,
}

impl QuoteForm {
    pub fn question(&self, id: &str) -> Option<&QuestionSpec> {
        self.questions.iter().find(|question| question.id == id)
    }

    /// Fixed position of a question in the master list.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.questions.iter().position(|question| question.id == id)
    }

    /// One-time structural check of the master list.
    ///
    /// Dependencies may only point backwards, so rejecting forward and self
    /// references also rules out cycles.
    pub fn validate_structure(&self) -> Result<(), FormError> {
        if self.questions.is_empty() {
            return Err(FormError::Empty {
                form_id: self.id.clone(),
            });
        }

        let mut positions: BTreeMap<&str, usize> = BTreeMap::new();
        for (index, question) in self.questions.iter().enumerate() {
            if positions.insert(question.id.as_str(), index).is_some() {
                return Err(FormError::DuplicateQuestion {
                    id: question.id.clone(),
                });
            }
        }

        for (index, question) in self.questions.iter().enumerate() {
            if question.kind.uses_options() && question.options.is_empty() {
                return Err(FormError::MissingOptions {
                    id: question.id.clone(),
                    kind: question.kind.as_str(),
                });
            }

            let Some(rule) = &question.visible_if else {
                continue;
            };
            if let MatchRule::AnyOf(values) = &rule.matcher
                && values.is_empty()
            {
                return Err(FormError::EmptyMatchSet {
                    id: question.id.clone(),
                });
            }
            match positions.get(rule.depends_on.as_str()) {
                None => {
                    return Err(FormError::UnknownDependency {
                        id: question.id.clone(),
                        depends_on: rule.depends_on.clone(),
                    });
                }
                Some(&dependency) if dependency == index => {
                    return Err(FormError::SelfDependency {
                        id: question.id.clone(),
                    });
                }
                Some(&dependency) if dependency > index => {
                    return Err(FormError::ForwardDependency {
                        id: question.id.clone(),
                        depends_on: rule.depends_on.clone(),
                    });
                }
                Some(&dependency) => {
                    let target = &self.questions[dependency];
                    if target.kind.uses_options() {
                        for value in rule.matcher.values() {
                            if !target.has_option(value) {
                                tracing::warn!(
                                    question = %question.id,
                                    depends_on = %target.id,
                                    value = %value,
                                    "visibility rule matches a value the dependency never offers"
                                );
                            }
                        }
                    }
                }
            }
        }

        Ok(())
    }
}
