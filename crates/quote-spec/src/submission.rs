use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::answers::AnswerMap;
use crate::pricing::EstimateSummary;
use crate::spec::form::QuoteForm;

/// Completed wizard output handed to checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSubmission {
    pub form_id: String,
    pub form_version: String,
    pub answers: AnswerMap,
    pub estimate: EstimateSummary,
    #[serde(with = "time::serde::rfc3339")]
    pub submitted_at: OffsetDateTime,
}

impl QuoteSubmission {
    pub fn new(form: &QuoteForm, answers: AnswerMap, estimate: EstimateSummary) -> Self {
        Self::at(form, answers, estimate, OffsetDateTime::now_utc())
    }

    pub fn at(
        form: &QuoteForm,
        answers: AnswerMap,
        estimate: EstimateSummary,
        submitted_at: OffsetDateTime,
    ) -> Self {
        Self {
            form_id: form.id.clone(),
            form_version: form.version.clone(),
            answers,
            estimate,
            submitted_at,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
