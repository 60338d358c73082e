use crate::answers::{AnswerMap, AnswerValue};
use crate::error::{AnswerError, FormError, SessionError};
use crate::pricing::{PriceTable, PricingContext, estimate};
use crate::progress::{self, Progress, QuestionFlow, Step};
use crate::spec::form::QuoteForm;
use crate::spec::question::QuestionSpec;
use crate::submission::QuoteSubmission;
use crate::validate::{ValidationReport, check_answer, validate_answers};
use crate::visibility::visible_answers;

/// One visitor's pass through the wizard: the flow, its answers, and the cursor.
#[derive(Debug, Clone)]
pub struct WizardSession {
    flow: QuestionFlow,
    answers: AnswerMap,
    step: Step,
}

impl WizardSession {
    pub fn new(form: QuoteForm) -> Result<Self, FormError> {
        Self::resume(form, AnswerMap::new())
    }

    /// Reopens the wizard with answers from an earlier session.
    pub fn resume(form: QuoteForm, answers: AnswerMap) -> Result<Self, FormError> {
        let flow = QuestionFlow::new(form)?;
        let step = flow.initial_step(&answers);
        Ok(Self {
            flow,
            answers,
            step,
        })
    }

    pub fn form(&self) -> &QuoteForm {
        self.flow.form()
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn is_complete(&self) -> bool {
        self.step.is_complete()
    }

    pub fn active_questions(&self) -> Vec<&QuestionSpec> {
        self.flow.active(&self.answers)
    }

    pub fn current_question(&self) -> Option<&QuestionSpec> {
        let index = self.step.index()?;
        self.active_questions().get(index).copied()
    }

    /// Stores one answer after checking it against its question.
    pub fn set_answer(&mut self, id: &str, value: AnswerValue) -> Result<(), SessionError> {
        let question = self
            .form()
            .question(id)
            .ok_or_else(|| AnswerError::UnknownQuestion { id: id.to_string() })?;
        check_answer(question, &value)?;
        let value = match value {
            AnswerValue::Selection(values) => AnswerValue::selection(values),
            other => other,
        };
        self.answers.insert(id, value);
        self.repair_cursor();
        Ok(())
    }

    pub fn clear_answer(&mut self, id: &str) -> Option<AnswerValue> {
        let previous = self.answers.remove(id);
        self.repair_cursor();
        previous
    }

    pub fn can_advance(&self) -> bool {
        match self.current_question() {
            Some(question) => progress::is_answered(question, &self.answers),
            None => false,
        }
    }

    pub fn advance(&mut self) -> Step {
        let next = {
            let active = self.active_questions();
            progress::advance(self.step, &active, &self.answers)
        };
        self.step = next;
        next
    }

    pub fn retreat(&mut self) -> Step {
        let len = self.active_questions().len();
        self.step = progress::retreat(self.step, len);
        self.step
    }

    /// Jumps from the summary view back to an active question.
    pub fn edit(&mut self, id: &str) -> Result<Step, SessionError> {
        if !self.step.is_complete() {
            return Err(SessionError::NotAtSummary);
        }
        let target = {
            let active = self.active_questions();
            progress::jump_to(id, &active)
        };
        let step = target.ok_or_else(|| SessionError::InactiveQuestion { id: id.to_string() })?;
        self.step = step;
        Ok(step)
    }

    pub fn progress(&self) -> Progress {
        self.flow.progress(self.step, &self.answers)
    }

    /// Prices the answers to active questions; hidden answers are kept but not charged.
    pub fn estimate(&self, prices: &PriceTable) -> PricingContext {
        estimate(&visible_answers(self.form(), &self.answers), prices)
    }

    pub fn validate(&self) -> ValidationReport {
        validate_answers(self.form(), &self.answers)
    }

    /// Hands the whole answer map off once the summary has been reached.
    pub fn finish(&self, prices: &PriceTable) -> Result<QuoteSubmission, SessionError> {
        if !self.is_complete() {
            return Err(SessionError::Incomplete);
        }
        let report = self.validate();
        if !report.valid {
            return Err(SessionError::Invalid(report.messages().join("; ")));
        }
        Ok(QuoteSubmission::new(
            self.form(),
            self.answers.clone(),
            self.estimate(prices).summary(),
        ))
    }

    fn repair_cursor(&mut self) {
        let len = self.active_questions().len();
        let repaired = self.step.clamp(len);
        if repaired != self.step {
            tracing::debug!(from = ?self.step, to = ?repaired, "active list shrank; moving cursor");
            self.step = repaired;
        }
    }
}
