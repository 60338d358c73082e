use serde_json::{Map, Value, json};

use crate::answers::AnswerValue;
use crate::pricing::{EstimateSummary, LineCategory, PriceTable};
use crate::progress::{Progress, Step, is_answered};
use crate::session::WizardSession;
use crate::spec::question::{ChoiceOption, InputKind, QuestionSpec};

/// Status labels returned by the renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStatus {
    /// The current question is waiting for input.
    NeedInput,
    /// The summary view is showing.
    Complete,
}

impl RenderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderStatus::NeedInput => "need_input",
            RenderStatus::Complete => "complete",
        }
    }
}

/// An option flattened for display; `number` is the 1-based pick index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOption {
    pub number: usize,
    pub value: String,
    pub label: String,
    pub depth: usize,
    pub allow_custom: bool,
}

/// Flattens nested option groups into numbered display rows.
pub fn flatten_options(question: &QuestionSpec) -> Vec<RenderOption> {
    fn walk(options: &[ChoiceOption], depth: usize, out: &mut Vec<RenderOption>) {
        for option in options {
            out.push(RenderOption {
                number: out.len() + 1,
                value: option.value.clone(),
                label: option.label.clone(),
                depth,
                allow_custom: option.allow_custom,
            });
            walk(&option.sub_options, depth + 1, out);
        }
    }
    let mut out = Vec::new();
    walk(&question.options, 0, &mut out);
    out
}

#[derive(Debug, Clone)]
pub struct RenderQuestion {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub kind: InputKind,
    pub required: bool,
    pub answered: bool,
    pub current_value: Option<AnswerValue>,
    pub options: Vec<RenderOption>,
}

/// Everything a front-end needs to draw the current wizard state.
#[derive(Debug, Clone)]
pub struct RenderPayload {
    pub form_id: String,
    pub form_title: String,
    pub form_version: String,
    pub status: RenderStatus,
    pub step: Step,
    pub current_question_id: Option<String>,
    pub can_advance: bool,
    pub progress: Progress,
    pub help: Option<String>,
    /// Active questions only, in master order.
    pub questions: Vec<RenderQuestion>,
    pub estimate: Option<EstimateSummary>,
}

impl RenderPayload {
    pub fn current_question(&self) -> Option<&RenderQuestion> {
        let id = self.current_question_id.as_deref()?;
        self.questions.iter().find(|question| question.id == id)
    }
}

pub fn build_render_payload(session: &WizardSession, prices: Option<&PriceTable>) -> RenderPayload {
    let answers = session.answers();
    let form = session.form();
    let questions = session
        .active_questions()
        .into_iter()
        .map(|question| RenderQuestion {
            id: question.id.clone(),
            title: question.title.clone(),
            description: question.description.clone(),
            kind: question.kind,
            required: question.required,
            answered: answers.contains(&question.id) && is_answered(question, answers),
            current_value: answers.get(&question.id).cloned(),
            options: flatten_options(question),
        })
        .collect::<Vec<_>>();

    let status = if session.is_complete() {
        RenderStatus::Complete
    } else {
        RenderStatus::NeedInput
    };

    RenderPayload {
        form_id: form.id.clone(),
        form_title: form.title.clone(),
        form_version: form.version.clone(),
        status,
        step: session.step(),
        current_question_id: session.current_question().map(|question| question.id.clone()),
        can_advance: session.can_advance(),
        progress: session.progress(),
        help: form.description.clone(),
        questions,
        estimate: prices.map(|prices| session.estimate(prices).summary()),
    }
}

/// Render the payload as a structured JSON value.
pub fn render_json_ui(payload: &RenderPayload) -> Value {
    let questions = payload
        .questions
        .iter()
        .map(|question| {
            let mut map = Map::new();
            map.insert("id".into(), Value::String(question.id.clone()));
            map.insert("title".into(), Value::String(question.title.clone()));
            map.insert(
                "description".into(),
                question
                    .description
                    .clone()
                    .map(Value::String)
                    .unwrap_or(Value::Null),
            );
            map.insert("type".into(), Value::String(question.kind.as_str().into()));
            map.insert("required".into(), Value::Bool(question.required));
            map.insert("answered".into(), Value::Bool(question.answered));
            if let Some(value) = &question.current_value
                && let Ok(value) = serde_json::to_value(value)
            {
                map.insert("current_value".into(), value);
            }
            if !question.options.is_empty() {
                let options = question
                    .options
                    .iter()
                    .map(|option| {
                        json!({
                            "value": option.value,
                            "label": option.label,
                            "depth": option.depth,
                            "allow_custom": option.allow_custom,
                        })
                    })
                    .collect::<Vec<_>>();
                map.insert("options".into(), Value::Array(options));
            }
            Value::Object(map)
        })
        .collect::<Vec<_>>();

    json!({
        "form_id": payload.form_id,
        "form_title": payload.form_title,
        "form_version": payload.form_version,
        "status": payload.status.as_str(),
        "step": payload.step,
        "current_question_id": payload.current_question_id,
        "can_advance": payload.can_advance,
        "progress": {
            "position": payload.progress.position,
            "answered": payload.progress.answered,
            "total": payload.progress.total,
            "percent": payload.progress.percent(),
        },
        "help": payload.help,
        "questions": questions,
        "estimate": payload.estimate,
    })
}

/// Render the payload as human-friendly text.
pub fn render_text(payload: &RenderPayload) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "{} ({}/{} answered)",
        payload.form_title, payload.progress.answered, payload.progress.total
    ));

    match payload.current_question() {
        Some(question) => {
            lines.push(format!(
                "Question {} of {}: {}",
                payload.progress.position, payload.progress.total, question.title
            ));
            if let Some(description) = &question.description {
                lines.push(format!("  {}", description));
            }
            if question.required {
                lines.push("  Required: yes".to_string());
            }
            for option in &question.options {
                let indent = "  ".repeat(option.depth + 1);
                let mut entry = format!("{indent}{}) {} [{}]", option.number, option.label, option.value);
                if option.allow_custom {
                    entry.push_str(" (or custom:<text>)");
                }
                lines.push(entry);
            }
            if let Some(value) = &question.current_value {
                lines.push(format!("  Current value: {}", value));
            }
            lines.push(format!("  {}", input_hint(question.kind)));
        }
        None => {
            lines.push("Summary:".to_string());
            for question in &payload.questions {
                let value = question
                    .current_value
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| "-".to_string());
                lines.push(format!(" - {} [{}]: {}", question.title, question.id, value));
            }
        }
    }

    if let Some(estimate) = &payload.estimate {
        lines.push("Estimate:".to_string());
        for item in &estimate.line_items {
            lines.push(format!(
                "  {} {} x{} @ {} = {}",
                category_label(item.category),
                item.id,
                item.quantity,
                item.unit_price,
                item.amount
            ));
        }
        lines.push(format!("  Subtotal: {}", estimate.subtotal));
        if !estimate.discount.is_zero() {
            lines.push(format!(
                "  Frequency discount ({}%): -{}",
                (estimate.discount_rate * rust_decimal::Decimal::ONE_HUNDRED).normalize(),
                estimate.discount
            ));
        }
        lines.push(format!("  Total: {}", estimate.total));
    }

    lines.join("\n")
}

fn input_hint(kind: InputKind) -> &'static str {
    match kind {
        InputKind::Text => "Type your answer.",
        InputKind::SingleSelect => "Pick one option by number or value.",
        InputKind::MultiSelect => "Pick options separated by commas.",
        InputKind::CounterGroup => "Enter counts as value=count separated by commas.",
        InputKind::Boolean => "Answer yes or no.",
    }
}

fn category_label(category: LineCategory) -> &'static str {
    match category {
        LineCategory::Service => "service",
        LineCategory::ResidentialArea => "room",
        LineCategory::CommercialArea => "area",
        LineCategory::ExtraService => "extra",
    }
}
