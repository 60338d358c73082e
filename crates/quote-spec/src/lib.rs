#![allow(missing_docs)]

pub mod answers;
pub mod catalog;
pub mod error;
pub mod pricing;
pub mod progress;
pub mod render;
pub mod session;
pub mod spec;
pub mod submission;
pub mod validate;
pub mod visibility;

pub use answers::{AnswerMap, AnswerValue, CUSTOM_PREFIX, ChoiceValue};
pub use catalog::cleaning_quote_form;
pub use error::{AnswerError, FormError, PriceTableError, SessionError};
pub use pricing::{EstimateSummary, LineCategory, LineItem, PriceTable, PricingContext, estimate};
pub use progress::{Progress, QuestionFlow, Step, advance, is_answered, jump_to, retreat};
pub use render::{
    RenderOption, RenderPayload, RenderQuestion, RenderStatus, build_render_payload, flatten_options,
    render_json_ui, render_text,
};
pub use session::WizardSession;
pub use spec::{ChoiceOption, InputKind, MatchRule, QuestionSpec, QuoteForm, VisibilityRule};
pub use submission::QuoteSubmission;
pub use validate::{ValidationIssue, ValidationReport, check_answer, validate_answers};
pub use visibility::{
    VisibilityMap, active_questions, is_visible, resolve_visibility, visible_answers,
};
