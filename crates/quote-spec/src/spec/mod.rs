pub mod form;
pub mod question;

pub use form::QuoteForm;
pub use question::{ChoiceOption, InputKind, MatchRule, QuestionSpec, VisibilityRule};
