use thiserror::Error;

/// Defects in a master question list, detected once at construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("form '{form_id}' defines no questions")]
    Empty { form_id: String },
    #[error("question '{id}' is defined more than once")]
    DuplicateQuestion { id: String },
    #[error("question '{id}' depends on unknown question '{depends_on}'")]
    UnknownDependency { id: String, depends_on: String },
    #[error("question '{id}' depends on later question '{depends_on}'")]
    ForwardDependency { id: String, depends_on: String },
    #[error("question '{id}' depends on itself")]
    SelfDependency { id: String },
    #[error("question '{id}' of type {kind} has no options")]
    MissingOptions { id: String, kind: &'static str },
    #[error("question '{id}' has an empty any_of visibility set")]
    EmptyMatchSet { id: String },
}

/// A single answer that does not fit its question.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnswerError {
    #[error("unknown question '{id}'")]
    UnknownQuestion { id: String },
    #[error("question '{id}' expects a {expected} answer, got {actual}")]
    KindMismatch {
        id: String,
        expected: &'static str,
        actual: &'static str,
    },
    #[error("question '{id}' has no option '{value}'")]
    UnknownOption { id: String, value: String },
    #[error("question '{id}' does not accept custom entries")]
    CustomNotAllowed { id: String },
}

/// Price table values that make no sense as configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceTableError {
    #[error("price for {table} '{id}' is negative")]
    NegativePrice { table: &'static str, id: String },
    #[error("discount rate for frequency '{frequency}' is outside 0..=1")]
    DiscountOutOfRange { frequency: String },
    #[error("{name} unit rate is negative")]
    NegativeUnitRate { name: &'static str },
}

/// Errors raised by a wizard session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Form(#[from] FormError),
    #[error(transparent)]
    Answer(#[from] AnswerError),
    #[error("question '{id}' is not part of the active question list")]
    InactiveQuestion { id: String },
    #[error("questions can only be edited from the summary")]
    NotAtSummary,
    #[error("wizard is not complete")]
    Incomplete,
    #[error("answers failed validation: {0}")]
    Invalid(String),
}
