use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Supported input widgets for a quote question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    Text,
    SingleSelect,
    MultiSelect,
    CounterGroup,
    Boolean,
}

impl InputKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputKind::Text => "text",
            InputKind::SingleSelect => "single_select",
            InputKind::MultiSelect => "multi_select",
            InputKind::CounterGroup => "counter_group",
            InputKind::Boolean => "boolean",
        }
    }

    /// Whether questions of this kind must carry an option set.
    pub fn uses_options(&self) -> bool {
        matches!(
            self,
            InputKind::SingleSelect | InputKind::MultiSelect | InputKind::CounterGroup
        )
    }
}

/// A selectable `(value, label)` pair, optionally grouping nested sub-options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_options: Vec<ChoiceOption>,
    /// Accepts a free-text `custom:` entry in place of a listed sub-option.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub allow_custom: bool,
}

impl ChoiceOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            sub_options: Vec::new(),
            allow_custom: false,
        }
    }

    pub fn with_sub_options(mut self, sub_options: Vec<ChoiceOption>) -> Self {
        self.sub_options = sub_options;
        self
    }

    pub fn allowing_custom(mut self) -> Self {
        self.allow_custom = true;
        self
    }
}

/// How the dependency answer is compared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MatchRule {
    Equals(String),
    AnyOf(Vec<String>),
}

impl MatchRule {
    pub fn accepts(&self, candidate: &str) -> bool {
        match self {
            MatchRule::Equals(expected) => expected == candidate,
            MatchRule::AnyOf(expected) => expected.iter().any(|value| value == candidate),
        }
    }

    pub fn values(&self) -> &[String] {
        match self {
            MatchRule::Equals(expected) => std::slice::from_ref(expected),
            MatchRule::AnyOf(expected) => expected,
        }
    }
}

/// Conditional visibility keyed on an earlier question's answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VisibilityRule {
    pub depends_on: String,
    #[serde(flatten)]
    pub matcher: MatchRule,
}

impl VisibilityRule {
    pub fn equals(depends_on: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            depends_on: depends_on.into(),
            matcher: MatchRule::Equals(value.into()),
        }
    }

    pub fn any_of<I, S>(depends_on: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            depends_on: depends_on.into(),
            matcher: MatchRule::AnyOf(values.into_iter().map(Into::into).collect()),
        }
    }
}

/// Definition of a single question inside the quote form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct QuestionSpec {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: InputKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ChoiceOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible_if: Option<VisibilityRule>,
}

impl QuestionSpec {
    pub fn new(id: impl Into<String>, kind: InputKind, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            title: title.into(),
            description: None,
            required: false,
            options: Vec::new(),
            visible_if: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_options(mut self, options: Vec<ChoiceOption>) -> Self {
        self.options = options;
        self
    }

    pub fn visible_if(mut self, rule: VisibilityRule) -> Self {
        self.visible_if = Some(rule);
        self
    }

    /// Every selectable value, sub-options included, in display order.
    pub fn option_values(&self) -> Vec<&str> {
        fn collect<'a>(options: &'a [ChoiceOption], out: &mut Vec<&'a str>) {
            for option in options {
                out.push(option.value.as_str());
                collect(&option.sub_options, out);
            }
        }
        let mut out = Vec::new();
        collect(&self.options, &mut out);
        out
    }

    pub fn has_option(&self, value: &str) -> bool {
        self.option_values().contains(&value)
    }

    pub fn accepts_custom(&self) -> bool {
        fn any_custom(options: &[ChoiceOption]) -> bool {
            options
                .iter()
                .any(|option| option.allow_custom || any_custom(&option.sub_options))
        }
        any_custom(&self.options)
    }

    /// Label for an option value, searching nested groups.
    pub fn option_label(&self, value: &str) -> Option<&str> {
        fn find<'a>(options: &'a [ChoiceOption], value: &str) -> Option<&'a str> {
            options.iter().find_map(|option| {
                if option.value == value {
                    Some(option.label.as_str())
                } else {
                    find(&option.sub_options, value)
                }
            })
        }
        find(&self.options, value)
    }
}
