//! Declared constraints and native validity evaluation.

use chrono::NaiveDate;
use regex::RegexSet;
use serde::{Deserialize, Serialize};

use super::ValidityState;
use crate::error::FieldError;

/// Date format accepted by `date` inputs.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` date value.
///
/// The value must be exactly four year digits, two month digits and two day
/// digits separated by `-`. Signs, padding and short components are rejected.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let bytes = value.as_bytes();
    let shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shaped {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// The input type a field is declared with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    #[default]
    Text,
    Email,
    Password,
    Date,
    Number,
}

impl InputType {
    /// Returns `true` if the value survives sanitization for this type.
    ///
    /// A `date` that is not a calendar date and a `number` that is not a
    /// finite number are reduced to the empty string, like a browser does.
    fn accepts(&self, value: &str) -> bool {
        match self {
            InputType::Date => parse_date(value).is_some(),
            InputType::Number => value.parse::<f64>().is_ok_and(f64::is_finite),
            InputType::Text | InputType::Email | InputType::Password => true,
        }
    }
}

/// A value pattern made of one or more regular expressions.
///
/// Each expression must match the entire value. Multiple expressions are
/// combined with AND, which covers what lookahead-based HTML patterns express
/// (e.g. "contains a digit and an uppercase letter").
#[derive(Debug, Clone)]
pub struct Pattern {
    sources: Vec<String>,
    set: RegexSet,
}

impl Pattern {
    /// Compiles a single-expression pattern.
    pub fn new(source: impl Into<String>) -> Result<Self, FieldError> {
        Self::all([source.into()])
    }

    /// Compiles a pattern that matches when every expression matches.
    pub fn all<I, S>(sources: I) -> Result<Self, FieldError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sources: Vec<String> = sources.into_iter().map(Into::into).collect();
        let anchored = sources.iter().map(|s| format!("^(?:{s})$"));
        let set = RegexSet::new(anchored)
            .map_err(|e| FieldError::invalid_pattern(sources.join(" && "), &e))?;
        Ok(Self { sources, set })
    }

    /// The expressions as declared.
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Returns `true` if every expression matches the whole value.
    pub fn matches(&self, value: &str) -> bool {
        self.set.matches(value).matched_all()
    }
}

/// Constraints declared on a field.
#[derive(Debug, Clone, Default)]
pub struct Constraints {
    pub required: bool,
    pub input_type: InputType,
    pub pattern: Option<Pattern>,
}

impl Constraints {
    /// Evaluates the native validity flags for a value.
    ///
    /// Type and pattern checks never fire on an empty value; only `required`
    /// does.
    pub fn evaluate(&self, value: &str, custom_message: &str) -> ValidityState {
        let sanitized = if self.input_type.accepts(value) { value } else { "" };
        let present = !sanitized.is_empty();

        ValidityState {
            value_missing: self.required && !present,
            type_mismatch: present
                && self.input_type == InputType::Email
                && !email_address::EmailAddress::is_valid(sanitized),
            pattern_mismatch: present
                && self
                    .pattern
                    .as_ref()
                    .is_some_and(|pattern| !pattern.matches(sanitized)),
            custom_error: !custom_message.is_empty(),
        }
    }
}
