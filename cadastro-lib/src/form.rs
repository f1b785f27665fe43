//! Forms: ordered groups of fields.

use serde::{Deserialize, Serialize};

use crate::cep::Address;
use crate::error::Error;
use crate::field::{FieldKind, FormField, InputType, Pattern};

/// Pattern accepted for the `cep` field of the registration form.
pub const CEP_PATTERN: &str = r"\d{5}-?\d{3}";

/// Expressions that together make up the registration password rule:
/// 6 to 12 characters with a lowercase letter, an uppercase letter and a digit.
pub const PASSWORD_PATTERN: [&str; 4] = [".{6,12}", ".*[a-z].*", ".*[A-Z].*", r".*\d.*"];

/// An ordered collection of fields.
///
/// Fields are found by kind, the first field of a kind winning, which is
/// how validators reach sibling fields (the address fields filled by a
/// postal-code lookup, for instance).
#[derive(Debug, Clone, Default)]
pub struct Form {
    fields: Vec<FormField>,
}

impl Form {
    /// Creates an empty form.
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Appends a field, builder style.
    pub fn with_field(mut self, field: FormField) -> Self {
        self.fields.push(field);
        self
    }

    /// Appends a field.
    pub fn push(&mut self, field: FormField) {
        self.fields.push(field);
    }

    /// All fields, in declaration order.
    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    /// The first field of the given kind.
    pub fn field(&self, kind: FieldKind) -> Option<&FormField> {
        self.fields.iter().find(|field| field.kind() == kind)
    }

    /// Writes the street, city and state of an address into the matching
    /// fields. Missing fields are skipped.
    pub fn fill_address(&self, address: &Address) {
        let parts = [
            (FieldKind::Street, &address.street),
            (FieldKind::City, &address.city),
            (FieldKind::State, &address.state),
        ];
        for (kind, value) in parts {
            match self.field(kind) {
                Some(field) => field.set_value(value.as_str()),
                None => log::warn!("Form has no '{}' field to fill from address lookup", kind),
            }
        }
    }

    /// The standard registration form, every field empty and required.
    pub fn registration() -> Self {
        let required = |kind| FormField::new(kind).required();

        Self::new()
            .with_field(required(FieldKind::Name))
            .with_field(required(FieldKind::Email).input_type(InputType::Email))
            .with_field(
                required(FieldKind::Password)
                    .input_type(InputType::Password)
                    .pattern(password_pattern()),
            )
            .with_field(required(FieldKind::BirthDate).input_type(InputType::Date))
            .with_field(required(FieldKind::Cpf))
            .with_field(required(FieldKind::Cep).pattern(cep_pattern()))
            .with_field(required(FieldKind::Street))
            .with_field(required(FieldKind::City))
            .with_field(required(FieldKind::State))
    }

    /// Builds a form from a JSON array of [`FieldSpec`]s.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let specs: Vec<FieldSpec> = serde_json::from_str(json)?;
        Self::from_specs(specs)
    }

    /// Builds a form from field descriptions.
    pub fn from_specs(specs: impl IntoIterator<Item = FieldSpec>) -> Result<Self, Error> {
        let mut form = Self::new();
        for spec in specs {
            form.push(spec.into_field()?);
        }
        Ok(form)
    }

    /// Describes the form's fields with their current values.
    pub fn to_specs(&self) -> Vec<FieldSpec> {
        self.fields.iter().map(FieldSpec::from_field).collect()
    }
}

fn cep_pattern() -> Pattern {
    Pattern::new(CEP_PATTERN).expect("Invalid CEP pattern")
}

fn password_pattern() -> Pattern {
    Pattern::all(PASSWORD_PATTERN).expect("Invalid password pattern")
}

/// A pattern as written in a form description: one expression or several.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatternSpec {
    One(String),
    All(Vec<String>),
}

/// Declarative description of a field.
///
/// `kind` holds the field tag; it is parsed into a [`FieldKind`] when the
/// field is built, so an unknown tag surfaces as
/// [`FieldError::UnknownKind`](crate::error::FieldError::UnknownKind).
///
/// ```json
/// { "kind": "cep", "value": "01001-000", "required": true, "pattern": "\\d{5}-?\\d{3}" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub kind: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub required: bool,
    #[serde(rename = "type", default)]
    pub input_type: InputType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<PatternSpec>,
}

impl FieldSpec {
    /// Builds the described field.
    pub fn into_field(self) -> Result<FormField, Error> {
        let kind: FieldKind = self.kind.parse()?;
        let mut field = FormField::with_value(kind, self.value).input_type(self.input_type);
        if self.required {
            field = field.required();
        }
        let pattern = match self.pattern {
            Some(PatternSpec::One(source)) => Some(Pattern::new(source)?),
            Some(PatternSpec::All(sources)) => Some(Pattern::all(sources)?),
            None => None,
        };
        if let Some(pattern) = pattern {
            field = field.pattern(pattern);
        }
        Ok(field)
    }

    fn from_field(field: &FormField) -> Self {
        let constraints = field.constraints();
        let pattern = constraints.pattern.as_ref().map(|p| match p.sources() {
            [one] => PatternSpec::One(one.clone()),
            many => PatternSpec::All(many.to_vec()),
        });
        Self {
            kind: field.kind().tag().to_string(),
            value: field.value(),
            required: constraints.required,
            input_type: constraints.input_type,
            pattern,
        }
    }
}
