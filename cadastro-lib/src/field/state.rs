use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use super::{Constraints, FieldKind, InputType, Pattern, ValidityState};

/// Unique identifier for a form field instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldId(usize);

impl FieldId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for FieldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__field_{}", self.0)
    }
}

/// Mutable state behind a field handle
#[derive(Debug, Default)]
struct FieldInner {
    /// Current value
    value: String,
    /// Message set by a custom validator; empty means no custom error
    custom_validity: String,
    /// Whether the field is currently displayed as invalid
    invalid: bool,
    /// Error message displayed next to the field
    message: String,
}

/// A form field with shared, interior-mutable state.
///
/// Cloning a `FormField` yields another handle to the same field, so a
/// validator can update a sibling field that the caller also holds.
///
/// # Example
///
/// ```
/// use cadastro_lib::field::{FieldKind, FormField, InputType};
///
/// let email = FormField::new(FieldKind::Email)
///     .required()
///     .input_type(InputType::Email);
///
/// email.set_value("maria@");
/// assert!(email.validity().type_mismatch);
/// ```
#[derive(Debug, Clone)]
pub struct FormField {
    /// Unique identifier for this field instance
    id: FieldId,
    /// Declared kind
    kind: FieldKind,
    /// Declared constraints
    constraints: Arc<Constraints>,
    /// Internal state
    inner: Arc<RwLock<FieldInner>>,
}

impl FormField {
    /// Create a new empty field of the given kind with no constraints
    pub fn new(kind: FieldKind) -> Self {
        Self {
            id: FieldId::new(),
            kind,
            constraints: Arc::new(Constraints::default()),
            inner: Arc::new(RwLock::new(FieldInner::default())),
        }
    }

    /// Create a field with an initial value
    pub fn with_value(kind: FieldKind, value: impl Into<String>) -> Self {
        let field = Self::new(kind);
        field.set_value(value);
        field
    }

    /// Mark the field as required.
    pub fn required(self) -> Self {
        self.with_constraints(|c| c.required = true)
    }

    /// Set the declared input type.
    pub fn input_type(self, input_type: InputType) -> Self {
        self.with_constraints(|c| c.input_type = input_type)
    }

    /// Set the value pattern.
    pub fn pattern(self, pattern: Pattern) -> Self {
        self.with_constraints(|c| c.pattern = Some(pattern))
    }

    fn with_constraints(mut self, f: impl FnOnce(&mut Constraints)) -> Self {
        f(Arc::make_mut(&mut self.constraints));
        self
    }

    /// Get the unique ID for this field
    pub fn id(&self) -> FieldId {
        self.id
    }

    /// Get the declared kind
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Get the declared constraints
    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    // -------------------------------------------------------------------------
    // Value
    // -------------------------------------------------------------------------

    /// Get the current value
    pub fn value(&self) -> String {
        self.inner
            .read()
            .map(|guard| guard.value.clone())
            .unwrap_or_default()
    }

    /// Set the value
    pub fn set_value(&self, value: impl Into<String>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.value = value.into();
        }
    }

    // -------------------------------------------------------------------------
    // Validity
    // -------------------------------------------------------------------------

    /// Set the custom-validity message. An empty message clears the custom error.
    pub fn set_custom_validity(&self, msg: impl Into<String>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.custom_validity = msg.into();
        }
    }

    /// Get the custom-validity message.
    pub fn custom_validity(&self) -> String {
        self.inner
            .read()
            .map(|guard| guard.custom_validity.clone())
            .unwrap_or_default()
    }

    /// Evaluate the current validity flags.
    pub fn validity(&self) -> ValidityState {
        self.inner
            .read()
            .map(|guard| {
                self.constraints
                    .evaluate(&guard.value, &guard.custom_validity)
            })
            .unwrap_or_default()
    }

    /// Check whether the field currently satisfies all constraints.
    pub fn is_valid(&self) -> bool {
        self.validity().valid()
    }

    // -------------------------------------------------------------------------
    // Displayed error
    // -------------------------------------------------------------------------

    /// Mark the field as invalid and display a message (possibly empty).
    pub fn set_error(&self, msg: impl Into<String>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.invalid = true;
            guard.message = msg.into();
        }
    }

    /// Clear the invalid marker and the displayed message.
    pub fn clear_error(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.invalid = false;
            guard.message.clear();
        }
    }

    /// Check if the field is displayed as invalid.
    pub fn has_error(&self) -> bool {
        self.inner
            .read()
            .map(|guard| guard.invalid)
            .unwrap_or(false)
    }

    /// Get the displayed error message, if the field is marked invalid.
    pub fn error(&self) -> Option<String> {
        self.inner
            .read()
            .ok()
            .filter(|guard| guard.invalid)
            .map(|guard| guard.message.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let field = FormField::new(FieldKind::City);
        let other = field.clone();
        other.set_value("São Paulo");
        assert_eq!(field.value(), "São Paulo");
        assert_eq!(field.id(), other.id());
    }

    #[test]
    fn test_ids_are_unique() {
        let a = FormField::new(FieldKind::Name);
        let b = FormField::new(FieldKind::Name);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_custom_validity_round_trip() {
        let field = FormField::with_value(FieldKind::Cpf, "123");
        assert!(field.is_valid());
        field.set_custom_validity("CPF inválido.");
        assert!(field.validity().custom_error);
        field.set_custom_validity("");
        assert!(field.is_valid());
    }

    #[test]
    fn test_error_may_be_empty() {
        let field = FormField::new(FieldKind::Name);
        assert_eq!(field.error(), None);
        field.set_error("");
        assert!(field.has_error());
        assert_eq!(field.error(), Some(String::new()));
        field.clear_error();
        assert!(!field.has_error());
        assert_eq!(field.error(), None);
    }
}
