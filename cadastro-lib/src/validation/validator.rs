//! Per-field dispatch: custom validator, validity read-back, message display.

use std::collections::HashMap;
use std::sync::Arc;

use super::result::{FieldError, ValidationResult};
use crate::cep::{AddressLookup, CachedLookup, ViaCepClient};
use crate::config::ValidatorConfig;
use crate::error::Error;
use crate::field::{FieldKind, FormField, ValidityFlag};
use crate::form::Form;
use crate::messages::MessageCatalog;
use crate::validators::{
    AgeValidator, CepValidator, CpfValidator, CustomValidator, DEFAULT_MINIMUM_AGE,
};

/// Validates form fields and reflects the outcome on them.
///
/// # Example
///
/// ```ignore
/// let validator = Validator::standard(&ValidatorConfig::default())?;
/// let form = Form::registration();
///
/// let cpf = form.field(FieldKind::Cpf).unwrap();
/// cpf.set_value("529.982.247-24");
///
/// if !validator.validate(cpf, &form).await {
///     assert_eq!(cpf.error().as_deref(), Some("O CPF digitado não é válido."));
/// }
/// ```
#[derive(Clone)]
pub struct Validator {
    validators: HashMap<FieldKind, Arc<dyn CustomValidator>>,
    messages: MessageCatalog,
}

impl Validator {
    /// Create a validator with the default messages and no custom validators.
    pub fn new() -> Self {
        Self {
            validators: HashMap::new(),
            messages: MessageCatalog::default(),
        }
    }

    /// Create the standard validator set: age for birth dates, checksum for
    /// CPFs and, unless disabled, the ViaCEP lookup for postal codes.
    pub fn standard(config: &ValidatorConfig) -> Result<Self, Error> {
        let age = AgeValidator::new(config.minimum_age);
        let mut validator = Self::new();
        if config.minimum_age != DEFAULT_MINIMUM_AGE {
            validator = validator.with_messages(MessageCatalog::default().with_message(
                FieldKind::BirthDate,
                ValidityFlag::CustomError,
                age.message(),
            ));
        }
        let validator = validator
            .with_validator(FieldKind::BirthDate, age)
            .with_validator(FieldKind::Cpf, CpfValidator);

        if !config.cep.enabled {
            return Ok(validator);
        }

        let client = ViaCepClient::builder()
            .base_url(config.cep.base_url.as_str())
            .timeout(config.cep.timeout())
            .connect_timeout(config.cep.connect_timeout())
            .build()?;

        let lookup: Arc<dyn AddressLookup> = if config.cep.cache_ttl_secs > 0 {
            Arc::new(CachedLookup::new(client, config.cep.cache_ttl()))
        } else {
            Arc::new(client)
        };

        Ok(validator.with_validator(FieldKind::Cep, CepValidator::from_arc(lookup)))
    }

    /// Register the custom validator for a kind, replacing any previous one.
    pub fn with_validator(
        mut self,
        kind: FieldKind,
        validator: impl CustomValidator + 'static,
    ) -> Self {
        self.validators.insert(kind, Arc::new(validator));
        self
    }

    /// Remove the custom validator for a kind.
    pub fn without_validator(mut self, kind: FieldKind) -> Self {
        self.validators.remove(&kind);
        self
    }

    /// Replace the message catalog.
    pub fn with_messages(mut self, messages: MessageCatalog) -> Self {
        self.messages = messages;
        self
    }

    /// Returns `true` if a custom validator is registered for the kind.
    pub fn has_validator(&self, kind: FieldKind) -> bool {
        self.validators.contains_key(&kind)
    }

    pub fn messages(&self) -> &MessageCatalog {
        &self.messages
    }

    /// Validate one field.
    ///
    /// Runs the custom validator registered for the field's kind, then reads
    /// the field's validity: a valid field has its error cleared, an invalid
    /// one is marked with the message for its first failure. Returns whether
    /// the field is valid.
    pub async fn validate(&self, field: &FormField, form: &Form) -> bool {
        if let Some(custom) = self.validators.get(&field.kind()) {
            custom.validate(field, form).await;
        }

        let validity = field.validity();
        if validity.valid() {
            field.clear_error();
            true
        } else {
            let message = self.messages.resolve(field.kind(), &validity);
            log::debug!(
                "Field {} ({}) invalid: {:?} -> {:?}",
                field.id(),
                field.kind(),
                validity.first_failure(),
                message
            );
            field.set_error(message);
            false
        }
    }

    /// Validate every field of a form, in order.
    pub async fn validate_form(&self, form: &Form) -> ValidationResult {
        let mut errors = Vec::new();

        for field in form.fields() {
            if !self.validate(field, form).await {
                errors.push(FieldError {
                    kind: field.kind(),
                    field_id: field.id(),
                    message: field.error().unwrap_or_default(),
                });
            }
        }

        ValidationResult::from(errors)
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<_> = self.validators.keys().map(FieldKind::tag).collect();
        kinds.sort_unstable();
        f.debug_struct("Validator")
            .field("validators", &kinds)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::NaiveDate;

    use super::*;

    /// Always fails with a fixed custom message.
    struct Reject(&'static str);

    #[async_trait]
    impl CustomValidator for Reject {
        async fn validate(&self, field: &FormField, _form: &Form) {
            field.set_custom_validity(self.0);
        }
    }

    fn offline() -> Validator {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        Validator::new()
            .with_validator(FieldKind::BirthDate, AgeValidator::default().with_today(today))
            .with_validator(FieldKind::Cpf, CpfValidator)
    }

    #[tokio::test]
    async fn test_valid_field_clears_error() {
        let validator = offline();
        let form = Form::registration();
        let name = form.field(FieldKind::Name).unwrap();
        name.set_error("stale");
        name.set_value("Maria");

        assert!(validator.validate(name, &form).await);
        assert!(!name.has_error());
        assert_eq!(name.error(), None);
    }

    #[tokio::test]
    async fn test_missing_value_message() {
        let validator = offline();
        let form = Form::registration();
        let email = form.field(FieldKind::Email).unwrap();

        assert!(!validator.validate(email, &form).await);
        assert_eq!(email.error().as_deref(), Some("O campo email não pode estar vazio."));
    }

    #[tokio::test]
    async fn test_custom_error_uses_table_message() {
        let validator = offline();
        let form = Form::registration();
        let cpf = form.field(FieldKind::Cpf).unwrap();
        cpf.set_value("529.982.247-24");

        assert!(!validator.validate(cpf, &form).await);
        // the table message is shown, not the custom-validity text
        assert_eq!(cpf.custom_validity(), "CPF inválido.");
        assert_eq!(cpf.error().as_deref(), Some("O CPF digitado não é válido."));

        cpf.set_value("529.982.247-25");
        assert!(validator.validate(cpf, &form).await);
        assert!(!cpf.has_error());
    }

    #[tokio::test]
    async fn test_empty_birth_date_reports_missing_first() {
        let validator = offline();
        let form = Form::registration();
        let birth = form.field(FieldKind::BirthDate).unwrap();

        assert!(!validator.validate(birth, &form).await);
        assert!(birth.validity().custom_error);
        assert_eq!(
            birth.error().as_deref(),
            Some("O campo data de nascimento não pode estar vazio.")
        );
    }

    #[tokio::test]
    async fn test_unmapped_failure_marks_invalid_with_empty_message() {
        let validator = Validator::new().with_validator(FieldKind::Name, Reject("nope"));
        let form = Form::registration();
        let name = form.field(FieldKind::Name).unwrap();
        name.set_value("Maria");

        assert!(!validator.validate(name, &form).await);
        assert!(name.has_error());
        assert_eq!(name.error().as_deref(), Some(""));
    }

    #[tokio::test]
    async fn test_custom_messages() {
        let messages = MessageCatalog::empty().with_message(
            FieldKind::Name,
            ValidityFlag::ValueMissing,
            "Name is required.",
        );
        let validator = Validator::new().with_messages(messages);
        let form = Form::registration();
        let name = form.field(FieldKind::Name).unwrap();

        validator.validate(name, &form).await;
        assert_eq!(name.error().as_deref(), Some("Name is required."));
    }

    #[tokio::test]
    async fn test_validate_form_collects_errors_in_order() {
        let validator = offline();
        let form = Form::registration();
        let values = [
            (FieldKind::Name, "Maria Silva"),
            (FieldKind::Email, "maria@example.com"),
            (FieldKind::Password, "senha"),
            (FieldKind::BirthDate, "2010-05-20"),
            (FieldKind::Cpf, "529.982.247-25"),
            (FieldKind::Cep, "01001-000"),
            (FieldKind::Street, "Praça da Sé"),
            (FieldKind::City, "São Paulo"),
            (FieldKind::State, "SP"),
        ];
        for (kind, value) in values {
            form.field(kind).unwrap().set_value(value);
        }

        let result = validator.validate_form(&form).await;

        assert!(result.is_invalid());
        let kinds: Vec<_> = result.errors().iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![FieldKind::Password, FieldKind::BirthDate]);
        assert_eq!(
            result.first_invalid_field(),
            Some(form.field(FieldKind::Password).unwrap().id())
        );
        assert_eq!(
            result.errors()[1].message,
            "Você deve ser maior de 18 anos para se cadastrar."
        );
    }

    #[tokio::test]
    async fn test_validate_form_all_valid() {
        let validator = offline();
        let form = Form::new().with_field(FormField::with_value(FieldKind::Name, "Ana"));
        assert!(validator.validate_form(&form).await.is_valid());
    }

    #[test]
    fn test_standard_registrations() {
        let validator = Validator::standard(&ValidatorConfig::default()).unwrap();
        assert!(validator.has_validator(FieldKind::BirthDate));
        assert!(validator.has_validator(FieldKind::Cpf));
        assert!(validator.has_validator(FieldKind::Cep));
        assert!(!validator.has_validator(FieldKind::Name));

        let validator = Validator::standard(&ValidatorConfig::default().offline()).unwrap();
        assert!(!validator.has_validator(FieldKind::Cep));
    }

    #[tokio::test]
    async fn test_standard_shows_configured_minimum_age() {
        let config = ValidatorConfig::default().with_minimum_age(21).offline();
        let validator = Validator::standard(&config).unwrap();
        let form = Form::registration();
        let birth = form.field(FieldKind::BirthDate).unwrap();
        birth.set_value("2020-01-01");

        assert!(!validator.validate(birth, &form).await);
        assert_eq!(
            birth.custom_validity(),
            "Você deve ser maior de 21 anos para se cadastrar."
        );
        assert_eq!(
            birth.error().as_deref(),
            Some("Você deve ser maior de 21 anos para se cadastrar.")
        );

        let validator = Validator::standard(&ValidatorConfig::default().offline()).unwrap();
        assert!(!validator.validate(birth, &form).await);
        assert_eq!(
            birth.error().as_deref(),
            Some("Você deve ser maior de 18 anos para se cadastrar.")
        );
    }

    #[test]
    fn test_standard_rejects_bad_url() {
        let config = ValidatorConfig::default().with_cep_base_url("nope");
        assert!(matches!(Validator::standard(&config), Err(Error::Lookup(_))));
    }
}
