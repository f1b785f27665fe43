//! Postal-code lookup that fills the address fields.

use std::sync::Arc;

use async_trait::async_trait;

use super::CustomValidator;
use crate::cep::{AddressLookup, Cep};
use crate::field::FormField;
use crate::form::Form;

/// Custom-validity message when the service does not know the code.
pub const CEP_NOT_FOUND_MESSAGE: &str = "CEP não encontrado.";

/// Custom-validity message when the service could not be queried.
pub const CEP_UNAVAILABLE_MESSAGE: &str = "Não foi possível buscar o CEP.";

/// Looks the field's postal code up and fills street, city and state.
///
/// The lookup only runs for a present value that matches the field's
/// pattern; otherwise the custom validity is left untouched and the native
/// flags describe the problem.
#[derive(Clone)]
pub struct CepValidator {
    lookup: Arc<dyn AddressLookup>,
}

impl CepValidator {
    pub fn new(lookup: impl AddressLookup + 'static) -> Self {
        Self {
            lookup: Arc::new(lookup),
        }
    }

    pub fn from_arc(lookup: Arc<dyn AddressLookup>) -> Self {
        Self { lookup }
    }
}

impl std::fmt::Debug for CepValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CepValidator").finish_non_exhaustive()
    }
}

#[async_trait]
impl CustomValidator for CepValidator {
    async fn validate(&self, field: &FormField, form: &Form) {
        let validity = field.validity();
        if validity.pattern_mismatch || validity.value_missing {
            return;
        }

        let value = field.value();
        if !value.chars().any(|c| c.is_ascii_digit()) {
            return;
        }

        let cep = match Cep::parse(&value) {
            Ok(cep) => cep,
            Err(e) => {
                log::debug!("Not looking up '{}': {}", value, e);
                field.set_custom_validity(CEP_NOT_FOUND_MESSAGE);
                return;
            }
        };

        match self.lookup.lookup(&cep).await {
            Ok(Some(address)) => {
                log::debug!("CEP {} resolved to {}, {}", cep, address.city, address.state);
                field.set_custom_validity("");
                form.fill_address(&address);
            }
            Ok(None) => {
                log::debug!("CEP {} not found", cep);
                field.set_custom_validity(CEP_NOT_FOUND_MESSAGE);
            }
            Err(e) => {
                log::warn!("CEP lookup for {} failed: {}", cep, e);
                field.set_custom_validity(CEP_UNAVAILABLE_MESSAGE);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::cep::Address;
    use crate::error::LookupError;
    use crate::field::FieldKind;

    /// Knows a single code; fails for "00000000".
    #[derive(Default)]
    struct OneCode {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl AddressLookup for OneCode {
        async fn lookup(&self, cep: &Cep) -> Result<Option<Address>, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match cep.digits() {
                "01001000" => Ok(Some(Address {
                    cep: "01001-000".into(),
                    street: "Praça da Sé".into(),
                    complement: "lado ímpar".into(),
                    neighborhood: "Sé".into(),
                    city: "São Paulo".into(),
                    state: "SP".into(),
                })),
                "00000000" => Err(LookupError::http(500, "boom")),
                _ => Ok(None),
            }
        }
    }

    fn setup(value: &str) -> (Arc<OneCode>, CepValidator, Form) {
        let lookup = Arc::new(OneCode::default());
        let validator = CepValidator::from_arc(lookup.clone());
        let form = Form::registration();
        form.field(FieldKind::Cep).unwrap().set_value(value);
        (lookup, validator, form)
    }

    #[tokio::test]
    async fn test_found_fills_siblings() {
        let (_, validator, form) = setup("01001-000");
        let cep = form.field(FieldKind::Cep).unwrap();
        cep.set_custom_validity(CEP_NOT_FOUND_MESSAGE);

        validator.validate(cep, &form).await;

        assert_eq!(cep.custom_validity(), "");
        assert_eq!(form.field(FieldKind::Street).unwrap().value(), "Praça da Sé");
        assert_eq!(form.field(FieldKind::City).unwrap().value(), "São Paulo");
        assert_eq!(form.field(FieldKind::State).unwrap().value(), "SP");
    }

    #[tokio::test]
    async fn test_not_found_sets_message() {
        let (_, validator, form) = setup("99999-999");
        let cep = form.field(FieldKind::Cep).unwrap();

        validator.validate(cep, &form).await;

        assert_eq!(cep.custom_validity(), CEP_NOT_FOUND_MESSAGE);
        assert_eq!(form.field(FieldKind::Street).unwrap().value(), "");
    }

    #[tokio::test]
    async fn test_failure_sets_message() {
        let (_, validator, form) = setup("00000-000");
        let cep = form.field(FieldKind::Cep).unwrap();

        validator.validate(cep, &form).await;

        assert_eq!(cep.custom_validity(), CEP_UNAVAILABLE_MESSAGE);
    }

    #[tokio::test]
    async fn test_skips_missing_and_mismatched_values() {
        for value in ["", "0100-1000", "abc"] {
            let (lookup, validator, form) = setup(value);
            let cep = form.field(FieldKind::Cep).unwrap();

            validator.validate(cep, &form).await;

            assert_eq!(lookup.calls.load(Ordering::SeqCst), 0, "{value:?}");
            assert_eq!(cep.custom_validity(), "");
        }
    }
}
