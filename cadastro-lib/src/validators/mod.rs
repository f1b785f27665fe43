//! Custom validators run before a field's validity is read.
//!
//! A custom validator inspects a field (and, when needed, the rest of the
//! form) and records its verdict through the field's custom-validity
//! message: an empty message means the check passed.

mod birth_date;
mod cep;
mod cpf;

pub use birth_date::{AgeValidator, DEFAULT_MINIMUM_AGE, add_years, is_of_age};
pub use cep::{CEP_NOT_FOUND_MESSAGE, CEP_UNAVAILABLE_MESSAGE, CepValidator};
pub use cpf::{Cpf, CpfError, CpfValidator, INVALID_CPF_MESSAGE, is_valid_cpf};

use async_trait::async_trait;

use crate::field::FormField;
use crate::form::Form;

/// A kind-specific check that updates a field's custom validity.
#[async_trait]
pub trait CustomValidator: Send + Sync {
    async fn validate(&self, field: &FormField, form: &Form);
}
