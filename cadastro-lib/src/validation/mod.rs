//! Field validation dispatch for cadastro forms.
//!
//! A [`Validator`] maps each field kind to an optional custom validator and a
//! message table. Validating a field runs the custom validator, reads back
//! the field's validity and displays the resolved message on the field.
//!
//! # Example
//!
//! ```ignore
//! use cadastro_lib::validation::Validator;
//!
//! let validator = Validator::standard(&config)?;
//! let form = Form::registration();
//!
//! // per field, on input
//! validator.validate(form.field(FieldKind::Cep).unwrap(), &form).await;
//!
//! // whole form, on submit
//! let result = validator.validate_form(&form).await;
//! if let Some(id) = result.first_invalid_field() {
//!     // focus the field
//! }
//! ```

mod result;
mod validator;

pub use result::{FieldError, ValidationResult};
pub use validator::Validator;
