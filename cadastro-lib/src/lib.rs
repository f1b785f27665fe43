//! Registration form field validation
//!
//! Presence, type and pattern checks, a CPF checksum, a minimum-age check
//! and a postal-code lookup that fills the address fields of the form.

pub mod cep;
pub mod config;
pub mod error;
pub mod field;
pub mod form;
pub mod messages;
pub mod validation;
pub mod validators;

pub use config::ValidatorConfig;
pub use error::Error;
pub use field::{FieldKind, FormField};
pub use form::Form;
pub use validation::{ValidationResult, Validator};
