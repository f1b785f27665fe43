//! Error messages shown next to invalid fields.

use std::borrow::Cow;
use std::collections::HashMap;

use crate::field::{FieldKind, ValidityFlag, ValidityState};

/// Lookup table from (field kind, failure reason) to a localized message.
///
/// # Example
///
/// ```
/// use cadastro_lib::field::{FieldKind, ValidityFlag, ValidityState};
/// use cadastro_lib::messages::MessageCatalog;
///
/// let catalog = MessageCatalog::default();
/// let state = ValidityState { value_missing: true, ..Default::default() };
/// assert_eq!(
///     catalog.resolve(FieldKind::Name, &state),
///     "O campo nome não pode estar vazio."
/// );
/// ```
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    entries: HashMap<(FieldKind, ValidityFlag), Cow<'static, str>>,
}

impl MessageCatalog {
    /// Creates a catalog with no entries.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// The Brazilian Portuguese catalog used by the registration form.
    pub fn pt_br() -> Self {
        use FieldKind::*;
        use ValidityFlag::*;

        let table: [(FieldKind, ValidityFlag, &'static str); 16] = [
            (Name, ValueMissing, "O campo nome não pode estar vazio."),
            (Email, ValueMissing, "O campo email não pode estar vazio."),
            (Email, TypeMismatch, "O email digitado não é válido."),
            (Password, ValueMissing, "O campo senha não pode estar vazio."),
            (
                Password,
                PatternMismatch,
                "A senha deve conter entre 6 e 12 caracteres, e deve conter pelo menos uma letra maiúscula, uma letra minúscula e um número.",
            ),
            (
                BirthDate,
                ValueMissing,
                "O campo data de nascimento não pode estar vazio.",
            ),
            (
                BirthDate,
                CustomError,
                "Você deve ser maior de 18 anos para se cadastrar.",
            ),
            (Cpf, ValueMissing, "O campo CPF não pode estar vazio."),
            (Cpf, CustomError, "O CPF digitado não é válido."),
            (Cep, ValueMissing, "O campo CEP não pode estar vazio."),
            (Cep, PatternMismatch, "O CEP digitado não é válido."),
            (Cep, CustomError, "Não foi possível buscar o CEP."),
            (Street, ValueMissing, "O campo logradouro não pode estar vazio."),
            (City, ValueMissing, "O campo cidade não pode estar vazio."),
            (State, ValueMissing, "O campo estado não pode estar vazio."),
            (Price, ValueMissing, "O campo preço não pode estar vazio."),
        ];

        let entries = table
            .into_iter()
            .map(|(kind, flag, msg)| ((kind, flag), Cow::Borrowed(msg)))
            .collect();
        Self { entries }
    }

    /// Adds or replaces the message for a (kind, reason) pair.
    pub fn with_message(
        mut self,
        kind: FieldKind,
        flag: ValidityFlag,
        msg: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.entries.insert((kind, flag), msg.into());
        self
    }

    /// Removes the message for a (kind, reason) pair.
    pub fn without_message(mut self, kind: FieldKind, flag: ValidityFlag) -> Self {
        self.entries.remove(&(kind, flag));
        self
    }

    /// Gets the message for a (kind, reason) pair.
    pub fn get(&self, kind: FieldKind, flag: ValidityFlag) -> Option<&str> {
        self.entries.get(&(kind, flag)).map(|msg| msg.as_ref())
    }

    /// Resolves the message for a validity state.
    ///
    /// Only the first failure in check order is considered; if the table
    /// has no entry for it, or nothing failed, the message is empty.
    pub fn resolve(&self, kind: FieldKind, validity: &ValidityState) -> String {
        validity
            .first_failure()
            .and_then(|flag| self.get(kind, flag))
            .unwrap_or_default()
            .to_string()
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::pt_br()
    }
}
