//! Declared field kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FieldError;

/// The declared kind of a form field.
///
/// The kind selects the custom validator run for the field and the message
/// table used to describe its failures. Each kind has a stable tag used in
/// form descriptions (`"dataNascimento"`, `"cpf"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    #[serde(rename = "nome")]
    Name,
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "senha")]
    Password,
    #[serde(rename = "dataNascimento")]
    BirthDate,
    #[serde(rename = "cpf")]
    Cpf,
    #[serde(rename = "cep")]
    Cep,
    #[serde(rename = "logradouro")]
    Street,
    #[serde(rename = "cidade")]
    City,
    #[serde(rename = "estado")]
    State,
    #[serde(rename = "preco")]
    Price,
}

impl FieldKind {
    /// Every kind, in form order.
    pub const ALL: [FieldKind; 10] = [
        FieldKind::Name,
        FieldKind::Email,
        FieldKind::Password,
        FieldKind::BirthDate,
        FieldKind::Cpf,
        FieldKind::Cep,
        FieldKind::Street,
        FieldKind::City,
        FieldKind::State,
        FieldKind::Price,
    ];

    /// The tag this kind is declared with.
    pub fn tag(&self) -> &'static str {
        match self {
            FieldKind::Name => "nome",
            FieldKind::Email => "email",
            FieldKind::Password => "senha",
            FieldKind::BirthDate => "dataNascimento",
            FieldKind::Cpf => "cpf",
            FieldKind::Cep => "cep",
            FieldKind::Street => "logradouro",
            FieldKind::City => "cidade",
            FieldKind::State => "estado",
            FieldKind::Price => "preco",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.tag())
    }
}

impl FromStr for FieldKind {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldKind::ALL
            .into_iter()
            .find(|kind| kind.tag() == s)
            .ok_or_else(|| FieldError::unknown_kind(s))
    }
}
