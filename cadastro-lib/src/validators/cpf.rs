//! CPF (Brazilian individual taxpayer number) checksum validation.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;

use super::CustomValidator;
use crate::field::FormField;
use crate::form::Form;

/// Custom-validity message set on an invalid CPF.
pub const INVALID_CPF_MESSAGE: &str = "CPF inválido.";

const CPF_DIGIT_COUNT: usize = 11;

/// Sequences that pass the checksum but are never issued.
const DENYLIST: [&str; 11] = [
    "00000000000",
    "11111111111",
    "22222222222",
    "33333333333",
    "44444444444",
    "55555555555",
    "66666666666",
    "77777777777",
    "88888888888",
    "99999999999",
    "12345678910",
];

/// Why a CPF was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CpfError {
    #[error("CPF must have 11 digits, found {0}")]
    Length(usize),
    #[error("CPF is a reserved sequence")]
    Denylisted,
    #[error("CPF check digits do not match")]
    Checksum,
}

/// A CPF whose check digits have been verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cpf([u8; CPF_DIGIT_COUNT]);

impl Cpf {
    /// Parses and verifies a CPF, ignoring every non-digit character.
    // https://pt.wikipedia.org/wiki/Cadastro_de_Pessoas_F%C3%ADsicas#C%C3%A1lculo_do_d%C3%ADgito_verificador
    pub fn parse(input: &str) -> Result<Self, CpfError> {
        let digits: String = input.chars().filter(char::is_ascii_digit).collect();
        if digits.len() != CPF_DIGIT_COUNT {
            return Err(CpfError::Length(digits.len()));
        }
        if DENYLIST.contains(&digits.as_str()) {
            return Err(CpfError::Denylisted);
        }

        let mut parsed = [0u8; CPF_DIGIT_COUNT];
        for (slot, byte) in parsed.iter_mut().zip(digits.bytes()) {
            *slot = byte - b'0';
        }

        if check_digit(&parsed[..9]) != parsed[9] || check_digit(&parsed[..10]) != parsed[10] {
            return Err(CpfError::Checksum);
        }
        Ok(Self(parsed))
    }

    /// The 11 digits.
    pub fn digits(&self) -> &[u8; CPF_DIGIT_COUNT] {
        &self.0
    }
}

/// Computes the check digit following `digits`.
///
/// Weights descend from `digits.len() + 1` to 2; remainders 0 and 1 map to 0.
fn check_digit(digits: &[u8]) -> u8 {
    let top = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .zip((2..=top).rev())
        .map(|(&digit, weight)| digit as u32 * weight)
        .sum();
    match sum % 11 {
        0 | 1 => 0,
        rem => (11 - rem) as u8,
    }
}

/// Returns `true` if the input holds a valid CPF.
pub fn is_valid_cpf(input: &str) -> bool {
    Cpf::parse(input).is_ok()
}

impl FromStr for Cpf {
    type Err = CpfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = |range: std::ops::Range<usize>| {
            self.0[range]
                .iter()
                .map(|digit| char::from(b'0' + digit))
                .collect::<String>()
        };
        write!(f, "{}.{}.{}-{}", d(0..3), d(3..6), d(6..9), d(9..11))
    }
}

/// Sets a custom error on fields that do not hold a valid CPF.
#[derive(Debug, Clone, Copy, Default)]
pub struct CpfValidator;

#[async_trait]
impl CustomValidator for CpfValidator {
    async fn validate(&self, field: &FormField, _form: &Form) {
        match Cpf::parse(&field.value()) {
            Ok(_) => field.set_custom_validity(""),
            Err(e) => {
                log::debug!("Rejected CPF in {}: {}", field.id(), e);
                field.set_custom_validity(INVALID_CPF_MESSAGE);
            }
        }
    }
}
