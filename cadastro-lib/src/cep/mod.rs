//! Postal-code (CEP) lookup
//!
//! Resolves a Brazilian postal code to a street address through a remote
//! address service. [`ViaCepClient`] talks to the service over HTTP and
//! [`CachedLookup`] memoizes answers in front of any [`AddressLookup`].

mod cache;
mod client;
mod response;

pub use cache::{CachedLookup, DEFAULT_GC_THRESHOLD};
pub use client::{DEFAULT_BASE_URL, ViaCepClient, ViaCepClientBuilder};

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::LookupError;

/// Number of digits in a CEP.
pub const CEP_DIGITS: usize = 8;

/// An 8-digit Brazilian postal code.
///
/// Parsing ignores every non-digit character, so `"01001-000"` and
/// `"01001000"` are the same code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cep(String);

impl Cep {
    /// Parses a postal code from user input.
    pub fn parse(input: &str) -> Result<Self, LookupError> {
        let digits: String = input.chars().filter(char::is_ascii_digit).collect();
        if digits.len() == CEP_DIGITS {
            Ok(Self(digits))
        } else {
            Err(LookupError::InvalidCep(input.to_string()))
        }
    }

    /// The code as 8 bare digits.
    pub fn digits(&self) -> &str {
        &self.0
    }
}

impl FromStr for Cep {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Cep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", &self.0[..5], &self.0[5..])
    }
}

/// Address returned by a successful lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Postal code as reported by the service.
    pub cep: String,
    /// Street name (logradouro).
    pub street: String,
    /// Complement, often empty.
    pub complement: String,
    /// Neighborhood (bairro).
    pub neighborhood: String,
    /// City (localidade).
    pub city: String,
    /// Two-letter state code (UF).
    pub state: String,
}

/// Resolves postal codes to addresses.
///
/// `Ok(None)` means the service answered and does not know the code; any
/// failure to get an answer is an `Err`.
#[async_trait]
pub trait AddressLookup: Send + Sync {
    async fn lookup(&self, cep: &Cep) -> Result<Option<Address>, LookupError>;
}
