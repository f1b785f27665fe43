//! Native validity state of a field.

use std::fmt;

/// A reason a field fails constraint validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidityFlag {
    /// A required field has no value.
    ValueMissing,
    /// The value does not fit the input type (e.g. a malformed email).
    TypeMismatch,
    /// The value does not match the field's pattern.
    PatternMismatch,
    /// A custom validator set a non-empty custom-validity message.
    CustomError,
}

impl ValidityFlag {
    /// The order in which failure reasons are checked when picking a message.
    pub const ORDER: [ValidityFlag; 4] = [
        ValidityFlag::ValueMissing,
        ValidityFlag::TypeMismatch,
        ValidityFlag::PatternMismatch,
        ValidityFlag::CustomError,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ValidityFlag::ValueMissing => "valueMissing",
            ValidityFlag::TypeMismatch => "typeMismatch",
            ValidityFlag::PatternMismatch => "patternMismatch",
            ValidityFlag::CustomError => "customError",
        }
    }
}

impl fmt::Display for ValidityFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the validity flags of a field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidityState {
    pub value_missing: bool,
    pub type_mismatch: bool,
    pub pattern_mismatch: bool,
    pub custom_error: bool,
}

impl ValidityState {
    /// Returns `true` if no failure flag is set.
    pub fn valid(&self) -> bool {
        !(self.value_missing || self.type_mismatch || self.pattern_mismatch || self.custom_error)
    }

    /// Returns `true` if the given flag is set.
    pub fn has(&self, flag: ValidityFlag) -> bool {
        match flag {
            ValidityFlag::ValueMissing => self.value_missing,
            ValidityFlag::TypeMismatch => self.type_mismatch,
            ValidityFlag::PatternMismatch => self.pattern_mismatch,
            ValidityFlag::CustomError => self.custom_error,
        }
    }

    /// Iterates over the set flags in check order.
    pub fn failures(&self) -> impl Iterator<Item = ValidityFlag> + '_ {
        ValidityFlag::ORDER
            .into_iter()
            .filter(move |flag| self.has(*flag))
    }

    /// The first set flag in check order, if any.
    pub fn first_failure(&self) -> Option<ValidityFlag> {
        self.failures().next()
    }
}
