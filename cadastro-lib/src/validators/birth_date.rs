//! Minimum-age check on a birth date.

use async_trait::async_trait;
use chrono::{Datelike, Local, NaiveDate};

use super::CustomValidator;
use crate::field::{FormField, parse_date};
use crate::form::Form;

/// Age required to register.
pub const DEFAULT_MINIMUM_AGE: u32 = 18;

/// Sets a custom error on birth dates younger than a minimum age.
#[derive(Debug, Clone)]
pub struct AgeValidator {
    minimum_age: u32,
    today: Option<NaiveDate>,
}

impl AgeValidator {
    pub fn new(minimum_age: u32) -> Self {
        Self {
            minimum_age,
            today: None,
        }
    }

    /// Pins the current date instead of reading the local clock.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn minimum_age(&self) -> u32 {
        self.minimum_age
    }

    /// The custom-validity message set on an underage birth date.
    pub fn message(&self) -> String {
        format!(
            "Você deve ser maior de {} anos para se cadastrar.",
            self.minimum_age
        )
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}

impl Default for AgeValidator {
    fn default() -> Self {
        Self::new(DEFAULT_MINIMUM_AGE)
    }
}

/// Returns `true` if someone born on `birth` is at least `years` old on `today`.
pub fn is_of_age(birth: NaiveDate, today: NaiveDate, years: u32) -> bool {
    add_years(birth, years).is_some_and(|threshold| threshold <= today)
}

/// Moves a date forward by whole calendar years.
///
/// Feb 29 landing in a common year rolls over to Mar 1.
pub fn add_years(date: NaiveDate, years: u32) -> Option<NaiveDate> {
    let year = date.year().checked_add(i32::try_from(years).ok()?)?;
    NaiveDate::from_ymd_opt(year, date.month(), date.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
}

#[async_trait]
impl CustomValidator for AgeValidator {
    async fn validate(&self, field: &FormField, _form: &Form) {
        let value = field.value();
        let adult = parse_date(&value)
            .is_some_and(|birth| is_of_age(birth, self.today(), self.minimum_age));

        if adult {
            field.set_custom_validity("");
        } else {
            log::debug!("Birth date '{}' is under {} years", value, self.minimum_age);
            field.set_custom_validity(self.message());
        }
    }
}
