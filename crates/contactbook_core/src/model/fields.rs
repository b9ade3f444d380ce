//! Validated field values stored inside a contact record.
//!
//! # Responsibility
//! - Turn raw user text into `Name`, `PhoneNumber` and `Birthday` values.
//! - Keep every format rule in one place so records never hold bad input.
//!
//! # Invariants
//! - A `PhoneNumber` always holds exactly 10 characters.
//! - A `Birthday` is never later than the day it was created on.
//! - Values are immutable once constructed.

use chrono::{Datelike, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Textual birthday format accepted from users and used for display.
pub const BIRTHDAY_FORMAT: &str = "%d.%m.%Y";
/// Required phone length in characters.
pub const PHONE_LENGTH: usize = 10;

static BIRTHDAY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2}\.\d{2}\.\d{4}$").expect("valid birthday regex"));

/// Returns the current local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Phone text is not exactly `PHONE_LENGTH` characters long.
    PhoneLength { value: String, actual: usize },
    /// Birthday text is not a real `DD.MM.YYYY` date.
    BirthdayFormat(String),
    /// Birthday lies after the validation day.
    BirthdayInFuture {
        birthday: NaiveDate,
        today: NaiveDate,
    },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PhoneLength { value, actual } => write!(
                f,
                "phone `{value}` must be exactly {PHONE_LENGTH} characters, got {actual}"
            ),
            Self::BirthdayFormat(value) => {
                write!(f, "birthday `{value}` must use the DD.MM.YYYY format")
            }
            Self::BirthdayInFuture { birthday, today } => write!(
                f,
                "birthday {} is later than today ({})",
                birthday.format(BIRTHDAY_FORMAT),
                today.format(BIRTHDAY_FORMAT)
            ),
        }
    }
}

impl Error for ValidationError {}

/// Contact name and unique key inside an address book.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Name(String);

impl Name {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Name {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Phone number with a fixed character length and no other format rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Validates phone text.
    ///
    /// Any 10-character string is accepted; digits are not enforced.
    ///
    /// # Errors
    /// - `ValidationError::PhoneLength` when the length is not 10 characters.
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let actual = value.chars().count();
        if actual != PHONE_LENGTH {
            return Err(ValidationError::PhoneLength { value, actual });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PhoneNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Calendar birthday without a time component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Birthday(NaiveDate);

impl Birthday {
    /// Parses `DD.MM.YYYY` text, validated against the local calendar date.
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        Self::parse_at(text, today())
    }

    /// Parses `DD.MM.YYYY` text, validated against `today`.
    ///
    /// # Errors
    /// - `ValidationError::BirthdayFormat` for malformed text or impossible dates.
    /// - `ValidationError::BirthdayInFuture` when the date is after `today`.
    pub fn parse_at(text: &str, today: NaiveDate) -> Result<Self, ValidationError> {
        if !BIRTHDAY_RE.is_match(text) {
            return Err(ValidationError::BirthdayFormat(text.to_string()));
        }
        let date = NaiveDate::parse_from_str(text, BIRTHDAY_FORMAT)
            .map_err(|_| ValidationError::BirthdayFormat(text.to_string()))?;
        Self::from_date(date, today)
    }

    /// Wraps an already parsed date, validated against `today`.
    ///
    /// Used by restore paths that store dates outside the text format.
    pub fn from_date(date: NaiveDate, today: NaiveDate) -> Result<Self, ValidationError> {
        if date > today {
            return Err(ValidationError::BirthdayInFuture {
                birthday: date,
                today,
            });
        }
        Ok(Self(date))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Projects month and day onto `year`.
    ///
    /// 29 February lands on 28 February in non-leap years.
    pub fn anniversary_in(&self, year: i32) -> Option<NaiveDate> {
        self.0
            .with_year(year)
            .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
    }
}

impl Display for Birthday {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(BIRTHDAY_FORMAT))
    }
}
