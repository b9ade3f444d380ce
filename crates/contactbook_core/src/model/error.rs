//! Domain errors raised by record and address book operations.

use crate::model::fields::{Birthday, Name, PhoneNumber, ValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ContactResult<T> = Result<T, ContactError>;

/// Error returned by `Record` and `AddressBook` operations.
///
/// Validation, lookup misses and repeated birthday assignment stay separate
/// variants so callers can report each one differently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactError {
    /// Input text failed field validation.
    Validation(ValidationError),
    /// No record is stored under this name.
    RecordNotFound(Name),
    /// The record holds no phone equal to this one.
    PhoneNotFound(PhoneNumber),
    /// The record already carries a birthday.
    BirthdayAlreadySet { name: Name, existing: Birthday },
}

impl ContactError {
    /// Returns whether this error reports a missing record or phone.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::RecordNotFound(_) | Self::PhoneNotFound(_))
    }
}

impl Display for ContactError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::RecordNotFound(name) => write!(f, "contact not found: {name}"),
            Self::PhoneNotFound(phone) => write!(f, "phone not found: {phone}"),
            Self::BirthdayAlreadySet { name, existing } => {
                write!(f, "birthday already set for {name}: {existing}")
            }
        }
    }
}

impl Error for ContactError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for ContactError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}
