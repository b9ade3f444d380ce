//! Contact record model.
//!
//! # Responsibility
//! - Own one contact: name, ordered phones and optional birthday.
//! - Validate every phone argument before touching stored phones.
//!
//! # Invariants
//! - Phone order is insertion order; edits keep the original position.
//! - Lookups use first-match semantics when duplicates exist.
//! - A birthday, once set, is never replaced.

use crate::model::error::{ContactError, ContactResult};
use crate::model::fields::{today, Birthday, Name, PhoneNumber};
use chrono::NaiveDate;
use std::fmt::{Display, Formatter};

/// One contact stored in an `AddressBook`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    name: Name,
    phones: Vec<PhoneNumber>,
    birthday: Option<Birthday>,
}

impl Record {
    /// Creates a record with no phones and no birthday.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Name::new(name),
            phones: Vec::new(),
            birthday: None,
        }
    }

    /// Rebuilds a record from already validated parts.
    pub(crate) fn from_parts(
        name: Name,
        phones: Vec<PhoneNumber>,
        birthday: Option<Birthday>,
    ) -> Self {
        Self {
            name,
            phones,
            birthday,
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn phones(&self) -> &[PhoneNumber] {
        &self.phones
    }

    pub fn birthday(&self) -> Option<&Birthday> {
        self.birthday.as_ref()
    }

    /// Appends a phone. Duplicates are kept.
    pub fn add_phone(&mut self, phone: &str) -> ContactResult<()> {
        self.phones.push(PhoneNumber::parse(phone)?);
        Ok(())
    }

    /// Removes the first phone equal to `phone` and returns it.
    pub fn remove_phone(&mut self, phone: &str) -> ContactResult<PhoneNumber> {
        let phone = PhoneNumber::parse(phone)?;
        let index = self.position_of(&phone)?;
        Ok(self.phones.remove(index))
    }

    /// Replaces the first phone equal to `old` with `new`, in place.
    ///
    /// Both values are validated before the lookup.
    pub fn edit_phone(&mut self, old: &str, new: &str) -> ContactResult<()> {
        let old = PhoneNumber::parse(old)?;
        let new = PhoneNumber::parse(new)?;
        let index = self.position_of(&old)?;
        self.phones[index] = new;
        Ok(())
    }

    /// Returns the first stored phone equal to `number`.
    pub fn find_phone(&self, number: &str) -> ContactResult<&PhoneNumber> {
        let phone = PhoneNumber::parse(number)?;
        let index = self.position_of(&phone)?;
        Ok(&self.phones[index])
    }

    /// Sets the birthday from `DD.MM.YYYY` text, checked against the local date.
    pub fn add_birthday(&mut self, text: &str) -> ContactResult<()> {
        self.add_birthday_at(text, today())
    }

    /// Sets the birthday from `DD.MM.YYYY` text, checked against `today`.
    ///
    /// # Errors
    /// - `ContactError::BirthdayAlreadySet` when a birthday exists; checked
    ///   before the text is parsed.
    /// - `ContactError::Validation` for malformed or future dates.
    pub fn add_birthday_at(&mut self, text: &str, today: NaiveDate) -> ContactResult<()> {
        if let Some(existing) = self.birthday {
            return Err(ContactError::BirthdayAlreadySet {
                name: self.name.clone(),
                existing,
            });
        }
        self.birthday = Some(Birthday::parse_at(text, today)?);
        Ok(())
    }

    fn position_of(&self, phone: &PhoneNumber) -> ContactResult<usize> {
        self.phones
            .iter()
            .position(|stored| stored == phone)
            .ok_or_else(|| ContactError::PhoneNotFound(phone.clone()))
    }
}

impl Display for Record {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let phones = self
            .phones
            .iter()
            .map(PhoneNumber::as_str)
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "Contact name: {}, phones: {}", self.name, phones)
    }
}
