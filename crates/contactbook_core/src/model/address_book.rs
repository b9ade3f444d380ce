//! Address book model and upcoming-week birthday query.
//!
//! # Responsibility
//! - Keep contact records keyed by unique name.
//! - Compute which contacts celebrate a birthday during the next calendar week.
//! - Capture and rebuild the book as plain serializable snapshots.
//!
//! # Invariants
//! - At most one record per distinct `Name`.
//! - Iteration is ascending by name.
//! - The birthday query never mutates the book and never returns a
//!   Saturday or Sunday key.

use crate::model::error::{ContactError, ContactResult};
use crate::model::fields::{today, Birthday, Name, PhoneNumber};
use crate::model::record::Record;
use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Birthdays grouped by the weekday they are reported on.
pub type WeeklyBirthdays<'a> = BTreeMap<NaiveDate, Vec<&'a Record>>;

/// Persistable view of one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSnapshot {
    pub name: String,
    pub phones: Vec<String>,
    pub birthday: Option<NaiveDate>,
}

/// Keyed collection of contact records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressBook {
    records: BTreeMap<Name, Record>,
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `record` under its name, replacing any previous record.
    ///
    /// Returns the replaced record. No merge happens.
    pub fn add_record(&mut self, record: Record) -> Option<Record> {
        self.records.insert(record.name().clone(), record)
    }

    pub fn find(&self, name: &str) -> ContactResult<&Record> {
        let key = Name::new(name);
        self.records
            .get(&key)
            .ok_or(ContactError::RecordNotFound(key))
    }

    pub fn find_mut(&mut self, name: &str) -> ContactResult<&mut Record> {
        let key = Name::new(name);
        self.records
            .get_mut(&key)
            .ok_or(ContactError::RecordNotFound(key))
    }

    /// Removes and returns the record stored under `name`.
    pub fn delete(&mut self, name: &str) -> ContactResult<Record> {
        let key = Name::new(name);
        self.records
            .remove(&key)
            .ok_or(ContactError::RecordNotFound(key))
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Iterates records in ascending name order.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    /// Birthdays in the next calendar week, relative to the local date.
    pub fn get_birthdays_per_week(&self) -> WeeklyBirthdays<'_> {
        self.get_birthdays_per_week_at(today())
    }

    /// Birthdays in the calendar week after the one containing `today`.
    ///
    /// Each birthday is projected onto `today`'s year, or onto the next year
    /// when that projection is strictly before `today`. Records landing on
    /// the window's Sunday, then Saturday, are appended to the Monday bucket
    /// and both weekend keys are dropped. An empty Monday bucket is never
    /// returned.
    pub fn get_birthdays_per_week_at(&self, today: NaiveDate) -> WeeklyBirthdays<'_> {
        let days_from_monday = u64::from(today.weekday().num_days_from_monday());
        let next_monday = today - Days::new(days_from_monday) + Days::new(7);
        let next_saturday = next_monday + Days::new(5);
        let next_sunday = next_monday + Days::new(6);

        let mut buckets = WeeklyBirthdays::new();
        for record in self.records.values() {
            let Some(projected) = record
                .birthday()
                .and_then(|birthday| upcoming_anniversary(birthday, today))
            else {
                continue;
            };

            if (next_monday..=next_sunday).contains(&projected) {
                buckets.entry(projected).or_default().push(record);
            }
        }

        for weekend_day in [next_sunday, next_saturday] {
            let moved = buckets.remove(&weekend_day).unwrap_or_default();
            buckets.entry(next_monday).or_default().extend(moved);
        }

        if buckets.get(&next_monday).is_some_and(Vec::is_empty) {
            buckets.remove(&next_monday);
        }

        buckets
    }

    /// Captures every record as a snapshot, in name order.
    pub fn snapshot(&self) -> Vec<RecordSnapshot> {
        self.records
            .values()
            .map(|record| RecordSnapshot {
                name: record.name().as_str().to_string(),
                phones: record
                    .phones()
                    .iter()
                    .map(|phone| phone.as_str().to_string())
                    .collect(),
                birthday: record.birthday().map(Birthday::date),
            })
            .collect()
    }

    /// Rebuilds a book from snapshots, re-validating every field.
    ///
    /// Later snapshots win when names repeat, matching `add_record`.
    pub fn from_snapshot(
        snapshots: impl IntoIterator<Item = RecordSnapshot>,
        today: NaiveDate,
    ) -> ContactResult<Self> {
        let mut book = Self::new();
        for snapshot in snapshots {
            let phones = snapshot
                .phones
                .into_iter()
                .map(PhoneNumber::parse)
                .collect::<Result<Vec<_>, _>>()?;
            let birthday = snapshot
                .birthday
                .map(|date| Birthday::from_date(date, today))
                .transpose()?;
            book.add_record(Record::from_parts(
                Name::new(snapshot.name),
                phones,
                birthday,
            ));
        }
        Ok(book)
    }
}

fn upcoming_anniversary(birthday: &Birthday, today: NaiveDate) -> Option<NaiveDate> {
    let this_year = birthday.anniversary_in(today.year())?;
    if this_year < today {
        return birthday.anniversary_in(today.year() + 1);
    }
    Some(this_year)
}
