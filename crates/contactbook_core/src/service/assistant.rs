//! Command layer for the interactive contact assistant.
//!
//! # Responsibility
//! - Parse one input line into a `Command` with a checked argument count.
//! - Dispatch commands to `AddressBook` / `Record` operations.
//! - Render every outcome, including every domain error, as reply text.
//!
//! # Invariants
//! - Command names are case-insensitive; arguments are kept verbatim.
//! - Validation, not-found and already-set failures get distinct messages.
//! - A failed command never leaves a partially created contact behind.

use crate::model::address_book::AddressBook;
use crate::model::error::ContactError;
use crate::model::fields::{today, ValidationError};
use crate::model::record::Record;
use chrono::NaiveDate;
use log::{debug, warn};
use std::fmt::{Display, Formatter};

pub const GREETING: &str = "Welcome to the assistant bot!";

/// One parsed user command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Hello,
    Exit,
    Add { name: String, phone: String },
    Change { name: String, old_phone: String, new_phone: String },
    RemovePhone { name: String, phone: String },
    Phone { name: String },
    Delete { name: String },
    All,
    AddBirthday { name: String, birthday: String },
    ShowBirthday { name: String },
    Birthdays,
}

impl Command {
    /// Stable command label used in diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Hello => "hello",
            Self::Exit => "exit",
            Self::Add { .. } => "add",
            Self::Change { .. } => "change",
            Self::RemovePhone { .. } => "remove-phone",
            Self::Phone { .. } => "phone",
            Self::Delete { .. } => "delete",
            Self::All => "all",
            Self::AddBirthday { .. } => "add-birthday",
            Self::ShowBirthday { .. } => "show-birthday",
            Self::Birthdays => "birthdays",
        }
    }
}

/// Why an input line could not become a `Command`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Line holds no tokens.
    Empty,
    /// First token is not a known command.
    Unknown(String),
    /// Argument count does not match; carries the usage line.
    Usage(&'static str),
}

impl ParseError {
    /// Stable variant label used in diagnostics; carries no user text.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Unknown(_) => "unknown_command",
            Self::Usage(_) => "usage",
        }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => f.write_str("Please enter a command."),
            Self::Unknown(_) => f.write_str("Invalid command."),
            Self::Usage(usage) => write!(f, "Please input the command in the format: {usage}"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Splits `line` on whitespace and builds the matching command.
pub fn parse_command(line: &str) -> Result<Command, ParseError> {
    let mut tokens = line.split_whitespace();
    let name = tokens.next().ok_or(ParseError::Empty)?.to_lowercase();
    let args = tokens.map(str::to_string).collect::<Vec<_>>();

    match name.as_str() {
        "close" | "exit" => Ok(Command::Exit),
        "hello" => expect_args::<0>(args, "hello").map(|[]| Command::Hello),
        "add" => expect_args::<2>(args, "add [name] [phone]")
            .map(|[name, phone]| Command::Add { name, phone }),
        "change" => expect_args::<3>(args, "change [name] [old_phone] [new_phone]").map(
            |[name, old_phone, new_phone]| Command::Change {
                name,
                old_phone,
                new_phone,
            },
        ),
        "remove-phone" => expect_args::<2>(args, "remove-phone [name] [phone]")
            .map(|[name, phone]| Command::RemovePhone { name, phone }),
        "phone" => expect_args::<1>(args, "phone [name]").map(|[name]| Command::Phone { name }),
        "delete" => expect_args::<1>(args, "delete [name]").map(|[name]| Command::Delete { name }),
        "all" => expect_args::<0>(args, "all").map(|[]| Command::All),
        "add-birthday" => expect_args::<2>(args, "add-birthday [name] [birth_day]")
            .map(|[name, birthday]| Command::AddBirthday { name, birthday }),
        "show-birthday" => expect_args::<1>(args, "show-birthday [name]")
            .map(|[name]| Command::ShowBirthday { name }),
        "birthdays" => expect_args::<0>(args, "birthdays").map(|[]| Command::Birthdays),
        _ => Err(ParseError::Unknown(name)),
    }
}

fn expect_args<const N: usize>(
    args: Vec<String>,
    usage: &'static str,
) -> Result<[String; N], ParseError> {
    args.try_into().map_err(|_| ParseError::Usage(usage))
}

/// Text reply for one handled input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub message: String,
    /// Set when the user asked to leave the loop.
    pub exit: bool,
}

impl Reply {
    fn text(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exit: false,
        }
    }

    fn exit(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exit: true,
        }
    }
}

/// Interactive assistant owning the address book for one session.
pub struct Assistant {
    book: AddressBook,
}

impl Assistant {
    pub fn new(book: AddressBook) -> Self {
        Self { book }
    }

    pub fn book(&self) -> &AddressBook {
        &self.book
    }

    pub fn into_book(self) -> AddressBook {
        self.book
    }

    /// Parses and executes one input line against the local calendar date.
    pub fn handle_line(&mut self, line: &str) -> Reply {
        self.handle_line_at(line, today())
    }

    /// Parses and executes one input line against `today`.
    pub fn handle_line_at(&mut self, line: &str, today: NaiveDate) -> Reply {
        match parse_command(line) {
            Ok(command) => self.execute(command, today),
            Err(err) => {
                debug!(
                    "event=command_parse module=assistant status=rejected reason={}",
                    err.kind()
                );
                Reply::text(err.to_string())
            }
        }
    }

    /// Executes a parsed command.
    pub fn execute(&mut self, command: Command, today: NaiveDate) -> Reply {
        let label = command.label();
        let result = match command {
            Command::Hello => Ok("How can I help you?".to_string()),
            Command::Exit => return Reply::exit("Goodbye!"),
            Command::Add { name, phone } => self.add_contact(&name, &phone),
            Command::Change {
                name,
                old_phone,
                new_phone,
            } => self
                .book
                .find_mut(&name)
                .and_then(|record| record.edit_phone(&old_phone, &new_phone))
                .map(|()| "Phone updated.".to_string()),
            Command::RemovePhone { name, phone } => self
                .book
                .find_mut(&name)
                .and_then(|record| record.remove_phone(&phone))
                .map(|_| "Phone removed.".to_string()),
            Command::Phone { name } => self.book.find(&name).map(Record::to_string),
            Command::Delete { name } => self
                .book
                .delete(&name)
                .map(|_| "Contact deleted.".to_string()),
            Command::All => Ok(self.render_all()),
            Command::AddBirthday { name, birthday } => self
                .book
                .find_mut(&name)
                .and_then(|record| record.add_birthday_at(&birthday, today))
                .map(|()| "Birthday added.".to_string()),
            Command::ShowBirthday { name } => self.book.find(&name).map(|record| {
                match record.birthday() {
                    Some(birthday) => format!("{}: {birthday}", record.name()),
                    None => format!("{} has no birthday set.", record.name()),
                }
            }),
            Command::Birthdays => Ok(self.render_birthdays(today)),
        };

        match result {
            Ok(message) => {
                debug!("event=command_dispatch module=assistant status=ok command={label}");
                Reply::text(message)
            }
            Err(err) => {
                warn!(
                    "event=command_dispatch module=assistant status=error command={label} error_code={}",
                    error_code(&err)
                );
                Reply::text(describe_error(&err))
            }
        }
    }

    fn add_contact(&mut self, name: &str, phone: &str) -> Result<String, ContactError> {
        if let Ok(record) = self.book.find_mut(name) {
            record.add_phone(phone)?;
            return Ok("Phone added to existing contact.".to_string());
        }

        let mut record = Record::new(name);
        record.add_phone(phone)?;
        self.book.add_record(record);
        Ok("Contact added.".to_string())
    }

    fn render_all(&self) -> String {
        if self.book.is_empty() {
            return "No contacts available.".to_string();
        }
        self.book
            .records()
            .map(Record::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_birthdays(&self, today: NaiveDate) -> String {
        let upcoming = self.book.get_birthdays_per_week_at(today);
        if upcoming.is_empty() {
            return "No birthdays in the upcoming week.".to_string();
        }

        let mut lines = Vec::new();
        for (day, records) in &upcoming {
            lines.push(day.format("%A").to_string());
            lines.extend(records.iter().map(|record| format!("\t{record}")));
        }
        lines.join("\n")
    }
}

/// Maps a domain error to the user-facing reply text.
pub fn describe_error(err: &ContactError) -> String {
    match err {
        ContactError::Validation(ValidationError::PhoneLength { .. }) => {
            "Phone number must be exactly 10 characters long.".to_string()
        }
        ContactError::Validation(ValidationError::BirthdayFormat(_)) => {
            "Birthday should be in format DD.MM.YYYY (for example 30.12.1990).".to_string()
        }
        ContactError::Validation(ValidationError::BirthdayInFuture { .. }) => {
            "Birthday cannot be later than today.".to_string()
        }
        ContactError::RecordNotFound(name) => format!("No contact found for {name}."),
        ContactError::PhoneNotFound(phone) => format!("Phone {phone} is not in this contact."),
        ContactError::BirthdayAlreadySet { .. } => {
            "Failure. Birthday was already added to this contact.".to_string()
        }
    }
}

fn error_code(err: &ContactError) -> &'static str {
    match err {
        ContactError::Validation(_) => "validation_failed",
        ContactError::RecordNotFound(_) | ContactError::PhoneNotFound(_) => "not_found",
        ContactError::BirthdayAlreadySet { .. } => "already_set",
    }
}
