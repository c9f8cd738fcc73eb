use crate::error::FieldError;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

pub const PRIORITY_NONE: &str = "none";
pub const PRIORITY_LOW: &str = "low";
pub const PRIORITY_MEDIUM: &str = "mid";
pub const PRIORITY_HIGH: &str = "hi";

const DEADLINE_DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";
const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M", "%d/%m/%Y %H:%M"];
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Name(String);

impl Name {
    pub fn new(raw: &str) -> Result<Self, FieldError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(FieldError::new("name", "task names should not be blank"));
        }
        Ok(Name(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Task priority. Users type `none`/`low`/`mid`/`hi`; storage keeps the
/// upper-case variant names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    #[default]
    None,
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn is_valid_priority(raw: &str) -> bool {
        Self::parse_user_input(raw).is_ok()
    }

    pub fn parse_user_input(raw: &str) -> Result<Self, FieldError> {
        match raw.trim() {
            PRIORITY_NONE => Ok(Priority::None),
            PRIORITY_LOW => Ok(Priority::Low),
            PRIORITY_MEDIUM => Ok(Priority::Medium),
            PRIORITY_HIGH => Ok(Priority::High),
            _ => Err(FieldError::new(
                "priority",
                "priority can only be none, low, mid or hi",
            )),
        }
    }

    pub fn parse_persisted(raw: &str) -> Result<Self, FieldError> {
        match raw {
            "NONE" => Ok(Priority::None),
            "LOW" => Ok(Priority::Low),
            "MEDIUM" => Ok(Priority::Medium),
            "HIGH" => Ok(Priority::High),
            other => Err(FieldError::new(
                "priority",
                format!("unknown stored priority '{}'", other),
            )),
        }
    }

    pub fn as_persisted(&self) -> &'static str {
        match self {
            Priority::None => "NONE",
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            Priority::None => PRIORITY_NONE,
            Priority::Low => PRIORITY_LOW,
            Priority::Medium => PRIORITY_MEDIUM,
            Priority::High => PRIORITY_HIGH,
        };
        f.write_str(token)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Incomplete,
    Complete,
}

impl Status {
    pub fn new(raw: &str) -> Result<Self, FieldError> {
        match raw.trim() {
            "incomplete" => Ok(Status::Incomplete),
            "complete" => Ok(Status::Complete),
            _ => Err(FieldError::new(
                "status",
                "status can only be complete or incomplete",
            )),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Incomplete => f.write_str("incomplete"),
            Status::Complete => f.write_str("complete"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Note(String);

impl Note {
    pub fn new(raw: &str) -> Result<Self, FieldError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(FieldError::new("note", "notes should not be blank"));
        }
        Ok(Note(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Deadline(NaiveDateTime);

impl Deadline {
    /// Accepts `YYYY-MM-DD`, `DD/MM/YYYY`, optionally followed by `HH:MM`.
    /// A bare date is taken as midnight.
    pub fn new(raw: &str) -> Result<Self, FieldError> {
        let trimmed = raw.trim();
        for format in DATE_TIME_FORMATS {
            if let Ok(value) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Ok(Deadline(value));
            }
        }
        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
                return Ok(Deadline(date.and_time(chrono::NaiveTime::MIN)));
            }
        }
        Err(FieldError::new(
            "deadline",
            "deadlines should look like 2024-01-31 or 31/01/2024, optionally followed by HH:MM",
        ))
    }

    pub fn value(&self) -> NaiveDateTime {
        self.0
    }

    pub fn to_persisted(&self) -> String {
        self.0.format(DEADLINE_DISPLAY_FORMAT).to_string()
    }
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DEADLINE_DISPLAY_FORMAT))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Tag(String);

impl Tag {
    pub fn new(raw: &str) -> Result<Self, FieldError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || !trimmed.chars().all(char::is_alphanumeric) {
            return Err(FieldError::new("tag", "tag names should be alphanumeric"));
        }
        Ok(Tag(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0)
    }
}

/// Two tasks are duplicates when every field below is equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub name: Name,
    pub priority: Priority,
    pub status: Status,
    pub note: Option<Note>,
    pub deadline: Option<Deadline>,
    pub tags: BTreeSet<Tag>,
}

impl Task {
    pub fn new(name: Name) -> Self {
        Task {
            name,
            priority: Priority::default(),
            status: Status::default(),
            note: None,
            deadline: None,
            tags: BTreeSet::new(),
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Priority: {} Status: {}",
            self.name, self.priority, self.status
        )?;
        if let Some(note) = &self.note {
            write!(f, " Note: {}", note)?;
        }
        if let Some(deadline) = &self.deadline {
            write!(f, " Deadline: {}", deadline)?;
        }
        if !self.tags.is_empty() {
            f.write_str(" Tags: ")?;
            for tag in &self.tags {
                write!(f, "{}", tag)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_validity() {
        assert!(!Priority::is_valid_priority(""));
        assert!(!Priority::is_valid_priority(" "));

        for token in ["none", "hi", "mid", "low"] {
            assert!(Priority::is_valid_priority(token), "{} should be valid", token);
        }
        assert!(Priority::is_valid_priority("  hi "));
        assert!(!Priority::is_valid_priority("HI"));
    }

    #[test]
    fn priority_rejects_persisted_form_as_user_input() {
        assert!(Priority::parse_user_input("HIGH").is_err());
        assert!(Priority::parse_user_input("1a$").is_err());
    }

    #[test]
    fn priority_user_tokens_round_trip() {
        assert_eq!(Priority::parse_user_input("none").unwrap(), Priority::None);
        assert_eq!(Priority::parse_user_input("hi").unwrap(), Priority::High);
        assert_eq!(Priority::parse_user_input("mid").unwrap(), Priority::Medium);
        assert_eq!(Priority::parse_user_input("low").unwrap(), Priority::Low);

        for token in [PRIORITY_NONE, PRIORITY_LOW, PRIORITY_MEDIUM, PRIORITY_HIGH] {
            assert_eq!(Priority::parse_user_input(token).unwrap().to_string(), token);
        }
    }

    #[test]
    fn priority_persisted_round_trip() {
        for stored in ["NONE", "LOW", "MEDIUM", "HIGH"] {
            assert_eq!(Priority::parse_persisted(stored).unwrap().as_persisted(), stored);
        }
        assert!(Priority::parse_persisted("NON").is_err());
    }

    #[test]
    fn deadline_formats() {
        let midnight = Deadline::new("2024-01-01").unwrap();
        assert_eq!(midnight.to_string(), "2024-01-01 00:00");
        assert_eq!(Deadline::new("01/01/2024").unwrap(), midnight);
        assert_eq!(
            Deadline::new("31/12/2024 18:30").unwrap().to_string(),
            "2024-12-31 18:30"
        );
        assert!(Deadline::new("tomorrow").is_err());
        assert!(Deadline::new("").is_err());
    }

    #[test]
    fn blank_and_symbolic_values_rejected() {
        assert!(Name::new("   ").is_err());
        assert!(Note::new("").is_err());
        assert!(Tag::new("").is_err());
        assert!(Tag::new("with space").is_err());
        assert!(Tag::new("urgent").is_ok());
        assert!(Status::new("done").is_err());
        assert_eq!(Status::new(" complete ").unwrap(), Status::Complete);
    }
}
