//! Field validation for the contact and comment forms

use regex::Regex;
use smallvec::SmallVec;
use std::borrow::Cow;
use std::fmt;
use std::sync::LazyLock;

/// `\S+@\S+\.\S+`, unanchored: any match inside the value is enough.
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is a valid regex"));

/// Message for a blank name
pub const NAME_REQUIRED: &str = "Name is required";
/// Message for a blank email
pub const EMAIL_REQUIRED: &str = "Email is required";
/// Message for an email failing the pattern
pub const EMAIL_INVALID: &str = "Email is invalid";
/// Message for a blank message
pub const MESSAGE_REQUIRED: &str = "Message is required";
/// Message for a photo that could not be read
pub const PHOTO_UNREADABLE: &str = "Could not read the selected file";

/// Which form is being validated or submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    /// Name, email and message
    Contact,
    /// Name, message and optional photo
    Comment,
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Contact => "contact",
            Self::Comment => "comment",
        })
    }
}

/// Form field identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    /// Author name
    Name,
    /// Contact email
    Email,
    /// Message body
    Message,
    /// Comment photo
    Photo,
}

impl Field {
    /// Field name as used by the view
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
            Self::Photo => "photo",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field-to-message mapping; empty means the form may be submitted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    entries: SmallVec<[(Field, Cow<'static, str>); 4]>,
}

impl ValidationErrors {
    /// No errors
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether there are no errors
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of fields with an error
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Error message for `field`, if any
    pub fn get(&self, field: Field) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, message)| message.as_ref())
    }

    /// Set or replace the error for `field`
    pub fn set(&mut self, field: Field, message: impl Into<Cow<'static, str>>) {
        let message = message.into();
        if let Some(entry) = self.entries.iter_mut().find(|(f, _)| *f == field) {
            entry.1 = message;
        } else {
            self.entries.push((field, message));
        }
    }

    /// Remove the error for `field`
    pub fn remove(&mut self, field: Field) {
        self.entries.retain(|(f, _)| *f != field);
    }

    /// Remove and return the error for `field`
    pub fn take(&mut self, field: Field) -> Option<Cow<'static, str>> {
        let index = self.entries.iter().position(|(f, _)| *f == field)?;
        Some(self.entries.remove(index).1)
    }

    /// Drop every error
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterate errors in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        self.entries
            .iter()
            .map(|(field, message)| (*field, message.as_ref()))
    }
}

/// Borrowed view of the text fields being validated
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    /// Author name
    pub name: &'a str,
    /// Email, ignored for comments
    pub email: &'a str,
    /// Message body
    pub message: &'a str,
}

/// Message for a photo above `limit` bytes, e.g. "File size exceeds 5MB"
pub fn photo_too_large(limit: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * 1024;

    let size = if limit >= MIB && limit % MIB == 0 {
        format!("{}MB", limit / MIB)
    } else if limit >= KIB && limit % KIB == 0 {
        format!("{}KB", limit / KIB)
    } else {
        format!("{limit} bytes")
    };
    format!("File size exceeds {size}")
}

/// Whether `email` matches the simple `\S+@\S+\.\S+` shape
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Validate `fields` for the given form kind
pub fn validate(fields: &Fields<'_>, kind: FormKind) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if fields.name.trim().is_empty() {
        errors.set(Field::Name, NAME_REQUIRED);
    }

    if kind == FormKind::Contact {
        if fields.email.trim().is_empty() {
            errors.set(Field::Email, EMAIL_REQUIRED);
        } else if !is_valid_email(fields.email) {
            errors.set(Field::Email, EMAIL_INVALID);
        }
    }

    if fields.message.trim().is_empty() {
        errors.set(Field::Message, MESSAGE_REQUIRED);
    }

    errors
}
