//! Form controller module
//!
//! Validation, simulated-or-real submission and reset logic for the contact
//! form and the comment-with-photo form, plus the comment list they feed.
//!
//! # Validation rules
//!
//! | Field | Rule | Message |
//! |---|---|---|
//! | name | non-blank after trim | "Name is required" |
//! | email (contact only) | non-blank | "Email is required" |
//! | email (contact only) | matches `\S+@\S+\.\S+` | "Email is invalid" |
//! | message | non-blank after trim | "Message is required" |
//! | photo (comment only) | size ≤ `uploads.max_photo_bytes` (5 MiB) | "File size exceeds 5MB" |

pub mod comments;
pub mod controller;
pub mod photo;
pub mod validation;

pub use comments::{Comment, CommentList, JUST_NOW, escape_html};
pub use controller::{
    CommentForm, ContactForm, FormController, NotificationKind, Outcome, PhotoTicket,
};
pub use photo::{Photo, PhotoFile};
pub use validation::{
    Field, Fields, FormKind, ValidationErrors, is_valid_email, photo_too_large, validate,
};
