//! Form state machine for the contact and comment forms
//!
//! The controller is synchronous: `begin_*` methods validate and hand back
//! the work to perform off-thread, `finish_*` methods apply the outcome.
//! The page controller owns the threads and the notification timer.
//!
//! ```text
//! Idle → validate ─┬─ errors ──────────────→ Idle (errors shown, fields kept)
//!                  └─ ok → Submitting ─┬─ Ack ─→ Idle (cleared, success toast)
//!                                      └─ Err ─→ Idle (fields kept, error toast)
//! ```

use crate::error::{FolioError, Result};
use crate::forms::comments::{Comment, CommentList};
use crate::forms::photo::{self, Photo, PhotoFile};
use crate::forms::validation::{
    Field, Fields, FormKind, PHOTO_UNREADABLE, ValidationErrors, photo_too_large, validate,
};
use crate::submission::{Ack, Submission};
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

/// Contact form fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    /// Sender name
    pub name: String,
    /// Reply address
    pub email: String,
    /// Message body
    pub message: String,
}

/// Comment form fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentForm {
    /// Author name
    pub name: String,
    /// Comment body
    pub message: String,
    /// Accepted photo, if any
    pub photo: Option<Photo>,
}

/// Transient toast severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// Operation completed
    Success,
    /// Operation failed
    Error,
}

/// Toast text produced by a completed submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Severity
    pub kind: NotificationKind,
    /// Text to display
    pub message: &'static str,
}

/// Photo accepted for decoding; `generation` identifies the upload
#[derive(Debug, Clone)]
pub struct PhotoTicket {
    /// Upload generation the decode result must match
    pub generation: u64,
    /// File to decode
    pub file: PhotoFile,
    /// Byte ceiling to enforce again while reading
    pub limit: u64,
}

impl PhotoTicket {
    /// Read and encode the ticket's file
    pub fn decode(&self) -> Result<Photo> {
        photo::encode_data_uri(&self.file, self.limit)
    }
}

/// Validation, submission and reset logic for both forms
#[derive(Debug, Clone)]
pub struct FormController {
    contact: ContactForm,
    contact_errors: ValidationErrors,
    comment: CommentForm,
    comment_errors: ValidationErrors,
    comments: CommentList,
    submitting: Option<FormKind>,
    max_photo_bytes: u64,
    photo_generation: u64,
}

impl FormController {
    /// Create empty forms over `comments`
    pub fn new(comments: CommentList, max_photo_bytes: u64) -> Self {
        Self {
            contact: ContactForm::default(),
            contact_errors: ValidationErrors::new(),
            comment: CommentForm::default(),
            comment_errors: ValidationErrors::new(),
            comments,
            submitting: None,
            max_photo_bytes,
            photo_generation: 0,
        }
    }

    /// Contact form fields
    pub fn contact(&self) -> &ContactForm {
        &self.contact
    }

    /// Contact form errors
    pub fn contact_errors(&self) -> &ValidationErrors {
        &self.contact_errors
    }

    /// Comment form fields
    pub fn comment(&self) -> &CommentForm {
        &self.comment
    }

    /// Comment form errors, including the photo error
    pub fn comment_errors(&self) -> &ValidationErrors {
        &self.comment_errors
    }

    /// Posted comments, newest first
    pub fn comments(&self) -> &CommentList {
        &self.comments
    }

    /// Form with a submission in flight, if any
    pub fn submitting(&self) -> Option<FormKind> {
        self.submitting
    }

    /// Whether any submission is in flight
    pub fn is_submitting(&self) -> bool {
        self.submitting.is_some()
    }

    /// Update one contact field; `Photo` is ignored
    pub fn set_contact_field(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.contact.name = value,
            Field::Email => self.contact.email = value,
            Field::Message => self.contact.message = value,
            Field::Photo => debug!("Contact form has no photo field"),
        }
    }

    /// Update one comment text field; `Email` and `Photo` are ignored
    pub fn set_comment_field(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.comment.name = value,
            Field::Message => self.comment.message = value,
            Field::Email | Field::Photo => debug!("Comment form has no {} text field", field),
        }
    }

    /// Validate `kind` and, when valid, enter the submitting state
    ///
    /// Returns `Ok(None)` when validation failed (errors are stored and
    /// nothing else changes) and `Ok(Some(payload))` when the payload should
    /// be delivered. Fails if another submission is still in flight.
    pub fn begin_submit(&mut self, kind: FormKind) -> Result<Option<Submission>> {
        if let Some(in_flight) = self.submitting {
            warn!(
                "Ignoring {} submission while {} submission is in flight",
                kind, in_flight
            );
            return Err(FolioError::SubmissionInProgress);
        }

        let errors = match kind {
            FormKind::Contact => validate(
                &Fields {
                    name: &self.contact.name,
                    email: &self.contact.email,
                    message: &self.contact.message,
                },
                kind,
            ),
            FormKind::Comment => validate(
                &Fields {
                    name: &self.comment.name,
                    email: "",
                    message: &self.comment.message,
                },
                kind,
            ),
        };

        if !errors.is_empty() {
            debug!("{} form has {} invalid field(s)", kind, errors.len());
            match kind {
                FormKind::Contact => self.contact_errors = errors,
                FormKind::Comment => {
                    // A pending photo error survives text validation
                    let photo_error = self.comment_errors.take(Field::Photo);
                    self.comment_errors = errors;
                    if let Some(message) = photo_error {
                        self.comment_errors.set(Field::Photo, message);
                    }
                }
            }
            return Ok(None);
        }

        let payload = match kind {
            FormKind::Contact => Submission::Contact {
                name: self.contact.name.clone(),
                email: self.contact.email.clone(),
                message: self.contact.message.clone(),
            },
            FormKind::Comment => Submission::Comment {
                name: self.comment.name.clone(),
                message: self.comment.message.clone(),
                photo: self.comment.photo.as_ref().map(|p| p.data_uri().to_string()),
            },
        };

        info!("Submitting {} form", kind);
        self.submitting = Some(kind);
        Ok(Some(payload))
    }

    /// Apply the backend's answer for `kind`
    ///
    /// Success resets the form, clears its errors and, for comments, prepends
    /// the new comment. Failure keeps the entered values. The submitting
    /// state clears either way.
    pub fn finish_submit(
        &mut self,
        kind: FormKind,
        result: &Result<Ack>,
        now: DateTime<Utc>,
    ) -> Outcome {
        if self.submitting != Some(kind) {
            warn!("Completion for {} form without a matching submission", kind);
        }
        self.submitting = None;

        match (kind, result) {
            (FormKind::Contact, Ok(_)) => {
                info!("Contact message sent");
                self.contact = ContactForm::default();
                self.contact_errors.clear();
                Outcome {
                    kind: NotificationKind::Success,
                    message: "Message sent successfully!",
                }
            }
            (FormKind::Comment, Ok(_)) => {
                self.post_comment(now);
                self.comment = CommentForm::default();
                self.comment_errors.clear();
                // Any decode still in flight belongs to the cleared form
                self.photo_generation += 1;
                Outcome {
                    kind: NotificationKind::Success,
                    message: "Comment posted!",
                }
            }
            (FormKind::Contact, Err(e)) => {
                warn!("Failed to send contact message: {}", e);
                Outcome {
                    kind: NotificationKind::Error,
                    message: "Failed to send message. Try again.",
                }
            }
            (FormKind::Comment, Err(e)) => {
                warn!("Failed to post comment: {}", e);
                Outcome {
                    kind: NotificationKind::Error,
                    message: "Failed to post comment.",
                }
            }
        }
    }

    /// Build a comment from the current comment form and prepend it
    pub fn post_comment(&mut self, now: DateTime<Utc>) -> &Comment {
        let comment = Comment::new(
            self.comment.name.clone(),
            self.comment.message.clone(),
            self.comment.photo.clone(),
            now,
        );
        info!("Posting comment by {}", comment.name);
        self.comments.prepend(comment)
    }

    /// Check a picked photo against the size ceiling
    ///
    /// Oversized files set the photo error and leave any accepted photo in
    /// place. Accepted files clear the photo error and return a ticket to
    /// decode.
    pub fn begin_photo_upload(&mut self, file: PhotoFile) -> Option<PhotoTicket> {
        if let Err(e) = photo::check_size(&file, self.max_photo_bytes) {
            warn!("Rejected photo {}: {}", file.name(), e);
            self.comment_errors
                .set(Field::Photo, photo_too_large(self.max_photo_bytes));
            return None;
        }

        self.comment_errors.remove(Field::Photo);
        self.photo_generation += 1;
        debug!(
            "Accepted photo {} ({} bytes) as upload {}",
            file.name(),
            file.size(),
            self.photo_generation
        );
        Some(PhotoTicket {
            generation: self.photo_generation,
            file,
            limit: self.max_photo_bytes,
        })
    }

    /// Store a decoded photo if it belongs to the latest upload
    ///
    /// A failed decode sets the photo error and keeps any earlier photo.
    /// Returns `true` if the form changed.
    pub fn finish_photo_upload(&mut self, generation: u64, result: Result<Photo>) -> bool {
        if generation != self.photo_generation {
            debug!(
                "Discarding stale photo decode {} (current {})",
                generation, self.photo_generation
            );
            return false;
        }
        match result {
            Ok(photo) => {
                self.comment.photo = Some(photo);
                true
            }
            Err(FolioError::PhotoTooLarge { size, limit }) => {
                warn!("Photo exceeded {} bytes while reading ({}+)", limit, size);
                self.comment_errors.set(Field::Photo, photo_too_large(limit));
                true
            }
            Err(e) => {
                warn!("Failed to decode photo: {}", e);
                self.comment_errors.set(Field::Photo, PHOTO_UNREADABLE);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StringError;
    use crate::forms::validation::{EMAIL_INVALID, NAME_REQUIRED};
    use crate::test_utils::{create_test_dir, tiny_png};

    const LIMIT: u64 = 5 * 1024 * 1024;

    fn controller() -> FormController {
        FormController::new(CommentList::seeded(), LIMIT)
    }

    fn fill_contact(c: &mut FormController, name: &str, email: &str, message: &str) {
        c.set_contact_field(Field::Name, name);
        c.set_contact_field(Field::Email, email);
        c.set_contact_field(Field::Message, message);
    }

    #[test]
    fn test_invalid_contact_keeps_fields() {
        let mut c = controller();
        fill_contact(&mut c, "", "x", "hi");

        assert!(c.begin_submit(FormKind::Contact).unwrap().is_none());
        assert_eq!(c.contact_errors().get(Field::Name), Some(NAME_REQUIRED));
        assert_eq!(c.contact_errors().get(Field::Email), Some(EMAIL_INVALID));
        assert_eq!(c.contact_errors().len(), 2);
        assert_eq!(c.contact().email, "x");
        assert!(!c.is_submitting());
    }

    #[test]
    fn test_valid_contact_resets_on_success() {
        let mut c = controller();
        fill_contact(&mut c, "Jo", "jo@x.com", "hello");

        let payload = c.begin_submit(FormKind::Contact).unwrap().unwrap();
        assert!(matches!(payload, Submission::Contact { ref name, .. } if name == "Jo"));
        assert_eq!(c.submitting(), Some(FormKind::Contact));

        let outcome = c.finish_submit(FormKind::Contact, &Ok(Ack::default()), Utc::now());
        assert_eq!(outcome.kind, NotificationKind::Success);
        assert_eq!(outcome.message, "Message sent successfully!");
        assert_eq!(c.contact(), &ContactForm::default());
        assert!(c.contact_errors().is_empty());
        assert!(!c.is_submitting());
    }

    #[test]
    fn test_failure_preserves_values() {
        let mut c = controller();
        fill_contact(&mut c, "Jo", "jo@x.com", "hello");
        c.begin_submit(FormKind::Contact).unwrap();

        let err = Err(FolioError::SubmissionFailed(StringError::new("offline")));
        let outcome = c.finish_submit(FormKind::Contact, &err, Utc::now());
        assert_eq!(outcome.kind, NotificationKind::Error);
        assert_eq!(outcome.message, "Failed to send message. Try again.");
        assert_eq!(c.contact().name, "Jo");
        assert!(!c.is_submitting());
    }

    #[test]
    fn test_resubmission_rejected_while_in_flight() {
        let mut c = controller();
        fill_contact(&mut c, "Jo", "jo@x.com", "hello");
        c.set_comment_field(Field::Name, "Ann");
        c.set_comment_field(Field::Message, "hey");
        c.begin_submit(FormKind::Contact).unwrap();

        assert!(matches!(
            c.begin_submit(FormKind::Contact),
            Err(FolioError::SubmissionInProgress)
        ));
        assert!(matches!(
            c.begin_submit(FormKind::Comment),
            Err(FolioError::SubmissionInProgress)
        ));
    }

    #[test]
    fn test_comment_success_prepends_and_resets() {
        let mut c = controller();
        c.set_comment_field(Field::Name, "Ann");
        c.set_comment_field(Field::Message, "great work");
        let ticket = c
            .begin_photo_upload(PhotoFile::from_bytes("me.png", tiny_png()))
            .unwrap();
        let decoded = ticket.decode();
        assert!(c.finish_photo_upload(ticket.generation, decoded));

        let payload = c.begin_submit(FormKind::Comment).unwrap().unwrap();
        assert!(matches!(payload, Submission::Comment { photo: Some(_), .. }));

        let outcome = c.finish_submit(FormKind::Comment, &Ok(Ack::default()), Utc::now());
        assert_eq!(outcome.message, "Comment posted!");
        assert_eq!(c.comments().len(), 4);
        let newest = c.comments().get(0).unwrap();
        assert_eq!(newest.name, "Ann");
        assert_eq!(newest.date, "Just now");
        assert!(newest.photo.is_some());
        assert_eq!(c.comment(), &CommentForm::default());
    }

    #[test]
    fn test_comment_failure_does_not_post() {
        let mut c = controller();
        c.set_comment_field(Field::Name, "Ann");
        c.set_comment_field(Field::Message, "great work");
        c.begin_submit(FormKind::Comment).unwrap();

        let err = Err(FolioError::SubmissionFailed(StringError::new("offline")));
        let outcome = c.finish_submit(FormKind::Comment, &err, Utc::now());
        assert_eq!(outcome.message, "Failed to post comment.");
        assert_eq!(c.comments().len(), 3);
        assert_eq!(c.comment().name, "Ann");
    }

    #[test]
    fn test_oversized_photo_keeps_previous() {
        let mut c = controller();
        let ticket = c
            .begin_photo_upload(PhotoFile::from_bytes("a.png", tiny_png()))
            .unwrap();
        let decoded = ticket.decode();
        c.finish_photo_upload(ticket.generation, decoded);
        let accepted = c.comment().photo.clone();
        assert!(accepted.is_some());

        let big = PhotoFile::from_bytes("b.png", vec![0; 5 * 1024 * 1024 + 1]);
        assert!(c.begin_photo_upload(big).is_none());
        assert_eq!(c.comment_errors().get(Field::Photo), Some("File size exceeds 5MB"));
        assert_eq!(c.comment().photo, accepted);

        // A valid upload clears the error
        assert!(
            c.begin_photo_upload(PhotoFile::from_bytes("c.png", vec![0; 5 * 1024 * 1024]))
                .is_some()
        );
        assert_eq!(c.comment_errors().get(Field::Photo), None);
    }

    #[test]
    fn test_photo_grown_on_disk_keeps_previous() {
        let mut c = controller();
        let ticket = c
            .begin_photo_upload(PhotoFile::from_bytes("a.png", tiny_png()))
            .unwrap();
        let decoded = ticket.decode();
        c.finish_photo_upload(ticket.generation, decoded);
        let accepted = c.comment().photo.clone();

        let temp_dir = create_test_dir();
        let path = temp_dir.path().join("b.png");
        std::fs::write(&path, vec![0u8; 10]).unwrap();
        let ticket = c
            .begin_photo_upload(PhotoFile::from_path(&path).unwrap())
            .unwrap();
        std::fs::write(&path, vec![0u8; 6 * 1024 * 1024]).unwrap();

        let decoded = ticket.decode();
        assert!(c.finish_photo_upload(ticket.generation, decoded));
        assert_eq!(c.comment().photo, accepted);
        assert_eq!(
            c.comment_errors().get(Field::Photo),
            Some("File size exceeds 5MB")
        );
    }

    #[test]
    fn test_photo_error_names_configured_limit() {
        let mut c = FormController::new(CommentList::new(), 2 * 1024 * 1024);
        let big = PhotoFile::from_bytes("b.png", vec![0; 2 * 1024 * 1024 + 1]);
        assert!(c.begin_photo_upload(big).is_none());
        assert_eq!(
            c.comment_errors().get(Field::Photo),
            Some("File size exceeds 2MB")
        );
    }

    #[test]
    fn test_post_comment_returns_newest() {
        let mut c = controller();
        c.set_comment_field(Field::Name, "Ann");
        c.set_comment_field(Field::Message, "hi");
        let id = c.post_comment(Utc::now()).id;
        assert_eq!(c.comments().get(0).unwrap().id, id);
        assert_eq!(c.comments().len(), 4);
    }

    #[test]
    fn test_stale_photo_decode_is_discarded() {
        let mut c = controller();
        let first = c
            .begin_photo_upload(PhotoFile::from_bytes("a.png", tiny_png()))
            .unwrap();
        let second = c
            .begin_photo_upload(PhotoFile::from_bytes("b.png", tiny_png()))
            .unwrap();

        let stale = first.decode();
        assert!(!c.finish_photo_upload(first.generation, stale));
        assert!(c.comment().photo.is_none());

        let fresh = second.decode();
        assert!(c.finish_photo_upload(second.generation, fresh));
        assert!(c.comment().photo.is_some());
    }

    #[test]
    fn test_photo_error_survives_text_validation() {
        let mut c = controller();
        c.begin_photo_upload(PhotoFile::from_bytes("b.png", vec![0; 6 * 1024 * 1024]));
        assert!(c.begin_submit(FormKind::Comment).unwrap().is_none());
        assert_eq!(c.comment_errors().get(Field::Photo), Some("File size exceeds 5MB"));
        assert_eq!(c.comment_errors().get(Field::Name), Some(NAME_REQUIRED));
    }
}
