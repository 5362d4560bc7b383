//! Comment entries and the prepend-ordered comment list

use crate::forms::photo::Photo;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use uuid::Uuid;

/// Date label given to a freshly posted comment
pub const JUST_NOW: &str = "Just now";

/// A posted comment; never modified after creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Unique identifier
    pub id: Uuid,
    /// Author name
    pub name: String,
    /// Message body, stored exactly as entered
    pub message: String,
    /// Date label as shown next to the author
    pub date: String,
    /// When the comment was posted, if known
    pub posted_at: Option<DateTime<Utc>>,
    /// Optional author photo
    pub photo: Option<Photo>,
    /// Optional role badge (e.g. `Admin`)
    pub role: Option<String>,
    /// Whether the comment is pinned by the site owner
    pub pinned: bool,
}

impl Comment {
    /// A visitor comment posted at `now`
    pub fn new(
        name: impl Into<String>,
        message: impl Into<String>,
        photo: Option<Photo>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            message: message.into(),
            date: JUST_NOW.to_string(),
            posted_at: Some(now),
            photo,
            role: None,
            pinned: false,
        }
    }

    /// Whether the message comes from the site owner and may carry markup
    pub fn is_trusted(&self) -> bool {
        self.pinned && self.role.is_some()
    }

    /// Message ready for insertion into HTML
    ///
    /// Owner-pinned comments render verbatim; everything else is escaped so
    /// visitor input is shown as text.
    pub fn render_message(&self) -> Cow<'_, str> {
        if self.is_trusted() {
            Cow::Borrowed(&self.message)
        } else {
            escape_html(&self.message)
        }
    }

    /// Date label relative to `now`
    ///
    /// Comments without a timestamp keep their stored label.
    pub fn relative_label(&self, now: DateTime<Utc>) -> String {
        let Some(posted_at) = self.posted_at else {
            return self.date.clone();
        };
        let elapsed = now.signed_duration_since(posted_at);
        if elapsed.num_minutes() < 1 {
            JUST_NOW.to_string()
        } else if elapsed.num_hours() < 1 {
            format!("{}m ago", elapsed.num_minutes())
        } else if elapsed.num_days() < 1 {
            format!("{}h ago", elapsed.num_hours())
        } else if elapsed.num_days() < 7 {
            format!("{}d ago", elapsed.num_days())
        } else {
            posted_at.format("%b %-d, %Y").to_string()
        }
    }
}

/// Escape the five HTML-significant characters
pub fn escape_html(input: &str) -> Cow<'_, str> {
    if !input.contains(['<', '>', '&', '"', '\'']) {
        return Cow::Borrowed(input);
    }
    let mut out = String::with_capacity(input.len() + 16);
    for c in input.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Comments, newest first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentList {
    comments: Vec<Comment>,
}

impl CommentList {
    /// An empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// The entries the page ships with: a pinned welcome and two visitor comments
    pub fn seeded() -> Self {
        let seed = |name: &str, message: &str, date: &str| Comment {
            id: Uuid::new_v4(),
            name: name.to_string(),
            message: message.to_string(),
            date: date.to_string(),
            posted_at: None,
            photo: None,
            role: None,
            pinned: false,
        };

        let mut welcome = seed(
            "Ekizr",
            "Thanks for visiting! Contact me if you need anything",
            "Jun 2, 2025",
        );
        welcome.role = Some("Admin".to_string());
        welcome.pinned = true;

        Self {
            comments: vec![
                welcome,
                seed("asdas", "sosogosks", "2h ago"),
                seed(
                    "aisgyuasfiug",
                    "<a href=\"#\">aoiusdfgalsufkbfjk</a>",
                    "1d ago",
                ),
            ],
        }
    }

    /// Insert `comment` at index 0
    pub fn prepend(&mut self, comment: Comment) -> &Comment {
        self.comments.insert(0, comment);
        &self.comments[0]
    }

    /// Number of comments
    pub fn len(&self) -> usize {
        self.comments.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    /// Comment at `index`
    pub fn get(&self, index: usize) -> Option<&Comment> {
        self.comments.get(index)
    }

    /// Iterate newest first
    pub fn iter(&self) -> std::slice::Iter<'_, Comment> {
        self.comments.iter()
    }

    /// Heading shown above the list
    pub fn heading(&self) -> String {
        format!("Comments ({})", self.len())
    }
}

impl<'a> IntoIterator for &'a CommentList {
    type Item = &'a Comment;
    type IntoIter = std::slice::Iter<'a, Comment>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
