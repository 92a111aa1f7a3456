//! URL-safe identifiers for users, projects and teams.
//!
//! Slugs are trimmed, non-empty identifiers composed of ASCII letters,
//! digits, hyphens and underscores. Lookups validate the slug before touching
//! a repository so malformed path segments resolve to "not found".

use std::fmt;

/// Validation errors returned by [`Slug::parse`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlugValidationError {
    /// The slug was empty.
    #[error("slug must not be empty")]
    Empty,
    /// The slug contained a character outside the allowed set.
    #[error("slug may only contain ASCII letters, digits, '-' or '_'")]
    InvalidCharacters,
}

/// A validated slug.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slug(String);

impl Slug {
    /// Validate and wrap a raw slug.
    pub fn parse(raw: impl Into<String>) -> Result<Self, SlugValidationError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(SlugValidationError::Empty);
        }
        if !raw.chars().all(is_slug_char) {
            return Err(SlugValidationError::InvalidCharacters);
        }
        Ok(Self(raw))
    }
}

fn is_slug_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
