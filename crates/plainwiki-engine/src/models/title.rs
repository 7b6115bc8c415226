use serde::Serialize;
use std::fmt;

use crate::routing::is_valid_title;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TitleError {
    #[error("Invalid page title: {0:?}")]
    Invalid(String),
}

/// The name of a page, restricted to ASCII letters and digits.
///
/// A `Title` is also the storage key of the page, so it can only be built
/// through [`Title::parse`], which rejects anything that could act as a
/// path separator or traversal component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Title(String);

impl Title {
    /// Validate `raw` and wrap it as a title
    pub fn parse(raw: &str) -> Result<Self, TitleError> {
        if is_valid_title(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(TitleError::Invalid(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Title {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for Title {
    type Error = TitleError;

    fn try_from(raw: &str) -> Result<Self, Self::Error> {
        Self::parse(raw)
    }
}

impl TryFrom<String> for Title {
    type Error = TitleError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        if is_valid_title(&raw) {
            Ok(Self(raw))
        } else {
            Err(TitleError::Invalid(raw))
        }
    }
}
