//! # Routing
//!
//! Maps request paths onto wiki operations.
//!
//! Only two shapes are accepted:
//! - `/` lists every page
//! - `/<edit|save|view>/<title>` where the title is one or more ASCII
//!   letters or digits, anchored at both ends
//!
//! Anything else is rejected before a handler runs. The title ends up
//! concatenated into a file path, so this is the only place that keeps
//! separators and `..` out of the page directory.

use regex::Regex;
use std::sync::OnceLock;

use crate::models::Title;

/// Path of the page listing
pub const LIST_PATH: &str = "/";

fn title_regex() -> &'static Regex {
    static TITLE_REGEX: OnceLock<Regex> = OnceLock::new();
    TITLE_REGEX.get_or_init(|| Regex::new(r"^[a-zA-Z0-9]+$").expect("Invalid title regex"))
}

fn title_path_regex() -> &'static Regex {
    static TITLE_PATH_REGEX: OnceLock<Regex> = OnceLock::new();
    TITLE_PATH_REGEX.get_or_init(|| {
        Regex::new(r"^/(edit|save|view)/([a-zA-Z0-9]+)$").expect("Invalid title path regex")
    })
}

/// True when `candidate` is a usable page title
pub fn is_valid_title(candidate: &str) -> bool {
    title_regex().is_match(candidate)
}

/// An operation addressed by `/<operation>/<title>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Edit,
    Save,
    View,
}

impl Operation {
    pub const ALL: [Operation; 3] = [Operation::Edit, Operation::Save, Operation::View];

    pub fn keyword(self) -> &'static str {
        match self {
            Operation::Edit => "edit",
            Operation::Save => "save",
            Operation::View => "view",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.keyword() == keyword)
    }

    /// Path prefix, e.g. `/edit/`
    pub fn prefix(self) -> &'static str {
        match self {
            Operation::Edit => "/edit/",
            Operation::Save => "/save/",
            Operation::View => "/view/",
        }
    }

    /// Full path of this operation for `title`
    pub fn path_for(self, title: &Title) -> String {
        format!("{}{}", self.prefix(), title)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    List,
    Page { operation: Operation, title: Title },
}

impl Route {
    /// Parse a request path. `None` means the path must be answered with
    /// "not found" and nothing else may happen.
    pub fn parse(path: &str) -> Option<Self> {
        if path == LIST_PATH {
            return Some(Route::List);
        }

        let captures = title_path_regex().captures(path)?;
        let operation = Operation::from_keyword(captures.get(1)?.as_str())?;
        let title = Title::parse(captures.get(2)?.as_str()).ok()?;
        Some(Route::Page { operation, title })
    }
}
