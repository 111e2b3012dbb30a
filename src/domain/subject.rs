// Subject (employee id) resolution
use crate::domain::page::Page;
use std::fmt;

pub const LANDMARK_ATTRIBUTE: &str = "employee-id";
pub const HIDDEN_INPUT_ID: &str = "employee-id";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectId(String);

impl SubjectId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn non_empty(value: &str) -> Option<Self> {
        (!value.is_empty()).then(|| Self(value.to_string()))
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named, side-effect free lookup of the subject on a page
#[derive(Clone, Copy)]
pub struct SubjectStrategy {
    pub name: &'static str,
    pub resolve: fn(&Page) -> Option<SubjectId>,
}

/// Resolution order is part of the page contract: the URL path wins over
/// the landmark attribute, which wins over the hidden input.
pub const RESOLUTION_ORDER: [SubjectStrategy; 3] = [
    SubjectStrategy {
        name: "url_path",
        resolve: from_url_path,
    },
    SubjectStrategy {
        name: "landmark_attribute",
        resolve: from_landmark_attribute,
    },
    SubjectStrategy {
        name: "hidden_input",
        resolve: from_hidden_input,
    },
];

/// First strategy that yields an id wins
pub fn resolve_subject(
    strategies: &[SubjectStrategy],
    page: &Page,
) -> Option<(SubjectId, &'static str)> {
    strategies
        .iter()
        .find_map(|s| (s.resolve)(page).map(|id| (id, s.name)))
}

/// Trailing path segment made only of digits, e.g. `/employee/42`
pub fn from_url_path(page: &Page) -> Option<SubjectId> {
    let last = page.path().rsplit('/').next()?;
    if last.chars().all(|c| c.is_ascii_digit()) {
        SubjectId::non_empty(last)
    } else {
        None
    }
}

pub fn from_landmark_attribute(page: &Page) -> Option<SubjectId> {
    page.landmark_data(LANDMARK_ATTRIBUTE)
        .and_then(SubjectId::non_empty)
}

pub fn from_hidden_input(page: &Page) -> Option<SubjectId> {
    page.hidden_input(HIDDEN_INPUT_ID)
        .and_then(SubjectId::non_empty)
}
