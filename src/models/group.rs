//! Group keys for one- and two-dimensional aggregation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Key of an aggregation group: one or two categorical values, or the
/// whole-dataset group when no grouping fields were requested.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupKey {
    pub primary: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub secondary: Option<String>,
}

impl GroupKey {
    /// Label for the single group covering an ungrouped aggregation.
    pub const OVERALL: &'static str = "All";

    pub fn overall() -> Self {
        Self {
            primary: Self::OVERALL.to_string(),
            secondary: None,
        }
    }

    pub fn single(primary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            secondary: None,
        }
    }

    pub fn pair(primary: impl Into<String>, secondary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            secondary: Some(secondary.into()),
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.secondary {
            Some(secondary) => write!(f, "{} / {}", self.primary, secondary),
            None => write!(f, "{}", self.primary),
        }
    }
}
