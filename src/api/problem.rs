//! Problem details bodies for error responses.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Content type for problem details bodies
pub const APPLICATION_PROBLEM_JSON: &str = "application/problem+json";

pub const BAD_REQUEST_TYPE: &str = "https://tools.ietf.org/html/rfc9110#section-15.5.1";
pub const INTERNAL_ERROR_TYPE: &str = "https://tools.ietf.org/html/rfc9110#section-15.6.1";

/// Problem details payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    /// URI reference identifying the problem type
    #[serde(rename = "type")]
    pub type_url: String,
    /// Short, human-readable summary of the problem type
    pub title: String,
    /// HTTP status code of this occurrence
    pub status: u16,
    /// Explanation specific to this occurrence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Validation messages keyed by field name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<String, Vec<String>>,
}

impl Problem {
    /// A 400 problem with a single failing field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = BTreeMap::new();
        errors.insert(field.into(), vec![message.into()]);
        Self {
            type_url: BAD_REQUEST_TYPE.to_string(),
            title: "One or more validation errors occurred.".to_string(),
            status: 400,
            detail: None,
            errors,
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self {
            type_url: INTERNAL_ERROR_TYPE.to_string(),
            title: "An error occurred while processing your request.".to_string(),
            status: 500,
            detail: Some(detail.into()),
            errors: BTreeMap::new(),
        }
    }
}
