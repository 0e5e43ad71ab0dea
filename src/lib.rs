#[cfg(test)]
extern crate mockall;

pub mod api;
pub mod classifier;
pub mod config;
pub mod facts;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Property tags reported alongside a classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberProperty {
    Armstrong,
    Even,
    Odd,
}

impl fmt::Display for NumberProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::Armstrong => "armstrong",
            Self::Even => "even",
            Self::Odd => "odd",
        };
        f.write_str(tag)
    }
}

/// Represents the classification of a single number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// The classified number, as received
    pub number: i32,
    /// Whether the number is prime
    pub is_prime: bool,
    /// Whether the number equals the sum of its proper divisors
    pub is_perfect: bool,
    /// Whether the number equals the sum of its digits raised to the digit count
    pub is_armstrong: bool,
    /// "armstrong" when applicable, followed by the parity tag
    pub properties: Vec<NumberProperty>,
    /// Sum of the absolute decimal digits
    pub digit_sum: u32,
    /// Best-effort fact about the number, omitted when lookups are disabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fun_fact: Option<String>,
}

impl ClassificationResult {
    pub fn with_fun_fact(mut self, fun_fact: String) -> Self {
        self.fun_fact = Some(fun_fact);
        self
    }
}

impl fmt::Display for ClassificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let properties: Vec<String> = self.properties.iter().map(|p| p.to_string()).collect();
        write!(
            f,
            "Classification {{ number: {}, prime: {}, perfect: {}, properties: [{}] }}",
            self.number,
            self.is_prime,
            self.is_perfect,
            properties.join(", ")
        )
    }
}

/// Application error types
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("URL error: {0}")]
    UrlError(String),

    #[error("HTTP error: {0}")]
    HttpError(String),
}

/// Result type for the application
pub type ClassifyResult<T> = Result<T, ClassifyError>;
