//! Request bodies for the upstream create and delete endpoints.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum accepted age for a new employee.
pub const MIN_AGE: i32 = 16;

/// Maximum accepted age for a new employee.
pub const MAX_AGE: i32 = 75;

/// Minimum accepted salary for a new employee.
pub const MIN_SALARY: i64 = 1;

/// A create input that failed validation. Carries the offending field
/// so the API layer can report it without guessing.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("validation failed: [{field}: {reason}]")]
pub struct ValidationError {
    /// Name of the field that failed validation.
    pub field: &'static str,
    /// Human-readable reason.
    pub reason: String,
}

impl ValidationError {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Input for creating an employee.
///
/// Validated locally before any I/O; rejected inputs never reach the
/// upstream client.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreateEmployeeInput {
    pub name: String,
    pub salary: i64,
    pub age: i32,
    pub title: String,
}

impl CreateEmployeeInput {
    /// Checks the input against the upstream's documented constraints.
    ///
    /// Returns the first violation found, checking fields in
    /// declaration order.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::new("name", "must not be blank"));
        }
        if self.salary < MIN_SALARY {
            return Err(ValidationError::new(
                "salary",
                format!("must be at least {}", MIN_SALARY),
            ));
        }
        if self.age < MIN_AGE || self.age > MAX_AGE {
            return Err(ValidationError::new(
                "age",
                format!("must be between {} and {}", MIN_AGE, MAX_AGE),
            ));
        }
        if self.title.trim().is_empty() {
            return Err(ValidationError::new("title", "must not be blank"));
        }
        Ok(())
    }
}

/// Body for the upstream delete endpoint, which identifies the
/// employee by name rather than id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeleteEmployeeInput {
    pub name: String,
}
