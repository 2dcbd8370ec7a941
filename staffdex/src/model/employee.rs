//! The employee record as the upstream directory serves it.

use serde::{Deserialize, Serialize};

/// A single employee record, keyed by an upstream-assigned identifier.
///
/// All fields are optional: the upstream occasionally serves records
/// with missing fields (including the id), and the cache stores them
/// verbatim. Callers that need a particular field filter for it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Upstream-assigned identifier. Immutable once created.
    /// A record without one cannot be cached and is treated as an anomaly.
    #[serde(default)]
    pub id: Option<String>,

    /// Display name. Required by the delete endpoint, which addresses
    /// employees by name rather than id.
    #[serde(default, rename = "employee_name")]
    pub name: Option<String>,

    /// Salary in whole currency units.
    #[serde(default, rename = "employee_salary")]
    pub salary: Option<i64>,

    #[serde(default, rename = "employee_age")]
    pub age: Option<i32>,

    #[serde(default, rename = "employee_title")]
    pub title: Option<String>,

    #[serde(default, rename = "employee_email")]
    pub email: Option<String>,
}

impl Employee {
    /// Returns true if the record carries both a name and a salary,
    /// the fields every aggregation requires.
    pub fn has_aggregatable_fields(&self) -> bool {
        self.name.is_some() && self.salary.is_some()
    }
}
