//! Wire and domain models for the employee directory.
//!
//! The upstream API owns the `Employee` record and its field names; the
//! structs here mirror its JSON shape exactly so cached bytes and wire
//! bytes stay interchangeable. Every upstream field is optional because
//! the upstream has been observed returning partial records - the
//! consistency engine decides per operation what to do with them.

mod employee;
mod envelope;
mod input;

pub use employee::Employee;
pub use envelope::ApiEnvelope;
pub use input::{CreateEmployeeInput, DeleteEmployeeInput, ValidationError};
