//! Database record structures and repository request types.
//!
//! Naming convention, per entity:
//!
//! - `*DBResponse`: the record as read from the table
//! - `*CreateDBRequest`: fields needed to insert a row
//! - `*ReplaceDBRequest`: a full-replace payload (PUT semantics: absent
//!   optional fields clear the column)

pub mod employees;
pub mod members;
pub mod teams;
