//! Common type definitions shared across the crate.
//!
//! All entity identifiers are UUIDs wrapped in type aliases for readability:
//!
//! - [`EmployeeId`]: Employee identifier
//! - [`TeamId`]: Team identifier
//! - [`MemberId`]: Member identifier
//!
//! This module also owns [`DEPARTMENTS`], the fixed enumeration that governs
//! write-path validation of the `department` field. `GET /departments/`
//! reflects what is actually stored and may lag behind this list.

use uuid::Uuid;

// Type aliases for IDs
pub type EmployeeId = Uuid;
pub type TeamId = Uuid;
pub type MemberId = Uuid;

/// The fixed set of valid departments. Employee writes and salary
/// predictions reject anything outside this list.
pub const DEPARTMENTS: &[&str] = &[
    "Engineering",
    "Finance",
    "Human Resources",
    "Marketing",
    "Operations",
    "Sales",
];

/// Whether `name` belongs to the fixed department enumeration.
pub fn is_valid_department(name: &str) -> bool {
    DEPARTMENTS.contains(&name)
}

/// Abbreviate a UUID to its first 8 characters for more readable logs and traces
/// Example: "550e8400-e29b-41d4-a716-446655440000" -> "550e8400"
pub fn abbrev_uuid(uuid: &Uuid) -> String {
    uuid.to_string().chars().take(8).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_department_membership() {
        assert!(is_valid_department("Sales"));
        assert!(is_valid_department("Engineering"));
        assert!(!is_valid_department("sales"));
        assert!(!is_valid_department("Astrology"));
    }

    #[test]
    fn test_abbrev_uuid() {
        let id = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap();
        assert_eq!(abbrev_uuid(&id), "550e8400");
    }
}
