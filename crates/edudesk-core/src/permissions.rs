//! Permission token constants for the Edudesk back office.
//!
//! A token is a lowercase string naming one allowed action. Tokens are grouped
//! into categories so a role editor can switch a whole area on or off, but the
//! group a token sits in has no bearing on what it authorizes.
//!
//! # Example
//!
//! ```
//! use edudesk_core::permissions::{self, toggle_group};
//!
//! let perms = toggle_group::<&str>(&[], "Leads");
//! assert!(perms.iter().any(|p| p == permissions::LEADS_EDIT));
//! ```

use crate::multi_value;

/// Grants every permission.
pub const ALL: &str = "all";

// =============================================================================
// Leads permissions
// =============================================================================

pub const LEADS_VIEW: &str = "view lead";
pub const LEADS_ADD: &str = "add lead";
pub const LEADS_EDIT: &str = "edit lead";
pub const LEADS_DELETE: &str = "delete lead";

// =============================================================================
// Students permissions
// =============================================================================

pub const STUDENTS_VIEW: &str = "view student";
pub const STUDENTS_ADD: &str = "add student";
pub const STUDENTS_EDIT: &str = "edit student";
pub const STUDENTS_DELETE: &str = "delete student";

// =============================================================================
// Admissions permissions
// =============================================================================

pub const ADMISSIONS_VIEW: &str = "view admission";
pub const ADMISSIONS_ADD: &str = "add admission";
pub const ADMISSIONS_EDIT: &str = "edit admission";
pub const ADMISSIONS_DELETE: &str = "delete admission";

// =============================================================================
// Batches permissions
// =============================================================================

pub const BATCHES_VIEW: &str = "view batch";
pub const BATCHES_ADD: &str = "add batch";
pub const BATCHES_EDIT: &str = "edit batch";
pub const BATCHES_DELETE: &str = "delete batch";

// =============================================================================
// Courses permissions
// =============================================================================

pub const COURSES_VIEW: &str = "view course";
pub const COURSES_ADD: &str = "add course";
pub const COURSES_EDIT: &str = "edit course";
pub const COURSES_DELETE: &str = "delete course";

// =============================================================================
// Staff permissions
// =============================================================================

pub const STAFF_VIEW: &str = "view staff";
pub const STAFF_ADD: &str = "add staff";
pub const STAFF_EDIT: &str = "edit staff";
pub const STAFF_DELETE: &str = "delete staff";

// =============================================================================
// Payroll permissions
// =============================================================================

pub const PAYROLL_VIEW: &str = "view payroll";
pub const PAYROLL_ADD: &str = "add payroll";
pub const PAYROLL_EDIT: &str = "edit payroll";
pub const PAYROLL_DELETE: &str = "delete payroll";

// =============================================================================
// Certificates permissions
// =============================================================================

pub const CERTIFICATES_VIEW: &str = "view certificate";
pub const CERTIFICATES_ADD: &str = "add certificate";
pub const CERTIFICATES_EDIT: &str = "edit certificate";
pub const CERTIFICATES_DELETE: &str = "delete certificate";

// =============================================================================
// Feedback form permissions
// =============================================================================

pub const FEEDBACK_VIEW: &str = "view feedback";
pub const FEEDBACK_ADD: &str = "add feedback";
pub const FEEDBACK_EDIT: &str = "edit feedback";
pub const FEEDBACK_DELETE: &str = "delete feedback";

/// A named category of tokens toggled together in the role editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionGroup {
    pub name: &'static str,
    pub tokens: &'static [&'static str],
}

pub const GROUPS: &[PermissionGroup] = &[
    PermissionGroup {
        name: "Leads",
        tokens: &[LEADS_VIEW, LEADS_ADD, LEADS_EDIT, LEADS_DELETE],
    },
    PermissionGroup {
        name: "Students",
        tokens: &[STUDENTS_VIEW, STUDENTS_ADD, STUDENTS_EDIT, STUDENTS_DELETE],
    },
    PermissionGroup {
        name: "Admissions",
        tokens: &[ADMISSIONS_VIEW, ADMISSIONS_ADD, ADMISSIONS_EDIT, ADMISSIONS_DELETE],
    },
    PermissionGroup {
        name: "Batches",
        tokens: &[BATCHES_VIEW, BATCHES_ADD, BATCHES_EDIT, BATCHES_DELETE],
    },
    PermissionGroup {
        name: "Courses",
        tokens: &[COURSES_VIEW, COURSES_ADD, COURSES_EDIT, COURSES_DELETE],
    },
    PermissionGroup {
        name: "Staff",
        tokens: &[STAFF_VIEW, STAFF_ADD, STAFF_EDIT, STAFF_DELETE],
    },
    PermissionGroup {
        name: "Payroll",
        tokens: &[PAYROLL_VIEW, PAYROLL_ADD, PAYROLL_EDIT, PAYROLL_DELETE],
    },
    PermissionGroup {
        name: "Certificates",
        tokens: &[
            CERTIFICATES_VIEW,
            CERTIFICATES_ADD,
            CERTIFICATES_EDIT,
            CERTIFICATES_DELETE,
        ],
    },
    PermissionGroup {
        name: "Feedback",
        tokens: &[FEEDBACK_VIEW, FEEDBACK_ADD, FEEDBACK_EDIT, FEEDBACK_DELETE],
    },
];

/// Look up a group by name, ignoring case.
pub fn group(name: &str) -> Option<&'static PermissionGroup> {
    GROUPS.iter().find(|g| g.name.eq_ignore_ascii_case(name))
}

/// Lowercased, trimmed tokens from a delimited permission string.
pub fn parse_tokens(perms: &str) -> Vec<String> {
    multi_value::decode(Some(perms))
        .into_iter()
        .map(|t| t.to_lowercase())
        .collect()
}

/// Switch a whole group on or off.
///
/// If every token of the group is already present they are all removed;
/// otherwise the missing ones are appended in group order. Unknown group names
/// leave the list unchanged.
pub fn toggle_group<S: AsRef<str>>(current: &[S], group_name: &str) -> Vec<String> {
    let mut next: Vec<String> = current.iter().map(|t| t.as_ref().to_string()).collect();
    let Some(group) = group(group_name) else {
        return next;
    };

    let complete = group
        .tokens
        .iter()
        .all(|t| next.iter().any(|n| n == t));

    if complete {
        next.retain(|n| !group.tokens.contains(&n.as_str()));
    } else {
        for token in group.tokens {
            if !next.iter().any(|n| n == token) {
                next.push(token.to_string());
            }
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_lowercase() {
        for g in GROUPS {
            for t in g.tokens {
                assert_eq!(*t, t.to_lowercase());
            }
        }
    }

    #[test]
    fn test_group_lookup_case_insensitive() {
        assert_eq!(group("payroll").map(|g| g.name), Some("Payroll"));
        assert!(group("unknown").is_none());
    }

    #[test]
    fn test_parse_tokens() {
        assert_eq!(
            parse_tokens("Edit Course, view lead,,ALL "),
            vec!["edit course", "view lead", "all"]
        );
    }

    #[test]
    fn test_toggle_group_adds_missing() {
        let perms = toggle_group(&[COURSES_VIEW, "custom"], "Courses");
        assert_eq!(
            perms,
            vec![COURSES_VIEW, "custom", COURSES_ADD, COURSES_EDIT, COURSES_DELETE]
        );
    }

    #[test]
    fn test_toggle_group_removes_complete_group() {
        let current = vec![
            "custom", LEADS_VIEW, LEADS_ADD, LEADS_EDIT, LEADS_DELETE,
        ];
        assert_eq!(toggle_group(&current, "Leads"), vec!["custom"]);
    }

    #[test]
    fn test_toggle_group_unknown_is_noop() {
        assert_eq!(toggle_group(&["x"], "nope"), vec!["x"]);
    }
}
