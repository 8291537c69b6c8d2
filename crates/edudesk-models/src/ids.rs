//! Strongly-typed ID newtypes for server-assigned entity identifiers.
//!
//! # Example
//!
//! ```
//! use edudesk_models::ids::{CourseId, LeadId};
//!
//! fn open_lead(id: LeadId) -> String { format!("leads/{id}/") }
//!
//! assert_eq!(open_lead(LeadId::new(42)), "leads/42/");
//! // open_lead(CourseId::new(42)); // Compile error! Type mismatch.
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to define a strongly-typed ID newtype around the server's integer key.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            #[inline]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the inner integer value.
            #[inline]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            #[inline]
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            #[inline]
            fn from(id: $name) -> i64 {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<i64>().map(Self)
            }
        }
    };
}

define_id!(
    /// Strongly-typed ID for Lead (enquiry) entities.
    LeadId
);

define_id!(
    /// Strongly-typed ID for Student entities.
    StudentId
);

define_id!(
    /// Strongly-typed ID for Admission entities.
    AdmissionId
);

define_id!(
    /// Strongly-typed ID for Batch entities.
    BatchId
);

define_id!(
    /// Strongly-typed ID for Course entities.
    CourseId
);

define_id!(
    /// Strongly-typed ID for Staff entities.
    StaffId
);

define_id!(
    /// Strongly-typed ID for Payroll entries.
    PayrollId
);

define_id!(
    /// Strongly-typed ID for Certificate entities.
    CertificateId
);

define_id!(
    /// Strongly-typed ID for Feedback form entities.
    FeedbackFormId
);
