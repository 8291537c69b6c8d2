//! # Edudesk Models
//!
//! Records and drafts for every resource the back office manages.
//!
//! Each resource module defines a record (`Lead`, `Course`, ...) as returned by
//! the API and a draft (`LeadDraft`, `CourseDraft`, ...) holding the editable
//! fields. A record is its id plus a flattened draft, so hydrating an edit form
//! is a clone of `record.fields`. Drafts implement `Default` as the blank create
//! template and `validator::Validate` for submit-time checks.
//!
//! # Modules
//!
//! - [`ids`]: Strongly-typed integer ids
//! - [`reference`]: Labeled foreign keys (`course_id` + `course_name`)
//! - [`options`]: Normalized dropdown options
//! - [`leads`], [`students`], [`admissions`], [`batches`], [`courses`],
//!   [`staff`], [`payroll`], [`certificates`], [`feedback`]: Resource models

pub mod admissions;
pub mod batches;
pub mod certificates;
pub mod courses;
pub mod feedback;
pub mod ids;
pub mod leads;
pub mod options;
pub mod payroll;
pub mod reference;
pub mod staff;
pub mod students;

// Re-export commonly used types at crate root for convenience
pub use admissions::{Admission, AdmissionDraft};
pub use batches::{Batch, BatchDraft};
pub use certificates::{Certificate, CertificateDraft};
pub use courses::{Course, CourseDraft};
pub use feedback::{FeedbackForm, FeedbackFormDraft, FeedbackQuestion, QuestionKind};
pub use leads::{Lead, LeadDraft};
pub use options::SelectOption;
pub use payroll::{Payroll, PayrollDraft};
pub use reference::{AssigneeRef, BatchRef, CourseRef, Reference, StaffRef, StudentRef, TrainerRef};
pub use staff::{Staff, StaffDraft};
pub use students::{Student, StudentDraft};
