//! Labeled foreign keys.
//!
//! A record that points at another entity carries both the canonical id and a
//! human-readable label (`course_id` + `course_name`). The pair types below keep
//! them together so one cannot change without the other. On the wire they are
//! flattened into the two sibling fields.

use serde::{Deserialize, Serialize};

use crate::ids::{BatchId, CourseId, StaffId, StudentId};

/// A selected `(id, label)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference<Id> {
    pub id: Id,
    pub label: String,
}

impl<Id> Reference<Id> {
    pub fn new(id: Id, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }
}

/// Macro to define a flattened reference field with fixed wire keys.
macro_rules! define_reference {
    (
        $(#[$meta:meta])*
        $name:ident, $id:ty, $id_key:literal, $label_key:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        pub struct $name {
            #[serde(rename = $id_key, default)]
            id: Option<$id>,
            #[serde(rename = $label_key, default)]
            label: Option<String>,
        }

        impl $name {
            /// Wire key of the id half.
            pub const ID_KEY: &'static str = $id_key;
            /// Wire key of the label half.
            pub const LABEL_KEY: &'static str = $label_key;

            pub fn new(id: $id, label: impl Into<String>) -> Self {
                Self {
                    id: Some(id),
                    label: Some(label.into()),
                }
            }

            /// Set both halves at once.
            pub fn select(&mut self, id: $id, label: impl Into<String>) {
                self.id = Some(id);
                self.label = Some(label.into());
            }

            pub fn clear(&mut self) {
                self.id = None;
                self.label = None;
            }

            pub fn id(&self) -> Option<$id> {
                self.id
            }

            /// Display label; falls back to the id when the server omitted it.
            pub fn label(&self) -> Option<String> {
                match (&self.label, self.id) {
                    (Some(label), _) => Some(label.clone()),
                    (None, Some(id)) => Some(id.to_string()),
                    (None, None) => None,
                }
            }

            pub fn get(&self) -> Option<Reference<$id>> {
                let id = self.id?;
                Some(Reference::new(id, self.label().unwrap_or_default()))
            }

            pub fn is_set(&self) -> bool {
                self.id.is_some()
            }
        }

        impl From<Reference<$id>> for $name {
            fn from(r: Reference<$id>) -> Self {
                Self::new(r.id, r.label)
            }
        }
    };
}

define_reference!(
    /// Course a student, admission, batch, certificate, or form belongs to.
    CourseRef, CourseId, "course_id", "course_name"
);

define_reference!(
    /// Batch a student or admission is placed in.
    BatchRef, BatchId, "batch_id", "batch_name"
);

define_reference!(
    /// Staff member a lead is assigned to.
    AssigneeRef, StaffId, "assigned_to", "assigned_to_name"
);

define_reference!(
    /// Staff member teaching a batch.
    TrainerRef, StaffId, "trainer_id", "trainer_name"
);

define_reference!(
    /// Staff member a payroll entry is for.
    StaffRef, StaffId, "staff_id", "staff_name"
);

define_reference!(
    /// Student a certificate is issued to.
    StudentRef, StudentId, "student_id", "student_name"
);
