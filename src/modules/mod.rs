//! Resource bindings for every back-office page.

pub mod admissions;
pub mod batches;
pub mod certificates;
pub mod courses;
pub mod feedback;
pub mod leads;
pub mod payroll;
pub mod staff;
pub mod students;

use std::fmt;
use std::str::FromStr;

use edudesk_auth::Route;
use edudesk_core::ClientError;
use edudesk_models::SelectOption;

pub use admissions::Admissions;
pub use batches::Batches;
pub use certificates::Certificates;
pub use courses::Courses;
pub use feedback::FeedbackForms;
pub use leads::Leads;
pub use payroll::PayrollEntries;
pub use staff::StaffMembers;
pub use students::Students;

fn plain_options(labels: &[&str]) -> Vec<SelectOption> {
    labels.iter().map(|l| SelectOption::plain(*l)).collect()
}

/// Runtime name of a resource, for front ends that pick one by string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Leads,
    Students,
    Admissions,
    Batches,
    Courses,
    Staff,
    Payroll,
    Certificates,
    Feedback,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 9] = [
        ResourceKind::Leads,
        ResourceKind::Students,
        ResourceKind::Admissions,
        ResourceKind::Batches,
        ResourceKind::Courses,
        ResourceKind::Staff,
        ResourceKind::Payroll,
        ResourceKind::Certificates,
        ResourceKind::Feedback,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Leads => "leads",
            ResourceKind::Students => "students",
            ResourceKind::Admissions => "admissions",
            ResourceKind::Batches => "batches",
            ResourceKind::Courses => "courses",
            ResourceKind::Staff => "staff",
            ResourceKind::Payroll => "payroll",
            ResourceKind::Certificates => "certificates",
            ResourceKind::Feedback => "feedback",
        }
    }

    pub fn route(&self) -> Route {
        match self {
            ResourceKind::Leads => Route::Leads,
            ResourceKind::Students => Route::Students,
            ResourceKind::Admissions => Route::Admissions,
            ResourceKind::Batches => Route::Batches,
            ResourceKind::Courses => Route::Courses,
            ResourceKind::Staff => Route::Staff,
            ResourceKind::Payroll => Route::Payroll,
            ResourceKind::Certificates => Route::Certificates,
            ResourceKind::Feedback => Route::Feedback,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = ClientError;

    /// Accepts the page name, ignoring case, plus a few singular aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        let kind = match name.as_str() {
            "lead" | "enquiries" | "enquiry" => Some(ResourceKind::Leads),
            "student" => Some(ResourceKind::Students),
            "admission" => Some(ResourceKind::Admissions),
            "batch" => Some(ResourceKind::Batches),
            "course" => Some(ResourceKind::Courses),
            "feedback-forms" => Some(ResourceKind::Feedback),
            _ => ResourceKind::ALL.into_iter().find(|k| k.as_str() == name),
        };
        kind.ok_or_else(|| ClientError::Validation(format!("unknown resource: {s}")))
    }
}

/// Run `$body` with `$r` bound to the resource type for `$kind`.
///
/// ```ignore
/// with_resource!(kind, R => list_rows::<R>(&transport).await)
/// ```
#[macro_export]
macro_rules! with_resource {
    ($kind:expr, $r:ident => $body:expr) => {
        match $kind {
            $crate::modules::ResourceKind::Leads => {
                type $r = $crate::modules::Leads;
                $body
            }
            $crate::modules::ResourceKind::Students => {
                type $r = $crate::modules::Students;
                $body
            }
            $crate::modules::ResourceKind::Admissions => {
                type $r = $crate::modules::Admissions;
                $body
            }
            $crate::modules::ResourceKind::Batches => {
                type $r = $crate::modules::Batches;
                $body
            }
            $crate::modules::ResourceKind::Courses => {
                type $r = $crate::modules::Courses;
                $body
            }
            $crate::modules::ResourceKind::Staff => {
                type $r = $crate::modules::StaffMembers;
                $body
            }
            $crate::modules::ResourceKind::Payroll => {
                type $r = $crate::modules::PayrollEntries;
                $body
            }
            $crate::modules::ResourceKind::Certificates => {
                type $r = $crate::modules::Certificates;
                $body
            }
            $crate::modules::ResourceKind::Feedback => {
                type $r = $crate::modules::FeedbackForms;
                $body
            }
        }
    };
}
