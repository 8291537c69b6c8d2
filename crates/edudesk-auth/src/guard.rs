//! Route table and navigation guard.
//!
//! The guard is a one-shot routing decision made per navigation. It does not
//! react to permission changes while a page stays mounted.

use edudesk_core::permissions;

use crate::session::SessionStore;

/// Pages of the back office.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Dashboard,
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

impl Route {
    /// Entry route for anonymous users.
    pub const ENTRY: Route = Route::Login;
    /// Default route for authenticated users.
    pub const LANDING: Route = Route::Dashboard;

    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::Dashboard => "/dashboard",
            Route::Leads => "/leads",
            Route::Students => "/students",
            Route::Admissions => "/admissions",
            Route::Batches => "/batches",
            Route::Courses => "/courses",
            Route::Staff => "/staff",
            Route::Payroll => "/payroll",
            Route::Certificates => "/certificates",
            Route::Feedback => "/feedback",
        }
    }

    /// Permission needed to open the page, if any.
    pub fn required_permission(&self) -> Option<&'static str> {
        match self {
            Route::Login | Route::Dashboard => None,
            Route::Leads => Some(permissions::LEADS_VIEW),
            Route::Students => Some(permissions::STUDENTS_VIEW),
            Route::Admissions => Some(permissions::ADMISSIONS_VIEW),
            Route::Batches => Some(permissions::BATCHES_VIEW),
            Route::Courses => Some(permissions::COURSES_VIEW),
            Route::Staff => Some(permissions::STAFF_VIEW),
            Route::Payroll => Some(permissions::PAYROLL_VIEW),
            Route::Certificates => Some(permissions::CERTIFICATES_VIEW),
            Route::Feedback => Some(permissions::FEEDBACK_VIEW),
        }
    }

    /// Guard navigation to this route. The login page itself is always open.
    pub fn guard(&self, session: &SessionStore) -> RouteDecision {
        if *self == Route::ENTRY {
            return RouteDecision::Render;
        }
        guard(session, self.required_permission())
    }
}

/// Outcome of a navigation guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Render the protected content unchanged.
    Render,
    /// Render nothing and navigate elsewhere.
    Redirect(Route),
}

/// Decide whether protected content may render.
///
/// No identity redirects to the entry route. An identity lacking `required`
/// redirects to the landing route, not back to login.
pub fn guard(session: &SessionStore, required: Option<&str>) -> RouteDecision {
    let Some(identity) = session.current_identity() else {
        return RouteDecision::Redirect(Route::ENTRY);
    };

    match required {
        Some(token) if !session.policy().allows(Some(&identity), token) => {
            RouteDecision::Redirect(Route::LANDING)
        }
        _ => RouteDecision::Render,
    }
}
