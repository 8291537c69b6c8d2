//! Staff members and their permission sets.

use edudesk_auth::Route;
use edudesk_core::permissions::{self, GROUPS};
use edudesk_models::staff::STAFF_ROLES;
use edudesk_models::{SelectOption, Staff, StaffDraft};

use super::plain_options;
use crate::resource::Resource;

pub struct StaffMembers;

impl Resource for StaffMembers {
    type Record = Staff;
    type Draft = StaffDraft;

    const NAME: &'static str = "staff member";
    const PATH: &'static str = "staff";
    const ROUTE: Route = Route::Staff;

    const VIEW: &'static str = permissions::STAFF_VIEW;
    const ADD: &'static str = permissions::STAFF_ADD;
    const EDIT: &'static str = permissions::STAFF_EDIT;
    const DELETE: &'static str = permissions::STAFF_DELETE;

    const DEFAULT_SORT: &'static str = "name";
    const FILTERS: &'static [&'static str] = &["role"];
    const MULTI_VALUE_FIELDS: &'static [&'static str] = &["role_perms"];

    fn id(record: &Staff) -> i64 {
        record.id.get()
    }

    fn hydrate(record: Staff) -> StaffDraft {
        record.fields
    }

    fn option(record: &Staff) -> SelectOption {
        SelectOption::new(record.id.to_string(), record.fields.name.clone())
    }

    fn field_options(field: &str) -> Vec<SelectOption> {
        match field {
            "role" => plain_options(STAFF_ROLES),
            "role_perms" => GROUPS
                .iter()
                .flat_map(|g| g.tokens.iter())
                .map(|t| SelectOption::plain(*t))
                .collect(),
            _ => Vec::new(),
        }
    }
}
