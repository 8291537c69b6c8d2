//! Leads (enquiries).

use edudesk_auth::Route;
use edudesk_core::permissions;
use edudesk_models::leads::{LEAD_SOURCES, LEAD_STATUSES};
use edudesk_models::{AssigneeRef, Lead, LeadDraft, SelectOption};

use super::plain_options;
use crate::resource::{ReferenceField, Resource};

pub struct Leads;

impl Resource for Leads {
    type Record = Lead;
    type Draft = LeadDraft;

    const NAME: &'static str = "lead";
    const PATH: &'static str = "leads";
    const ROUTE: Route = Route::Leads;

    const VIEW: &'static str = permissions::LEADS_VIEW;
    const ADD: &'static str = permissions::LEADS_ADD;
    const EDIT: &'static str = permissions::LEADS_EDIT;
    const DELETE: &'static str = permissions::LEADS_DELETE;

    const FILTERS: &'static [&'static str] = &["status", "source", "assigned_to", "follow_up_date"];
    const MULTI_VALUE_FIELDS: &'static [&'static str] = &["source", "tags", "courses"];
    const REFERENCES: &'static [ReferenceField] = &[ReferenceField::new(
        "assigned_to",
        AssigneeRef::ID_KEY,
        AssigneeRef::LABEL_KEY,
    )];

    fn id(record: &Lead) -> i64 {
        record.id.get()
    }

    fn hydrate(record: Lead) -> LeadDraft {
        record.fields
    }

    fn option(record: &Lead) -> SelectOption {
        SelectOption::new(record.id.to_string(), record.fields.name.clone())
    }

    fn field_options(field: &str) -> Vec<SelectOption> {
        match field {
            "source" => plain_options(LEAD_SOURCES),
            "status" => plain_options(LEAD_STATUSES),
            _ => Vec::new(),
        }
    }
}
