use edudesk_auth::Route;
use edudesk_core::permissions;
use edudesk_models::payroll::PAYROLL_STATUSES;
use edudesk_models::{Payroll, PayrollDraft, SelectOption, StaffRef};

use super::plain_options;
use crate::resource::{ReferenceField, Resource};

pub struct PayrollEntries;

impl Resource for PayrollEntries {
    type Record = Payroll;
    type Draft = PayrollDraft;

    const NAME: &'static str = "payroll entry";
    const PATH: &'static str = "payroll";
    const ROUTE: Route = Route::Payroll;

    const VIEW: &'static str = permissions::PAYROLL_VIEW;
    const ADD: &'static str = permissions::PAYROLL_ADD;
    const EDIT: &'static str = permissions::PAYROLL_EDIT;
    const DELETE: &'static str = permissions::PAYROLL_DELETE;

    const DEFAULT_SORT: &'static str = "month";
    const FILTERS: &'static [&'static str] = &["month", "status", "staff_id"];
    const REFERENCES: &'static [ReferenceField] = &[ReferenceField::new(
        "staff",
        StaffRef::ID_KEY,
        StaffRef::LABEL_KEY,
    )];

    fn id(record: &Payroll) -> i64 {
        record.id.get()
    }

    fn hydrate(record: Payroll) -> PayrollDraft {
        record.fields
    }

    fn option(record: &Payroll) -> SelectOption {
        let staff = record.fields.staff.label().unwrap_or_default();
        SelectOption::new(
            record.id.to_string(),
            format!("{staff} {}", record.fields.month).trim().to_string(),
        )
    }

    fn field_options(field: &str) -> Vec<SelectOption> {
        match field {
            "status" => plain_options(PAYROLL_STATUSES),
            _ => Vec::new(),
        }
    }
}
