use edudesk_auth::Route;
use edudesk_core::permissions;
use edudesk_models::batches::BATCH_STATUSES;
use edudesk_models::{Batch, BatchDraft, CourseRef, SelectOption, TrainerRef};

use super::plain_options;
use crate::resource::{ReferenceField, Resource};

pub struct Batches;

impl Resource for Batches {
    type Record = Batch;
    type Draft = BatchDraft;

    const NAME: &'static str = "batch";
    const PATH: &'static str = "batches";
    const ROUTE: Route = Route::Batches;

    const VIEW: &'static str = permissions::BATCHES_VIEW;
    const ADD: &'static str = permissions::BATCHES_ADD;
    const EDIT: &'static str = permissions::BATCHES_EDIT;
    const DELETE: &'static str = permissions::BATCHES_DELETE;

    const DEFAULT_SORT: &'static str = "start_date";
    const FILTERS: &'static [&'static str] = &["status", "course_id", "trainer_id"];
    const REFERENCES: &'static [ReferenceField] = &[
        ReferenceField::new("course", CourseRef::ID_KEY, CourseRef::LABEL_KEY),
        ReferenceField::new("trainer", TrainerRef::ID_KEY, TrainerRef::LABEL_KEY),
    ];

    fn id(record: &Batch) -> i64 {
        record.id.get()
    }

    fn hydrate(record: Batch) -> BatchDraft {
        record.fields
    }

    fn option(record: &Batch) -> SelectOption {
        SelectOption::new(record.id.to_string(), record.fields.name.clone())
    }

    fn field_options(field: &str) -> Vec<SelectOption> {
        match field {
            "status" => plain_options(BATCH_STATUSES),
            _ => Vec::new(),
        }
    }
}
