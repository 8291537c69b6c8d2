use edudesk_auth::Route;
use edudesk_core::permissions;
use edudesk_models::{Course, CourseDraft, SelectOption};

use crate::resource::Resource;

pub struct Courses;

impl Resource for Courses {
    type Record = Course;
    type Draft = CourseDraft;

    const NAME: &'static str = "course";
    const PATH: &'static str = "courses";
    const ROUTE: Route = Route::Courses;

    const VIEW: &'static str = permissions::COURSES_VIEW;
    const ADD: &'static str = permissions::COURSES_ADD;
    const EDIT: &'static str = permissions::COURSES_EDIT;
    const DELETE: &'static str = permissions::COURSES_DELETE;

    const DEFAULT_SORT: &'static str = "name";
    const FILTERS: &'static [&'static str] = &["is_active"];

    fn id(record: &Course) -> i64 {
        record.id.get()
    }

    fn hydrate(record: Course) -> CourseDraft {
        record.fields
    }

    fn option(record: &Course) -> SelectOption {
        SelectOption::new(record.id.to_string(), record.fields.name.clone())
    }
}
