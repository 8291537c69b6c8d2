//! Feedback form models.

use edudesk_core::serde::deserialize_optional_string;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::ids::FeedbackFormId;
use crate::reference::CourseRef;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    #[default]
    Rating,
    Text,
    Choice,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct FeedbackQuestion {
    #[validate(length(min = 1, max = 300))]
    pub text: String,
    #[serde(default)]
    pub kind: QuestionKind,
    /// Answer choices, only meaningful for [`QuestionKind::Choice`].
    #[serde(default)]
    pub choices: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackForm {
    pub id: FeedbackFormId,
    #[serde(flatten)]
    pub fields: FeedbackFormDraft,
    /// Responses collected so far, computed by the server.
    #[serde(default)]
    pub response_count: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct FeedbackFormDraft {
    #[validate(length(min = 1, max = 150))]
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub course: CourseRef,
    #[serde(default)]
    #[validate(nested)]
    pub questions: Vec<FeedbackQuestion>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Default for FeedbackFormDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: None,
            course: CourseRef::default(),
            questions: Vec::new(),
            is_active: true,
        }
    }
}
