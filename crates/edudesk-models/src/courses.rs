//! Course models.

use edudesk_core::serde::deserialize_optional_string;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::ids::CourseId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    #[serde(flatten)]
    pub fields: CourseDraft,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CourseDraft {
    #[validate(length(min = 1, max = 150))]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 20))]
    pub code: Option<String>,
    /// Free text such as "3 months".
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub duration: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub fee: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub description: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Default for CourseDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            code: None,
            duration: None,
            fee: None,
            description: None,
            is_active: true,
        }
    }
}
