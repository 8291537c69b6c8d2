//! Staff models.
//!
//! A staff member's `role_perms` is the delimited permission string the
//! permission predicate reads once that member logs in. It is edited here as a
//! multi-valued field, token by token or a whole group at a time.

use chrono::NaiveDate;
use edudesk_core::multi_value::MultiValue;
use edudesk_core::permissions;
use edudesk_core::serde::{deserialize_optional_i64, deserialize_optional_string};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::ids::StaffId;

pub const STAFF_ROLES: &[&str] = &["super_admin", "staff", "trainer", "counsellor"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Staff {
    pub id: StaffId,
    #[serde(flatten)]
    pub fields: StaffDraft,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct StaffDraft {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(min = 7, max = 20))]
    pub phone: Option<String>,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub designation: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub salary: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub branch_id: Option<i64>,
    #[serde(default)]
    pub joining_date: Option<NaiveDate>,
    #[serde(default)]
    pub role_perms: MultiValue,
}

fn default_role() -> String {
    "staff".to_string()
}

impl StaffDraft {
    /// Switch a whole permission group on or off.
    pub fn toggle_permission_group(&mut self, group: &str) {
        self.role_perms = permissions::toggle_group(self.role_perms.as_slice(), group).into();
    }
}

impl Default for StaffDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: None,
            role: default_role(),
            designation: None,
            salary: None,
            branch_id: None,
            joining_date: None,
            role_perms: MultiValue::new(),
        }
    }
}
