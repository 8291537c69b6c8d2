//! Lead (enquiry) models.
//!
//! A lead is a prospective student captured from a walk-in, call, or campaign.
//! `source`, `tags`, and `courses` are multi-valued label fields.

use chrono::{DateTime, NaiveDate, Utc};
use edudesk_core::multi_value::MultiValue;
use edudesk_core::serde::{deserialize_optional_i64, deserialize_optional_string};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::ids::LeadId;
use crate::reference::AssigneeRef;

/// Status values offered by the lead status filter.
pub const LEAD_STATUSES: &[&str] = &["new", "contacted", "interested", "converted", "lost"];

/// Source labels offered in the lead form.
pub const LEAD_SOURCES: &[&str] = &[
    "Walk-in",
    "Website",
    "Referral",
    "Facebook",
    "Instagram",
    "Google Ads",
    "Phone Call",
];

/// A lead as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: LeadId,
    #[serde(flatten)]
    pub fields: LeadDraft,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Editable lead fields, sent as the create/update payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct LeadDraft {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(min = 7, max = 20))]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(email)]
    pub email: Option<String>,
    #[serde(default)]
    pub source: MultiValue,
    #[serde(default)]
    pub tags: MultiValue,
    #[serde(default)]
    pub courses: MultiValue,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(flatten)]
    pub assigned_to: AssigneeRef,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub branch_id: Option<i64>,
    #[serde(default)]
    pub follow_up_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub notes: Option<String>,
}

fn default_status() -> String {
    LEAD_STATUSES[0].to_string()
}

impl Default for LeadDraft {
    /// Blank template used when the drawer opens in create mode.
    fn default() -> Self {
        Self {
            name: String::new(),
            phone: None,
            email: None,
            source: MultiValue::new(),
            tags: MultiValue::new(),
            courses: MultiValue::new(),
            status: default_status(),
            assigned_to: AssigneeRef::default(),
            branch_id: None,
            follow_up_date: None,
            notes: None,
        }
    }
}
