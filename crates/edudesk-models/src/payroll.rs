//! Payroll models.

use edudesk_core::serde::deserialize_optional_string;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::ids::PayrollId;
use crate::reference::StaffRef;

pub const PAYROLL_STATUSES: &[&str] = &["draft", "paid"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payroll {
    pub id: PayrollId,
    #[serde(flatten)]
    pub fields: PayrollDraft,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PayrollDraft {
    #[serde(flatten)]
    pub staff: StaffRef,
    /// Pay month as `YYYY-MM`.
    #[validate(custom(function = "validate_month"))]
    pub month: String,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub basic_salary: f64,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub allowances: f64,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub deductions: f64,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub remarks: Option<String>,
}

fn default_status() -> String {
    PAYROLL_STATUSES[0].to_string()
}

fn validate_month(month: &str) -> Result<(), ValidationError> {
    let valid = month.len() == 7
        && month.as_bytes()[4] == b'-'
        && month[..4].parse::<u16>().is_ok()
        && month[5..].parse::<u8>().is_ok_and(|m| (1..=12).contains(&m));
    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("month_format"))
    }
}

impl PayrollDraft {
    pub fn net_pay(&self) -> f64 {
        self.basic_salary + self.allowances - self.deductions
    }
}

impl Default for PayrollDraft {
    fn default() -> Self {
        Self {
            staff: StaffRef::default(),
            month: String::new(),
            basic_salary: 0.0,
            allowances: 0.0,
            deductions: 0.0,
            status: default_status(),
            remarks: None,
        }
    }
}
