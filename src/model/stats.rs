use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Employee, PtoRequest};

/// Derived per-employee breakdown. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeStats {
    /// The stored employee with `takenDays` replaced by the recomputed value.
    pub employee: Employee,
    pub requests: Vec<PtoRequest>,
    #[schema(example = 20)]
    pub remaining_days: f64,
    #[schema(example = 3)]
    pub public_holiday_days: f64,
    pub working_on_holidays: Vec<WorkingOnHoliday>,
}

/// A holiday of the employee's year with no request covering it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkingOnHoliday {
    #[schema(example = "2024-01-01", format = "date", value_type = String)]
    pub date: NaiveDate,
    #[schema(example = "New Year's Day")]
    pub holiday_name: String,
}
