use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::store::{Collection, Record};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "id": "b7e1f0c2-9d4a-4c3b-8e2f-5a6d7c8b9e01",
    "employeeId": "3f2b8c1e-6a4d-4e0f-9c57-1d2a9b7e5f10",
    "employeeName": "Jane Doe",
    "startDate": "2024-12-24",
    "endDate": "2024-12-26",
    "totalDays": 3,
    "year": 2024,
    "createdAt": "2024-11-02T09:15:00Z"
}))]
pub struct PtoRequest {
    pub id: String,
    pub employee_id: String,
    /// Copied from the employee at creation; not kept in sync.
    pub employee_name: String,
    #[schema(example = "2024-12-24", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2024-12-26", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    #[schema(example = 3)]
    pub total_days: f64,
    /// Grouping key for stats. Never derived from the dates.
    #[schema(example = 2024)]
    pub year: i32,
    #[schema(example = "2024-11-02T09:15:00Z", format = "date-time", value_type = String)]
    pub created_at: DateTime<Utc>,
}

impl PtoRequest {
    /// Whether `date` falls inside the request, both ends inclusive.
    pub fn covers(&self, date: NaiveDate) -> bool {
        let (first, last) = if self.start_date <= self.end_date {
            (self.start_date, self.end_date)
        } else {
            (self.end_date, self.start_date)
        };
        first <= date && date <= last
    }
}

impl Record for PtoRequest {
    const COLLECTION: Collection = Collection::PtoRequests;

    fn id(&self) -> &str {
        &self.id
    }
}
