use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::store::{Collection, Record};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(
    example = json!({
        "id": "3f2b8c1e-6a4d-4e0f-9c57-1d2a9b7e5f10",
        "name": "Jane Doe",
        "totalPTODays": 20,
        "takenDays": 0,
        "year": 2024
    })
)]
pub struct Employee {
    #[schema(example = "3f2b8c1e-6a4d-4e0f-9c57-1d2a9b7e5f10")]
    pub id: String,

    #[schema(example = "Jane Doe")]
    pub name: String,

    /// Entitlement for the year; fractional days allowed.
    #[serde(rename = "totalPTODays")]
    #[schema(example = 20)]
    pub total_pto_days: f64,

    /// Stored value; `/stats` recomputes it from the requests.
    #[schema(example = 0)]
    pub taken_days: f64,

    #[schema(example = 2024)]
    pub year: i32,
}

impl Record for Employee {
    const COLLECTION: Collection = Collection::Employees;

    fn id(&self) -> &str {
        &self.id
    }
}
