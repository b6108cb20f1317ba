use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::store::{Collection, Record};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicHoliday {
    #[schema(example = "8d0a7c55-2f3e-4b1a-a6f9-0e4c2d9b1a77")]
    pub id: String,

    #[schema(example = "Christmas Day")]
    pub name: String,

    #[schema(example = "2024-12-25", format = "date", value_type = String)]
    pub date: NaiveDate,

    #[schema(example = 2024)]
    pub year: i32,
}

impl Record for PublicHoliday {
    const COLLECTION: Collection = Collection::PublicHolidays;

    fn id(&self) -> &str {
        &self.id
    }
}
