use crate::{
    api::{
        IdQuery,
        input::{self, NumberInput},
    },
    error::ApiError,
    model::{PublicHoliday, new_id},
    store::{KvStore, load_collection, remove_by_id, save_collection},
};
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateHoliday {
    #[schema(example = "Christmas Day")]
    pub name: Option<String>,
    #[schema(example = "2024-12-25", format = "date")]
    pub date: Option<String>,
    #[schema(example = 2024, value_type = Option<i32>)]
    pub year: Option<NumberInput>,
}

impl CreateHoliday {
    pub fn into_holiday(self, id: String) -> Result<PublicHoliday, ApiError> {
        let name = input::text(self.name);
        let date = input::text(self.date);
        let year = input::year(self.year)?;

        let (Some(name), Some(date), Some(year)) = (name, date, year) else {
            return Err(ApiError::missing_fields());
        };

        Ok(PublicHoliday {
            id,
            name,
            date: input::parse_date("date", &date)?,
            year,
        })
    }
}

/// List public holidays
#[utoipa::path(
    get,
    path = "/api/holidays",
    responses(
        (status = 200, description = "All public holidays", body = [PublicHoliday]),
        (status = 500, description = "Store unavailable", body = Object, example = json!({
            "error": "Failed to fetch holidays"
        }))
    ),
    tag = "Holiday"
)]
pub async fn list_holidays(store: web::Data<dyn KvStore>) -> Result<HttpResponse, ApiError> {
    let holidays: Vec<PublicHoliday> = load_collection(store.get_ref())
        .await
        .map_err(ApiError::internal("Failed to fetch holidays"))?;

    Ok(HttpResponse::Ok().json(holidays))
}

/// Create public holiday
#[utoipa::path(
    post,
    path = "/api/holidays",
    request_body = CreateHoliday,
    responses(
        (status = 201, description = "Holiday created", body = PublicHoliday),
        (status = 400, description = "Missing or invalid field", body = Object, example = json!({
            "error": "Missing required fields"
        })),
        (status = 500, description = "Store unavailable")
    ),
    tag = "Holiday"
)]
pub async fn create_holiday(
    store: web::Data<dyn KvStore>,
    payload: web::Json<CreateHoliday>,
) -> Result<HttpResponse, ApiError> {
    let holiday = payload.into_inner().into_holiday(new_id())?;

    let mut holidays: Vec<PublicHoliday> = load_collection(store.get_ref())
        .await
        .map_err(ApiError::internal("Failed to create holiday"))?;
    holidays.push(holiday.clone());
    save_collection(store.get_ref(), &holidays)
        .await
        .map_err(ApiError::internal("Failed to create holiday"))?;

    info!(holiday_id = %holiday.id, date = %holiday.date, "Holiday created");
    Ok(HttpResponse::Created().json(holiday))
}

/// Delete public holiday
#[utoipa::path(
    delete,
    path = "/api/holidays",
    params(IdQuery),
    responses(
        (status = 200, description = "Holiday deleted", body = Object, example = json!({
            "success": true
        })),
        (status = 400, description = "Holiday ID is required"),
        (status = 404, description = "Holiday not found", body = Object, example = json!({
            "error": "Holiday not found"
        })),
        (status = 500, description = "Store unavailable")
    ),
    tag = "Holiday"
)]
pub async fn delete_holiday(
    store: web::Data<dyn KvStore>,
    query: web::Query<IdQuery>,
) -> Result<HttpResponse, ApiError> {
    let id = input::text(query.into_inner().id)
        .ok_or_else(|| ApiError::validation("Holiday ID is required"))?;

    let mut holidays: Vec<PublicHoliday> = load_collection(store.get_ref())
        .await
        .map_err(ApiError::internal("Failed to delete holiday"))?;
    if !remove_by_id(&mut holidays, &id) {
        return Err(ApiError::not_found("Holiday not found"));
    }
    save_collection(store.get_ref(), &holidays)
        .await
        .map_err(ApiError::internal("Failed to delete holiday"))?;

    info!(holiday_id = %id, "Holiday deleted");
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}
