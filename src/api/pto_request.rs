use crate::{
    api::{
        IdQuery,
        input::{self, NumberInput},
    },
    error::ApiError,
    model::{PtoRequest, new_id},
    store::{KvStore, find_index, load_collection, remove_by_id, save_collection},
};
use actix_web::{HttpResponse, web};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePtoRequest {
    #[schema(example = "3f2b8c1e-6a4d-4e0f-9c57-1d2a9b7e5f10")]
    pub employee_id: Option<String>,
    #[schema(example = "Jane Doe")]
    pub employee_name: Option<String>,
    #[schema(example = "2024-12-24", format = "date")]
    pub start_date: Option<String>,
    #[schema(example = "2024-12-26", format = "date")]
    pub end_date: Option<String>,
    #[schema(example = 3, value_type = Option<f64>)]
    pub total_days: Option<NumberInput>,
    #[schema(example = 2024, value_type = Option<i32>)]
    pub year: Option<NumberInput>,
}

impl CreatePtoRequest {
    pub fn into_request(self, id: String, created_at: DateTime<Utc>) -> Result<PtoRequest, ApiError> {
        let employee_id = input::text(self.employee_id);
        let employee_name = input::text(self.employee_name);
        let start = input::text(self.start_date);
        let end = input::text(self.end_date);
        let total = input::number(self.total_days);
        let year = input::year(self.year)?;

        let (Some(employee_id), Some(employee_name), Some(start), Some(end), Some(total), Some(year)) =
            (employee_id, employee_name, start, end, total, year)
        else {
            return Err(ApiError::missing_fields());
        };

        let request = PtoRequest {
            id,
            employee_id,
            employee_name,
            start_date: input::parse_date("startDate", &start)?,
            end_date: input::parse_date("endDate", &end)?,
            total_days: total.to_f64("totalDays")?,
            year,
            created_at,
        };
        check_range(&request)?;
        Ok(request)
    }
}

/// Partial update; only the fields present are applied.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePtoRequest {
    pub id: Option<String>,
    pub employee_id: Option<String>,
    pub employee_name: Option<String>,
    #[schema(format = "date")]
    pub start_date: Option<String>,
    #[schema(format = "date")]
    pub end_date: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub total_days: Option<NumberInput>,
    #[schema(value_type = Option<i32>)]
    pub year: Option<NumberInput>,
}

impl UpdatePtoRequest {
    pub fn apply_to(self, request: &mut PtoRequest) -> Result<(), ApiError> {
        if let Some(employee_id) = input::text(self.employee_id) {
            request.employee_id = employee_id;
        }
        if let Some(employee_name) = input::text(self.employee_name) {
            request.employee_name = employee_name;
        }
        if let Some(start) = input::text(self.start_date) {
            request.start_date = input::parse_date("startDate", &start)?;
        }
        if let Some(end) = input::text(self.end_date) {
            request.end_date = input::parse_date("endDate", &end)?;
        }
        if let Some(total) = input::number(self.total_days) {
            request.total_days = total.to_f64("totalDays")?;
        }
        if let Some(year) = input::year(self.year)? {
            request.year = year;
        }
        check_range(request)
    }
}

fn check_range(request: &PtoRequest) -> Result<(), ApiError> {
    if request.start_date > request.end_date {
        return Err(ApiError::validation("startDate cannot be after endDate"));
    }
    Ok(())
}

/// List PTO requests
#[utoipa::path(
    get,
    path = "/api/pto-requests",
    responses(
        (status = 200, description = "All PTO requests", body = [PtoRequest]),
        (status = 500, description = "Store unavailable", body = Object, example = json!({
            "error": "Failed to fetch PTO requests"
        }))
    ),
    tag = "PTO"
)]
pub async fn list_pto_requests(store: web::Data<dyn KvStore>) -> Result<HttpResponse, ApiError> {
    let requests: Vec<PtoRequest> = load_collection(store.get_ref())
        .await
        .map_err(ApiError::internal("Failed to fetch PTO requests"))?;

    Ok(HttpResponse::Ok().json(requests))
}

/// Create PTO request
#[utoipa::path(
    post,
    path = "/api/pto-requests",
    request_body(
        content = CreatePtoRequest,
        description = "PTO request payload",
        content_type = "application/json"
    ),
    responses(
        (status = 201, description = "PTO request created", body = PtoRequest),
        (status = 400, description = "Missing or invalid field", body = Object, example = json!({
            "error": "Missing required fields"
        })),
        (status = 500, description = "Store unavailable")
    ),
    tag = "PTO"
)]
pub async fn create_pto_request(
    store: web::Data<dyn KvStore>,
    payload: web::Json<CreatePtoRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = payload.into_inner().into_request(new_id(), Utc::now())?;

    let mut requests: Vec<PtoRequest> = load_collection(store.get_ref())
        .await
        .map_err(ApiError::internal("Failed to create PTO request"))?;
    requests.push(request.clone());
    save_collection(store.get_ref(), &requests)
        .await
        .map_err(ApiError::internal("Failed to create PTO request"))?;

    info!(
        request_id = %request.id,
        employee_id = %request.employee_id,
        total_days = request.total_days,
        "PTO request created"
    );
    Ok(HttpResponse::Created().json(request))
}

/// Update PTO request
#[utoipa::path(
    put,
    path = "/api/pto-requests",
    request_body = UpdatePtoRequest,
    responses(
        (status = 200, description = "PTO request updated", body = PtoRequest),
        (status = 400, description = "Request ID is required", body = Object, example = json!({
            "error": "Request ID is required"
        })),
        (status = 404, description = "Request not found", body = Object, example = json!({
            "error": "Request not found"
        })),
        (status = 500, description = "Store unavailable")
    ),
    tag = "PTO"
)]
pub async fn update_pto_request(
    store: web::Data<dyn KvStore>,
    payload: web::Json<UpdatePtoRequest>,
) -> Result<HttpResponse, ApiError> {
    let mut payload = payload.into_inner();
    let id = input::text(payload.id.take())
        .ok_or_else(|| ApiError::validation("Request ID is required"))?;

    let mut requests: Vec<PtoRequest> = load_collection(store.get_ref())
        .await
        .map_err(ApiError::internal("Failed to update PTO request"))?;
    let index = find_index(&requests, &id).ok_or_else(|| ApiError::not_found("Request not found"))?;

    let mut updated = requests[index].clone();
    payload.apply_to(&mut updated)?;
    requests[index] = updated.clone();

    save_collection(store.get_ref(), &requests)
        .await
        .map_err(ApiError::internal("Failed to update PTO request"))?;

    Ok(HttpResponse::Ok().json(updated))
}

/// Delete PTO request
#[utoipa::path(
    delete,
    path = "/api/pto-requests",
    params(IdQuery),
    responses(
        (status = 200, description = "PTO request deleted", body = Object, example = json!({
            "success": true
        })),
        (status = 400, description = "Request ID is required"),
        (status = 404, description = "Request not found", body = Object, example = json!({
            "error": "Request not found"
        })),
        (status = 500, description = "Store unavailable")
    ),
    tag = "PTO"
)]
pub async fn delete_pto_request(
    store: web::Data<dyn KvStore>,
    query: web::Query<IdQuery>,
) -> Result<HttpResponse, ApiError> {
    let id = input::text(query.into_inner().id)
        .ok_or_else(|| ApiError::validation("Request ID is required"))?;

    let mut requests: Vec<PtoRequest> = load_collection(store.get_ref())
        .await
        .map_err(ApiError::internal("Failed to delete PTO request"))?;
    if !remove_by_id(&mut requests, &id) {
        return Err(ApiError::not_found("Request not found"));
    }
    save_collection(store.get_ref(), &requests)
        .await
        .map_err(ApiError::internal("Failed to delete PTO request"))?;

    info!(request_id = %id, "PTO request deleted");
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}
