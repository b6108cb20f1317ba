use crate::{
    error::ApiError,
    model::{Employee, PtoRequest, PublicHoliday},
    stats,
    store::{KvStore, load_collection},
};
use actix_web::{HttpResponse, web};
use tracing::debug;

/// Per-employee PTO breakdown for each employee's own year
#[utoipa::path(
    get,
    path = "/api/stats",
    responses(
        (status = 200, description = "Stats for every employee", body = [EmployeeStats]),
        (status = 500, description = "Store unavailable", body = Object, example = json!({
            "error": "Failed to fetch stats"
        }))
    ),
    tag = "Stats"
)]
pub async fn employee_stats(store: web::Data<dyn KvStore>) -> Result<HttpResponse, ApiError> {
    let store = store.get_ref();
    let (employees, requests, holidays) = futures::try_join!(
        load_collection::<Employee>(store),
        load_collection::<PtoRequest>(store),
        load_collection::<PublicHoliday>(store),
    )
    .map_err(ApiError::internal("Failed to fetch stats"))?;

    let stats = stats::compute(&employees, &requests, &holidays);
    debug!(
        employees = employees.len(),
        requests = requests.len(),
        holidays = holidays.len(),
        "Computed employee stats"
    );

    Ok(HttpResponse::Ok().json(stats))
}
