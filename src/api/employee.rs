use crate::{
    api::input::{self, NumberInput},
    error::ApiError,
    model::{Employee, new_id},
    store::{KvStore, find_index, load_collection, save_collection},
};
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployee {
    #[schema(example = "Jane Doe")]
    pub name: Option<String>,
    #[serde(rename = "totalPTODays")]
    #[schema(example = 20, value_type = Option<f64>)]
    pub total_pto_days: Option<NumberInput>,
    #[schema(example = 0, value_type = Option<f64>)]
    pub taken_days: Option<NumberInput>,
    #[schema(example = 2024, value_type = Option<i32>)]
    pub year: Option<NumberInput>,
}

impl CreateEmployee {
    /// Validate every field before anything is written.
    pub fn into_employee(self, id: String) -> Result<Employee, ApiError> {
        let name = input::text(self.name);
        let total = input::number(self.total_pto_days);
        let taken = input::number(self.taken_days);
        let year = input::year(self.year)?;

        let (Some(name), Some(total), Some(taken), Some(year)) = (name, total, taken, year) else {
            return Err(ApiError::missing_fields());
        };

        Ok(Employee {
            id,
            name,
            total_pto_days: total.to_f64("totalPTODays")?,
            taken_days: taken.to_f64("takenDays")?,
            year,
        })
    }
}

/// Partial update; only the fields present are applied.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployee {
    #[schema(example = "3f2b8c1e-6a4d-4e0f-9c57-1d2a9b7e5f10")]
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "totalPTODays")]
    #[schema(value_type = Option<f64>)]
    pub total_pto_days: Option<NumberInput>,
    #[schema(value_type = Option<f64>)]
    pub taken_days: Option<NumberInput>,
    #[schema(value_type = Option<i32>)]
    pub year: Option<NumberInput>,
}

impl UpdateEmployee {
    pub fn apply_to(self, employee: &mut Employee) -> Result<(), ApiError> {
        if let Some(name) = input::text(self.name) {
            employee.name = name;
        }
        if let Some(total) = input::number(self.total_pto_days) {
            employee.total_pto_days = total.to_f64("totalPTODays")?;
        }
        if let Some(taken) = input::number(self.taken_days) {
            employee.taken_days = taken.to_f64("takenDays")?;
        }
        if let Some(year) = input::year(self.year)? {
            employee.year = year;
        }
        Ok(())
    }
}

/// List employees
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "All employees", body = [Employee]),
        (status = 500, description = "Store unavailable", body = Object, example = json!({
            "error": "Failed to fetch employees"
        }))
    ),
    tag = "Employee"
)]
pub async fn list_employees(store: web::Data<dyn KvStore>) -> Result<HttpResponse, ApiError> {
    let employees: Vec<Employee> = load_collection(store.get_ref())
        .await
        .map_err(ApiError::internal("Failed to fetch employees"))?;

    Ok(HttpResponse::Ok().json(employees))
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 400, description = "Missing or invalid field", body = Object, example = json!({
            "error": "Missing required fields"
        })),
        (status = 500, description = "Store unavailable")
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    store: web::Data<dyn KvStore>,
    payload: web::Json<CreateEmployee>,
) -> Result<HttpResponse, ApiError> {
    let employee = payload.into_inner().into_employee(new_id())?;

    let mut employees: Vec<Employee> = load_collection(store.get_ref())
        .await
        .map_err(ApiError::internal("Failed to create employee"))?;
    employees.push(employee.clone());
    save_collection(store.get_ref(), &employees)
        .await
        .map_err(ApiError::internal("Failed to create employee"))?;

    info!(employee_id = %employee.id, year = employee.year, "Employee created");
    Ok(HttpResponse::Created().json(employee))
}

/// Update Employee
#[utoipa::path(
    put,
    path = "/api/employees",
    request_body = UpdateEmployee,
    responses(
        (status = 200, description = "Employee updated", body = Employee),
        (status = 400, description = "Employee ID is required", body = Object, example = json!({
            "error": "Employee ID is required"
        })),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "error": "Employee not found"
        })),
        (status = 500, description = "Store unavailable")
    ),
    tag = "Employee"
)]
pub async fn update_employee(
    store: web::Data<dyn KvStore>,
    payload: web::Json<UpdateEmployee>,
) -> Result<HttpResponse, ApiError> {
    let mut payload = payload.into_inner();
    let id = input::text(payload.id.take())
        .ok_or_else(|| ApiError::validation("Employee ID is required"))?;

    let mut employees: Vec<Employee> = load_collection(store.get_ref())
        .await
        .map_err(ApiError::internal("Failed to update employee"))?;
    let index = find_index(&employees, &id).ok_or_else(|| ApiError::not_found("Employee not found"))?;

    let mut updated = employees[index].clone();
    payload.apply_to(&mut updated)?;
    employees[index] = updated.clone();

    save_collection(store.get_ref(), &employees)
        .await
        .map_err(ApiError::internal("Failed to update employee"))?;

    Ok(HttpResponse::Ok().json(updated))
}
