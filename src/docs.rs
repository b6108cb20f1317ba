use crate::api::employee::{CreateEmployee, UpdateEmployee};
use crate::api::holiday::CreateHoliday;
use crate::api::pto_request::{CreatePtoRequest, UpdatePtoRequest};
use crate::model::{Employee, EmployeeStats, PtoRequest, PublicHoliday, WorkingOnHoliday};
use utoipa::Modify;
use utoipa::{OpenApi, openapi};

/// Prefix the handler annotations are written against.
const DOCUMENTED_PREFIX: &str = "/api";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "PTO Tracker API",
        version = "0.1.0",
        description = r#"
## PTO Tracker

Keeps employees, their paid-time-off requests and public holidays, and
derives per-employee usage.

### Key Features
- **Employees**: create, list and partially update entitlements per year
- **PTO Requests**: create, list, partially update and delete requests
- **Public Holidays**: create, list and delete holidays
- **Stats**: days taken, days remaining, holiday overlap and holidays worked

### Response Format
- JSON bodies; errors are `{ "error": "<message>" }`
- Numeric inputs may be sent as numbers or numeric strings
"#,
    ),
    paths(
        crate::api::employee::list_employees,
        crate::api::employee::create_employee,
        crate::api::employee::update_employee,

        crate::api::pto_request::list_pto_requests,
        crate::api::pto_request::create_pto_request,
        crate::api::pto_request::update_pto_request,
        crate::api::pto_request::delete_pto_request,

        crate::api::holiday::list_holidays,
        crate::api::holiday::create_holiday,
        crate::api::holiday::delete_holiday,

        crate::api::stats::employee_stats
    ),
    components(
        schemas(
            Employee,
            CreateEmployee,
            UpdateEmployee,
            PtoRequest,
            CreatePtoRequest,
            UpdatePtoRequest,
            PublicHoliday,
            CreateHoliday,
            EmployeeStats,
            WorkingOnHoliday
        )
    ),
    tags(
        (name = "Employee", description = "Employee management APIs"),
        (name = "PTO", description = "PTO request APIs"),
        (name = "Holiday", description = "Public holiday APIs"),
        (name = "Stats", description = "Derived PTO usage"),
    )
)]
pub struct ApiDoc;

/// Moves every documented path under the configured API prefix.
pub struct ApiPrefix<'a>(pub &'a str);

impl Modify for ApiPrefix<'_> {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let paths = std::mem::take(&mut openapi.paths.paths);
        openapi.paths.paths = paths
            .into_iter()
            .map(|(path, item)| {
                let rebased = match path.strip_prefix(DOCUMENTED_PREFIX) {
                    Some(rest) => format!("{}{rest}", self.0),
                    None => path,
                };
                (rebased, item)
            })
            .collect();
    }
}

/// The OpenAPI document as served for `api_prefix`.
pub fn openapi(api_prefix: &str) -> openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    ApiPrefix(api_prefix).modify(&mut doc);
    doc
}
