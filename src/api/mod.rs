pub mod employee;
pub mod holiday;
pub mod input;
pub mod pto_request;
pub mod stats;

use serde::Deserialize;
use utoipa::IntoParams;

/// `?id=` selector for deletes.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IdQuery {
    /// Identifier of the record to delete
    pub id: Option<String>,
}
