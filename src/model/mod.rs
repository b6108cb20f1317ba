pub mod employee;
pub mod holiday;
pub mod pto_request;
pub mod stats;

pub use employee::Employee;
pub use holiday::PublicHoliday;
pub use pto_request::PtoRequest;
pub use stats::{EmployeeStats, WorkingOnHoliday};

use uuid::Uuid;

/// Fresh record identifier.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}
