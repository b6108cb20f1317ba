//! Per-employee PTO breakdown.
//!
//! Requests are matched to an employee by id and by the request's own `year`
//! field, never by its dates. A request that touches at least one holiday of
//! the employee's year counts wholly as public-holiday days; otherwise it
//! counts wholly as regular days.

use crate::model::{Employee, EmployeeStats, PtoRequest, PublicHoliday, WorkingOnHoliday};

/// Stats for every employee, in stored order.
pub fn compute(
    employees: &[Employee],
    requests: &[PtoRequest],
    holidays: &[PublicHoliday],
) -> Vec<EmployeeStats> {
    employees
        .iter()
        .map(|employee| employee_stats(employee, requests, holidays))
        .collect()
}

pub fn employee_stats(
    employee: &Employee,
    requests: &[PtoRequest],
    holidays: &[PublicHoliday],
) -> EmployeeStats {
    let own: Vec<&PtoRequest> = requests
        .iter()
        .filter(|r| r.employee_id == employee.id && r.year == employee.year)
        .collect();
    let year_holidays: Vec<&PublicHoliday> = holidays
        .iter()
        .filter(|h| h.year == employee.year)
        .collect();

    let mut regular_days = 0.0;
    let mut public_holiday_days = 0.0;
    for request in &own {
        if year_holidays.iter().any(|h| request.covers(h.date)) {
            public_holiday_days += request.total_days;
        } else {
            regular_days += request.total_days;
        }
    }

    let working_on_holidays = year_holidays
        .iter()
        .filter(|h| !own.iter().any(|r| r.covers(h.date)))
        .map(|h| WorkingOnHoliday {
            date: h.date,
            holiday_name: h.name.clone(),
        })
        .collect();

    EmployeeStats {
        employee: Employee {
            taken_days: regular_days,
            ..employee.clone()
        },
        requests: own.into_iter().cloned().collect(),
        remaining_days: employee.total_pto_days - regular_days,
        public_holiday_days,
        working_on_holidays,
    }
}
