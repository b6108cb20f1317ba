//! PTO tracking service: employees, PTO requests and public holidays kept in
//! a key-value store, plus a derived per-employee usage report.

pub mod api;
pub mod config;
pub mod docs;
pub mod error;
pub mod model;
pub mod routes;
pub mod stats;
pub mod store;
pub mod ui;
