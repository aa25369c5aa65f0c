//! Data gateway over the hosted Postgres backend

pub mod queries;

pub use queries::{fetch_active_promotion, fetch_service_by_id, fetch_services};
