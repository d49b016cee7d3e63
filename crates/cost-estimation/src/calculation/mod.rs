//! The calculation service: a synthetic cost estimate behind `GET /calculate`.

pub mod estimator;
pub mod routes;

pub use estimator::*;
pub use routes::*;
