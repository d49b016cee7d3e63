//! The order service: mints an order id and asks the calculation service for
//! its cost estimate.

pub mod error;
pub mod handler;
pub mod routes;

pub use error::*;
pub use handler::*;
pub use routes::*;
