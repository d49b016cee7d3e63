//! Outbound clients used by the services.

pub mod calculation_client;
pub mod mock;

pub use calculation_client::*;
pub use mock::*;
