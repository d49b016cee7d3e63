//! Request-scoped value types. Nothing here is persisted.

pub mod calculation;
pub mod order;

pub use calculation::*;
pub use order::*;
