pub mod batching;
pub mod monitor;
pub mod validation;
