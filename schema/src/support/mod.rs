// Shared support modules

pub mod tracing;
