pub mod csrf;
pub mod flash;
pub mod headers;
pub mod tracing;
pub mod views;
