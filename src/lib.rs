pub mod config;
pub mod errors;
pub mod fetch;
pub mod resolution;
pub mod types;
