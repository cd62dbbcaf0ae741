pub mod config;
pub mod dashboard;
pub mod global;
pub mod http;
pub mod store;
pub mod types;
