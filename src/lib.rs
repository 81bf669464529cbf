pub mod constants;
pub mod fetch;
pub mod formatters;
pub mod models;
pub mod service;
pub mod system;
pub mod weather;
