pub mod api;
pub mod config;
pub mod dispatch;
pub mod driver;
pub mod engine;
pub mod error;
pub mod exec;
pub mod report;
pub mod scenario;
