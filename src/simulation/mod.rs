pub mod aggregate;
pub mod config;
pub mod engine;
pub mod projection;
