pub mod config;
pub mod engines;
pub mod http;
pub mod repositories;
