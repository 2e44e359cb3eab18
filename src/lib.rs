pub mod api;
pub mod clients;
pub mod config;
pub mod models;
pub mod worker;
