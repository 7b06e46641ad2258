//! Rosehill Ops API: profiles and work items over MongoDB.
pub mod config;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
