//! Read-only veterinarian directory.

pub mod api;
pub mod config;
pub mod contract;
pub mod domain;
pub mod gateways;
pub mod infra;
pub mod module;

pub use config::VetsConfig;
pub use module::VetsModule;
