//! Owners, their pets and visit history.
//!
//! Layout:
//! - `contract`: types and the [`contract::client::OwnersApi`] trait other modules consume
//! - `domain`: validation, the repository port and the service holding the search flow
//! - `infra`: SeaORM entities, migrations, sample data and the repository adapter
//! - `gateways`: in-process client backed by the service
//! - `api::rest`: view-returning HTTP handlers

pub mod api;
pub mod config;
pub mod contract;
pub mod domain;
pub mod gateways;
pub mod infra;
pub mod module;

pub use config::OwnersConfig;
pub use module::OwnersModule;
