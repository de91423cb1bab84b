use std::sync::Arc;

use arc_swap::ArcSwapOption;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{debug, info};
use utoipa::OpenApi;

use crate::api::rest::routes::{self, OwnersApiDoc};
use crate::config::OwnersConfig;
use crate::contract::client::OwnersApi;
use crate::domain::service::{Service, ServiceConfig};
use crate::gateways::local::OwnersLocalClient;
use crate::infra::storage::{migrations::Migrator, sea_orm_repo::SeaOrmOwnersRepository, seed};

/// Owners module: wires the SeaORM repository to the domain service and exposes
/// it over REST and as an in-process client.
#[derive(Default)]
pub struct OwnersModule {
    service: ArcSwapOption<Service>,
}

impl OwnersModule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or upgrade the owners schema.
    pub async fn migrate(&self, db: &DatabaseConnection) -> anyhow::Result<()> {
        info!("Running owners database migrations");
        Migrator::up(db, None).await?;
        info!("Owners database migrations completed successfully");
        Ok(())
    }

    pub async fn init(&self, db: DatabaseConnection, cfg: OwnersConfig) -> anyhow::Result<()> {
        info!("Initializing owners module");
        debug!("Loaded owners config: seed_sample_data={}", cfg.seed_sample_data);

        if cfg.seed_sample_data {
            seed::seed_sample_data(&db).await?;
        }

        let repo = SeaOrmOwnersRepository::new(db);
        let service = Service::new(Arc::new(repo), ServiceConfig::default());
        self.service.store(Some(Arc::new(service)));
        Ok(())
    }

    fn service(&self) -> anyhow::Result<Arc<Service>> {
        self.service
            .load_full()
            .ok_or_else(|| anyhow::anyhow!("Owners service not initialized"))
    }

    pub fn register_rest(&self, router: axum::Router) -> anyhow::Result<axum::Router> {
        info!("Registering owners REST routes");
        let router = routes::register_routes(router, self.service()?);
        info!("Owners REST routes registered successfully");
        Ok(router)
    }

    /// In-process client for other modules.
    pub fn client(&self) -> anyhow::Result<Arc<dyn OwnersApi>> {
        Ok(Arc::new(OwnersLocalClient::new(self.service()?)))
    }

    pub fn openapi() -> utoipa::openapi::OpenApi {
        OwnersApiDoc::openapi()
    }
}
