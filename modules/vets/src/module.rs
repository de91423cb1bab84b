use std::sync::Arc;

use arc_swap::ArcSwapOption;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{debug, info};
use utoipa::OpenApi;

use crate::api::rest::routes::{self, VetsApiDoc};
use crate::config::VetsConfig;
use crate::contract::client::VetsApi;
use crate::domain::service::Service;
use crate::gateways::local::VetsLocalClient;
use crate::infra::storage::{migrations::Migrator, sea_orm_repo::SeaOrmVetsRepository, seed};

#[derive(Default)]
pub struct VetsModule {
    service: ArcSwapOption<Service>,
}

impl VetsModule {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn migrate(&self, db: &DatabaseConnection) -> anyhow::Result<()> {
        info!("Running vets database migrations");
        Migrator::up(db, None).await?;
        Ok(())
    }

    pub async fn init(&self, db: DatabaseConnection, cfg: VetsConfig) -> anyhow::Result<()> {
        info!("Initializing vets module");
        debug!("Loaded vets config: page_size={}", cfg.page_size);

        if cfg.seed_sample_data {
            seed::seed_sample_data(&db).await?;
        }

        let service = Service::new(Arc::new(SeaOrmVetsRepository::new(db)), cfg.page_size);
        self.service.store(Some(Arc::new(service)));
        Ok(())
    }

    fn service(&self) -> anyhow::Result<Arc<Service>> {
        self.service
            .load_full()
            .ok_or_else(|| anyhow::anyhow!("Vets service not initialized"))
    }

    pub fn register_rest(&self, router: axum::Router) -> anyhow::Result<axum::Router> {
        info!("Registering vets REST routes");
        Ok(routes::register_routes(router, self.service()?))
    }

    pub fn client(&self) -> anyhow::Result<Arc<dyn VetsApi>> {
        Ok(Arc::new(VetsLocalClient::new(self.service()?)))
    }

    pub fn openapi() -> utoipa::openapi::OpenApi {
        VetsApiDoc::openapi()
    }
}
