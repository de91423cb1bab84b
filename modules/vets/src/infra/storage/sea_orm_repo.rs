//! SeaORM adapter for the vet directory.

use std::collections::HashMap;

use anyhow::Context;
use page_core::{Page, PageRequest};
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::contract::model::Vet;
use crate::domain::repo::VetsRepository;
use crate::infra::storage::entity::{specialty, vet, vet_specialty};

pub struct SeaOrmVetsRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmVetsRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }

    /// Attach specialty names (sorted) to each vet row, keeping row order.
    async fn with_specialties(&self, rows: Vec<vet::Model>) -> anyhow::Result<Vec<Vet>> {
        let ids: Vec<i32> = rows.iter().map(|v| v.id).collect();
        let mut names: HashMap<i32, Vec<String>> = HashMap::new();
        if !ids.is_empty() {
            let links = vet_specialty::Entity::find()
                .filter(vet_specialty::Column::VetId.is_in(ids))
                .find_also_related(specialty::Entity)
                .all(&self.conn)
                .await
                .context("load specialties failed")?;
            for (link, spec) in links {
                if let Some(spec) = spec {
                    names.entry(link.vet_id).or_default().push(spec.name);
                }
            }
        }

        Ok(rows
            .into_iter()
            .map(|v| {
                let mut specialties = names.remove(&v.id).unwrap_or_default();
                specialties.sort();
                Vet {
                    id: v.id,
                    first_name: v.first_name,
                    last_name: v.last_name,
                    specialties,
                }
            })
            .collect())
    }
}

#[async_trait::async_trait]
impl<C> VetsRepository for SeaOrmVetsRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn list_page(&self, request: PageRequest) -> anyhow::Result<Page<Vet>> {
        let total = vet::Entity::find()
            .count(&self.conn)
            .await
            .context("count vets failed")?;
        if request.offset() >= total {
            return Ok(Page::new(Vec::new(), request, total));
        }
        let rows = vet::Entity::find()
            .order_by_asc(vet::Column::Id)
            .offset(request.offset())
            .limit(request.size())
            .all(&self.conn)
            .await
            .context("list vets page failed")?;
        Ok(Page::new(self.with_specialties(rows).await?, request, total))
    }

    async fn list_all(&self) -> anyhow::Result<Vec<Vet>> {
        let rows = vet::Entity::find()
            .order_by_asc(vet::Column::Id)
            .all(&self.conn)
            .await
            .context("list vets failed")?;
        self.with_specialties(rows).await
    }
}
