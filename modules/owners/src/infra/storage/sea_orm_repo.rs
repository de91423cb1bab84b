//! SeaORM-backed repository implementation for the domain port.
//!
//! Generic over `C: ConnectionTrait`, so it works with a `DatabaseConnection`
//! or a transaction handle alike.

use std::collections::HashMap;

use anyhow::Context;
use chrono::NaiveDate;
use page_core::{Page, PageRequest};
use sea_orm::sea_query::LikeExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::contract::model::{Owner, OwnerDraft, Pet, PetType, Visit};
use crate::domain::repo::OwnersRepository;
use crate::infra::storage::entity::{owner, pet, pet_type, visit};
use crate::infra::storage::mapper;

const LIKE_ESCAPE: char = '!';

/// Escape LIKE wildcards so the filter is matched literally, then append `%`.
fn escape_prefix(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for ch in prefix.chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn prefix_pattern(prefix: &str) -> LikeExpr {
    LikeExpr::new(escape_prefix(prefix)).escape(LIKE_ESCAPE)
}

/// SeaORM repository impl.
/// Holds a connection object; its lifetime/ownership is up to the caller.
pub struct SeaOrmOwnersRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmOwnersRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }

    /// Pets (ordered by name, visits ordered by date) grouped by owner id.
    async fn load_pets(&self, owner_ids: &[i32]) -> anyhow::Result<HashMap<i32, Vec<Pet>>> {
        if owner_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = pet::Entity::find()
            .filter(pet::Column::OwnerId.is_in(owner_ids.iter().copied()))
            .find_also_related(pet_type::Entity)
            .order_by_asc(pet::Column::Name)
            .order_by_asc(pet::Column::Id)
            .all(&self.conn)
            .await
            .context("load pets failed")?;

        let pet_ids: Vec<i32> = rows.iter().map(|(p, _)| p.id).collect();
        let mut visits: HashMap<i32, Vec<Visit>> = HashMap::new();
        if !pet_ids.is_empty() {
            let found = visit::Entity::find()
                .filter(visit::Column::PetId.is_in(pet_ids))
                .order_by_asc(visit::Column::VisitDate)
                .order_by_asc(visit::Column::Id)
                .all(&self.conn)
                .await
                .context("load visits failed")?;
            for v in found {
                visits
                    .entry(v.pet_id)
                    .or_default()
                    .push(mapper::visit_to_contract(v));
            }
        }

        let mut by_owner: HashMap<i32, Vec<Pet>> = HashMap::new();
        for (p, t) in rows {
            let owner_id = p.owner_id;
            let pet_visits = visits.remove(&p.id).unwrap_or_default();
            by_owner
                .entry(owner_id)
                .or_default()
                .push(mapper::pet_to_contract(p, t, pet_visits));
        }
        Ok(by_owner)
    }

    async fn with_pets(&self, rows: Vec<owner::Model>) -> anyhow::Result<Vec<Owner>> {
        let ids: Vec<i32> = rows.iter().map(|o| o.id).collect();
        let mut pets = self.load_pets(&ids).await?;
        Ok(rows
            .into_iter()
            .map(|o| {
                let owned = pets.remove(&o.id).unwrap_or_default();
                mapper::owner_to_contract(o, owned)
            })
            .collect())
    }
}

#[async_trait::async_trait]
impl<C> OwnersRepository for SeaOrmOwnersRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<Owner>> {
        let found = owner::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("find_by_id failed")?;
        match found {
            Some(o) => Ok(self.with_pets(vec![o]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn save(&self, draft: OwnerDraft) -> anyhow::Result<Owner> {
        let is_new = draft.is_new();
        let m = owner::ActiveModel {
            id: match draft.id {
                Some(id) => Set(id),
                None => NotSet,
            },
            first_name: Set(draft.first_name),
            last_name: Set(draft.last_name),
            address: Set(draft.address),
            city: Set(draft.city),
            telephone: Set(draft.telephone),
        };
        let saved = if is_new {
            m.insert(&self.conn).await.context("insert owner failed")?
        } else {
            m.update(&self.conn).await.context("update owner failed")?
        };
        self.with_pets(vec![saved])
            .await?
            .pop()
            .context("saved owner vanished")
    }

    async fn find_by_last_name_starting_with(
        &self,
        prefix: &str,
        request: PageRequest,
    ) -> anyhow::Result<Page<Owner>> {
        let query = owner::Entity::find()
            .filter(owner::Column::LastName.like(prefix_pattern(prefix)));

        let total = query
            .clone()
            .count(&self.conn)
            .await
            .context("count owners failed")?;
        if request.offset() >= total {
            return Ok(Page::new(Vec::new(), request, total));
        }

        let rows = query
            .order_by_asc(owner::Column::Id)
            .offset(request.offset())
            .limit(request.size())
            .all(&self.conn)
            .await
            .context("find owners by last name failed")?;

        let content = self.with_pets(rows).await?;
        Ok(Page::new(content, request, total))
    }

    async fn pet_types(&self) -> anyhow::Result<Vec<PetType>> {
        let rows = pet_type::Entity::find()
            .order_by_asc(pet_type::Column::Name)
            .all(&self.conn)
            .await
            .context("pet_types failed")?;
        Ok(rows.into_iter().map(mapper::pet_type_to_contract).collect())
    }

    async fn insert_pet(
        &self,
        owner_id: i32,
        name: &str,
        birth_date: NaiveDate,
        type_id: i32,
    ) -> anyhow::Result<Pet> {
        let m = pet::ActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
            birth_date: Set(birth_date),
            type_id: Set(type_id),
            owner_id: Set(owner_id),
        };
        let saved = m.insert(&self.conn).await.context("insert pet failed")?;
        let pet_type = pet_type::Entity::find_by_id(type_id)
            .one(&self.conn)
            .await
            .context("load pet type failed")?;
        Ok(mapper::pet_to_contract(saved, pet_type, Vec::new()))
    }

    async fn insert_visit(
        &self,
        pet_id: i32,
        date: NaiveDate,
        description: &str,
    ) -> anyhow::Result<Visit> {
        let m = visit::ActiveModel {
            id: NotSet,
            pet_id: Set(pet_id),
            visit_date: Set(date),
            description: Set(description.to_string()),
        };
        let saved = m.insert(&self.conn).await.context("insert visit failed")?;
        Ok(mapper::visit_to_contract(saved))
    }
}
