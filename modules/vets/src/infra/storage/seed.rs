//! Sample vet directory: six vets, three specialties.

use std::collections::HashMap;

use anyhow::Context;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait, Set};
use tracing::info;

use crate::infra::storage::entity::{specialty, vet, vet_specialty};

const SPECIALTIES: [&str; 3] = ["radiology", "surgery", "dentistry"];

const VETS: [(&str, &str, &[&str]); 6] = [
    ("James", "Carter", &[]),
    ("Helen", "Leary", &["radiology"]),
    ("Linda", "Douglas", &["surgery", "dentistry"]),
    ("Rafael", "Ortega", &["surgery"]),
    ("Henry", "Stevens", &["radiology"]),
    ("Sharon", "Jenkins", &[]),
];

/// Load the sample vets unless the vets table already has rows.
/// Returns whether anything was inserted.
pub async fn seed_sample_data<C>(conn: &C) -> anyhow::Result<bool>
where
    C: ConnectionTrait,
{
    let existing = vet::Entity::find()
        .count(conn)
        .await
        .context("count vets failed")?;
    if existing > 0 {
        info!(existing, "Vets table not empty, skipping sample data");
        return Ok(false);
    }

    let mut specialty_ids = HashMap::new();
    for name in SPECIALTIES {
        let saved = specialty::ActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
        }
        .insert(conn)
        .await
        .context("insert sample specialty failed")?;
        specialty_ids.insert(name, saved.id);
    }

    for (first, last, specialties) in VETS {
        let saved = vet::ActiveModel {
            id: NotSet,
            first_name: Set(first.to_string()),
            last_name: Set(last.to_string()),
        }
        .insert(conn)
        .await
        .context("insert sample vet failed")?;

        for name in specialties {
            let specialty_id = *specialty_ids
                .get(name)
                .with_context(|| format!("specialty '{name}' missing"))?;
            vet_specialty::ActiveModel {
                vet_id: Set(saved.id),
                specialty_id: Set(specialty_id),
            }
            .insert(conn)
            .await
            .context("insert sample vet specialty failed")?;
        }
    }

    info!(vets = VETS.len(), "Loaded sample vets");
    Ok(true)
}
