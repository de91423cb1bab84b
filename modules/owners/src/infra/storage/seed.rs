//! Sample data for demos and local runs: ten owners, thirteen pets, four visits.

use std::collections::HashMap;

use anyhow::Context;
use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait, Set};
use tracing::info;

use crate::infra::storage::entity::{owner, pet, pet_type, visit};

const OWNERS: [(&str, &str, &str, &str, &str); 10] = [
    ("George", "Franklin", "110 W. Liberty St.", "Madison", "6085551023"),
    ("Betty", "Davis", "638 Cardinal Ave.", "Sun Prairie", "6085551749"),
    ("Eduardo", "Rodriquez", "2693 Commerce St.", "McFarland", "6085558763"),
    ("Harold", "Davis", "563 Friendly St.", "Windsor", "6085553198"),
    ("Peter", "McTavish", "2387 S. Fair Way", "Madison", "6085552765"),
    ("Jean", "Coleman", "105 N. Lake St.", "Monona", "6085552654"),
    ("Jeff", "Black", "1450 Oak Blvd.", "Monona", "6085555387"),
    ("Maria", "Escobito", "345 Maple St.", "Madison", "6085557683"),
    ("David", "Schroeder", "2749 Blackhawk Trail", "Madison", "6085559435"),
    ("Carlos", "Estaban", "2335 Independence La.", "Waunakee", "6085555487"),
];

/// (name, birth date, type, owner index into `OWNERS`)
const PETS: [(&str, (i32, u32, u32), &str, usize); 13] = [
    ("Leo", (2010, 9, 7), "cat", 0),
    ("Basil", (2012, 8, 6), "hamster", 1),
    ("Rosy", (2011, 4, 17), "dog", 2),
    ("Jewel", (2010, 3, 7), "dog", 2),
    ("Iggy", (2010, 11, 30), "lizard", 3),
    ("George", (2010, 1, 20), "snake", 4),
    ("Samantha", (2012, 9, 4), "cat", 5),
    ("Max", (2012, 9, 4), "cat", 5),
    ("Lucky", (2011, 8, 6), "bird", 6),
    ("Mulligan", (2007, 2, 24), "dog", 7),
    ("Freddy", (2010, 3, 9), "bird", 8),
    ("Lucky", (2010, 6, 24), "dog", 9),
    ("Sly", (2012, 6, 8), "cat", 9),
];

/// (pet index into `PETS`, date, description)
const VISITS: [(usize, (i32, u32, u32), &str); 4] = [
    (6, (2013, 1, 1), "rabies shot"),
    (7, (2013, 1, 2), "rabies shot"),
    (7, (2013, 1, 3), "neutered"),
    (6, (2013, 1, 4), "spayed"),
];

fn date((y, m, d): (i32, u32, u32)) -> anyhow::Result<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d).with_context(|| format!("invalid sample date {y}-{m}-{d}"))
}

/// Load the sample data set unless the owners table already has rows.
/// Returns whether anything was inserted.
pub async fn seed_sample_data<C>(conn: &C) -> anyhow::Result<bool>
where
    C: ConnectionTrait,
{
    let existing = owner::Entity::find()
        .count(conn)
        .await
        .context("count owners failed")?;
    if existing > 0 {
        info!(existing, "Owners table not empty, skipping sample data");
        return Ok(false);
    }

    let types: HashMap<String, i32> = pet_type::Entity::find()
        .all(conn)
        .await
        .context("load pet types failed")?
        .into_iter()
        .map(|t| (t.name, t.id))
        .collect();

    let mut owner_ids = Vec::with_capacity(OWNERS.len());
    for (first, last, address, city, telephone) in OWNERS {
        let saved = owner::ActiveModel {
            id: NotSet,
            first_name: Set(first.to_string()),
            last_name: Set(last.to_string()),
            address: Set(address.to_string()),
            city: Set(city.to_string()),
            telephone: Set(telephone.to_string()),
        }
        .insert(conn)
        .await
        .context("insert sample owner failed")?;
        owner_ids.push(saved.id);
    }

    let mut pet_ids = Vec::with_capacity(PETS.len());
    for (name, born, kind, owner_idx) in PETS {
        let type_id = *types
            .get(kind)
            .with_context(|| format!("pet type '{kind}' missing"))?;
        let saved = pet::ActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
            birth_date: Set(date(born)?),
            type_id: Set(type_id),
            owner_id: Set(owner_ids[owner_idx]),
        }
        .insert(conn)
        .await
        .context("insert sample pet failed")?;
        pet_ids.push(saved.id);
    }

    for (pet_idx, on, description) in VISITS {
        visit::ActiveModel {
            id: NotSet,
            pet_id: Set(pet_ids[pet_idx]),
            visit_date: Set(date(on)?),
            description: Set(description.to_string()),
        }
        .insert(conn)
        .await
        .context("insert sample visit failed")?;
    }

    info!(
        owners = OWNERS.len(),
        pets = PETS.len(),
        visits = VISITS.len(),
        "Loaded sample data"
    );
    Ok(true)
}
