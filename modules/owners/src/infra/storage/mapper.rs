use crate::contract::model::{Owner, Pet, PetType, Visit};
use crate::infra::storage::entity::{owner, pet, pet_type, visit};

pub fn owner_to_contract(entity: owner::Model, pets: Vec<Pet>) -> Owner {
    Owner {
        id: entity.id,
        first_name: entity.first_name,
        last_name: entity.last_name,
        address: entity.address,
        city: entity.city,
        telephone: entity.telephone,
        pets,
    }
}

/// A pet whose type row is missing maps to an empty type name.
pub fn pet_to_contract(
    entity: pet::Model,
    pet_type: Option<pet_type::Model>,
    visits: Vec<Visit>,
) -> Pet {
    Pet {
        id: entity.id,
        name: entity.name,
        birth_date: entity.birth_date,
        pet_type: pet_type.map(|t| t.name).unwrap_or_default(),
        visits,
    }
}

pub fn pet_type_to_contract(entity: pet_type::Model) -> PetType {
    PetType {
        id: entity.id,
        name: entity.name,
    }
}

pub fn visit_to_contract(entity: visit::Model) -> Visit {
    Visit {
        id: entity.id,
        date: entity.visit_date,
        description: entity.description,
    }
}
