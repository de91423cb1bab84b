use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::contract::model::{NewPet, NewVisit, Owner, OwnerDraft, Pet, PetType, Visit};

/// REST DTO for owner representation, pets included
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnerDto {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub telephone: String,
    pub pets: Vec<PetDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PetDto {
    pub id: i32,
    pub name: String,
    pub birth_date: NaiveDate,
    #[serde(rename = "type")]
    pub pet_type: String,
    pub visits: Vec<VisitDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VisitDto {
    pub id: i32,
    pub date: NaiveDate,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PetTypeDto {
    pub id: i32,
    pub name: String,
}

/// Submitted owner form. Missing fields default to empty strings so that
/// validation, not deserialization, reports them. Any submitted id is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct OwnerFormDto {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub telephone: String,
}

/// Query parameters of the owner search. `page` is 1-based; values below 1 mean 1.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct FindOwnersQuery {
    /// Last-name prefix; absent matches every owner
    pub last_name: Option<String>,
    pub page: Option<i64>,
}

impl FindOwnersQuery {
    pub fn page_number(&self) -> u64 {
        match self.page {
            Some(p) if p >= 1 => p as u64,
            _ => 1,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct PetFormDto {
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    #[serde(rename = "type")]
    pub pet_type: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct VisitFormDto {
    /// Defaults to today
    pub date: Option<NaiveDate>,
    pub description: String,
}

// Conversion implementations between REST DTOs and contract models

impl From<Owner> for OwnerDto {
    fn from(o: Owner) -> Self {
        Self {
            id: o.id,
            first_name: o.first_name,
            last_name: o.last_name,
            address: o.address,
            city: o.city,
            telephone: o.telephone,
            pets: o.pets.into_iter().map(PetDto::from).collect(),
        }
    }
}

impl From<Pet> for PetDto {
    fn from(p: Pet) -> Self {
        Self {
            id: p.id,
            name: p.name,
            birth_date: p.birth_date,
            pet_type: p.pet_type,
            visits: p.visits.into_iter().map(VisitDto::from).collect(),
        }
    }
}

impl From<Visit> for VisitDto {
    fn from(v: Visit) -> Self {
        Self {
            id: v.id,
            date: v.date,
            description: v.description,
        }
    }
}

impl From<PetType> for PetTypeDto {
    fn from(t: PetType) -> Self {
        Self {
            id: t.id,
            name: t.name,
        }
    }
}

impl From<&Owner> for OwnerFormDto {
    fn from(o: &Owner) -> Self {
        Self {
            first_name: o.first_name.clone(),
            last_name: o.last_name.clone(),
            address: o.address.clone(),
            city: o.city.clone(),
            telephone: o.telephone.clone(),
        }
    }
}

impl From<OwnerFormDto> for OwnerDraft {
    fn from(f: OwnerFormDto) -> Self {
        Self {
            id: None,
            first_name: f.first_name,
            last_name: f.last_name,
            address: f.address,
            city: f.city,
            telephone: f.telephone,
        }
    }
}

impl From<PetFormDto> for NewPet {
    fn from(f: PetFormDto) -> Self {
        Self {
            name: f.name,
            birth_date: f.birth_date,
            pet_type: f.pet_type,
        }
    }
}

impl From<VisitFormDto> for NewVisit {
    fn from(f: VisitFormDto) -> Self {
        Self {
            date: f.date,
            description: f.description,
        }
    }
}
