use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::contract::model::Vet;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpecialtyDto {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VetDto {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub specialties: Vec<SpecialtyDto>,
    pub nr_of_specialties: usize,
}

/// The whole directory as served by `/vets.json`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VetsDto {
    pub vet_list: Vec<VetDto>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct VetsPageQuery {
    /// 1-based; values below 1 mean 1
    pub page: Option<i64>,
}

impl VetsPageQuery {
    pub fn page_number(&self) -> u64 {
        match self.page {
            Some(p) if p >= 1 => p as u64,
            _ => 1,
        }
    }
}

impl From<Vet> for VetDto {
    fn from(v: Vet) -> Self {
        let nr_of_specialties = v.nr_of_specialties();
        Self {
            id: v.id,
            first_name: v.first_name,
            last_name: v.last_name,
            specialties: v
                .specialties
                .into_iter()
                .map(|name| SpecialtyDto { name })
                .collect(),
            nr_of_specialties,
        }
    }
}
