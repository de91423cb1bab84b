use chrono::NaiveDate;
use page_core::Page;

/// A persisted clinic customer. `id` is assigned by the store on first save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub telephone: String,
    /// Ordered by pet name.
    pub pets: Vec<Pet>,
}

/// Owner data as submitted by a form. `id` is absent until the record is saved.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OwnerDraft {
    pub id: Option<i32>,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub telephone: String,
}

impl OwnerDraft {
    /// True until the store has assigned an identifier.
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }
}

impl From<&Owner> for OwnerDraft {
    fn from(o: &Owner) -> Self {
        Self {
            id: Some(o.id),
            first_name: o.first_name.clone(),
            last_name: o.last_name.clone(),
            address: o.address.clone(),
            city: o.city.clone(),
            telephone: o.telephone.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetType {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pet {
    pub id: i32,
    pub name: String,
    pub birth_date: NaiveDate,
    pub pet_type: String,
    /// Ordered by visit date.
    pub visits: Vec<Visit>,
}

/// A pet submitted for registration; the type is given by name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewPet {
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub pet_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visit {
    pub id: i32,
    pub date: NaiveDate,
    pub description: String,
}

/// A visit submitted for a pet; a missing date means today.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewVisit {
    pub date: Option<NaiveDate>,
    pub description: String,
}

/// Result of a last-name owner search. Exactly one outcome applies per search.
#[derive(Debug, Clone)]
pub enum FindOwnersOutcome {
    /// The requested page has no owners.
    NotFound { last_name: String },
    /// The search matched exactly one owner overall; go straight to its details.
    Redirect { owner_id: i32 },
    /// Several matches; `current_page` is 1-based.
    List {
        last_name: String,
        current_page: u64,
        page: Page<Owner>,
    },
}

impl FindOwnersOutcome {
    /// Redirect target of the form `owners/<id>`, if this outcome is a redirect.
    pub fn redirect_target(&self) -> Option<String> {
        match self {
            Self::Redirect { owner_id } => Some(format!("owners/{owner_id}")),
            _ => None,
        }
    }
}
