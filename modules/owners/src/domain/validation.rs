//! Form validation run before anything reaches the store.
//!
//! Each validator returns every violation it finds rather than stopping at the
//! first one, so a re-rendered form can flag all bad fields at once.

use chrono::NaiveDate;

use crate::contract::model::{NewPet, NewVisit, OwnerDraft, Pet, PetType};

pub const REQUIRED: &str = "required";
pub const NOT_BLANK: &str = "notBlank";
pub const PATTERN: &str = "pattern";
pub const DUPLICATE: &str = "duplicate";
pub const INVALID: &str = "invalid";

const TELEPHONE_DIGITS: usize = 10;

/// A rejected field. `field` uses the camelCase name of the submitted form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub code: &'static str,
    pub message: String,
}

impl FieldViolation {
    fn new(field: &'static str, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            code,
            message: message.into(),
        }
    }
}

fn require_text(out: &mut Vec<FieldViolation>, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        out.push(FieldViolation::new(field, NOT_BLANK, "must not be blank"));
    }
}

pub fn validate_owner(draft: &OwnerDraft) -> Vec<FieldViolation> {
    let mut out = Vec::new();
    require_text(&mut out, "firstName", &draft.first_name);
    require_text(&mut out, "lastName", &draft.last_name);
    require_text(&mut out, "address", &draft.address);
    require_text(&mut out, "city", &draft.city);

    let tel = draft.telephone.as_str();
    if tel.trim().is_empty() {
        out.push(FieldViolation::new("telephone", NOT_BLANK, "must not be blank"));
    } else if tel.len() != TELEPHONE_DIGITS || !tel.bytes().all(|b| b.is_ascii_digit()) {
        out.push(FieldViolation::new(
            "telephone",
            PATTERN,
            "Telephone must be a 10-digit number.",
        ));
    }
    out
}

/// Checks a new pet against the owner's existing pets and the known pet types.
/// Pet names are unique per owner, compared case-insensitively.
pub fn validate_new_pet(
    pet: &NewPet,
    existing: &[Pet],
    types: &[PetType],
    today: NaiveDate,
) -> Vec<FieldViolation> {
    let mut out = Vec::new();

    let name = pet.name.trim();
    if name.is_empty() {
        out.push(FieldViolation::new("name", REQUIRED, "is required"));
    } else if existing.iter().any(|p| p.name.eq_ignore_ascii_case(name)) {
        out.push(FieldViolation::new("name", DUPLICATE, "already exists"));
    }

    match pet.birth_date {
        None => out.push(FieldViolation::new("birthDate", REQUIRED, "is required")),
        Some(d) if d > today => out.push(FieldViolation::new(
            "birthDate",
            INVALID,
            "must not be in the future",
        )),
        Some(_) => {}
    }

    if pet.pet_type.trim().is_empty() {
        out.push(FieldViolation::new("type", REQUIRED, "is required"));
    } else if !types.iter().any(|t| t.name.eq_ignore_ascii_case(pet.pet_type.trim())) {
        out.push(FieldViolation::new("type", INVALID, "unknown pet type"));
    }
    out
}

pub fn validate_new_visit(visit: &NewVisit) -> Vec<FieldViolation> {
    let mut out = Vec::new();
    require_text(&mut out, "description", &visit.description);
    out
}
