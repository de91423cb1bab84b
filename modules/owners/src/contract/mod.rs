pub mod client;
pub mod error;
pub mod model;

pub use model::{FindOwnersOutcome, NewPet, NewVisit, Owner, OwnerDraft, Pet, PetType, Visit};
