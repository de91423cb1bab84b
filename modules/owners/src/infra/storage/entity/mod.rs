pub mod owner;
pub mod pet;
pub mod pet_type;
pub mod visit;
