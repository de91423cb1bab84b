pub mod specialty;
pub mod vet;
pub mod vet_specialty;
