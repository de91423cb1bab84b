/// A veterinarian and the specialties they practice, ordered by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vet {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub specialties: Vec<String>,
}

impl Vet {
    pub fn nr_of_specialties(&self) -> usize {
        self.specialties.len()
    }
}
