//! Wire representation of a Cat
//!
//! `CatDto` is what the HTTP layer reads and writes. It carries the
//! identifier and business fields only; audit metadata stays internal.

use serde::{Deserialize, Serialize};

use crate::entity::Cat;

/// Serialized cat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatDto {
    /// Ignored on create, assigned by the store
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub age: u32,
}

impl From<&Cat> for CatDto {
    fn from(cat: &Cat) -> Self {
        Self {
            id: cat.id,
            name: cat.name.clone(),
            age: cat.age,
        }
    }
}

impl From<Cat> for CatDto {
    fn from(cat: Cat) -> Self {
        Self {
            id: cat.id,
            name: cat.name,
            age: cat.age,
        }
    }
}

impl From<CatDto> for Cat {
    fn from(dto: CatDto) -> Self {
        let builder = Cat::builder().name(dto.name).age(dto.age);
        match dto.id {
            Some(id) => builder.id(id).build(),
            None => builder.build(),
        }
    }
}

/// Map a list of records for the wire
pub fn to_dtos(cats: Vec<Cat>) -> Vec<CatDto> {
    cats.into_iter().map(CatDto::from).collect()
}
