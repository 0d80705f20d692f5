//! Entity model for cattery
//!
//! - `Cat`: the stored record, with builder construction
//! - `CatField`: the whitelisted business attributes usable in queries
//! - `AggregateField`: a `CatField` that has been checked as summable

mod cat;
mod field;

pub use cat::{Animal, Cat, CatBuilder};
pub use field::{
    AggregateField, AttributeDef, AttributeKind, CatField, FieldError, FieldResult, CAT_ATTRIBUTES,
};
