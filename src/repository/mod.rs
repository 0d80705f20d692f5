//! Persistence for Cat records
//!
//! `CatRepository` is the seam between the query service and the store.
//! It exposes only the primitives the service needs:
//! - point lookup, insert, update, delete
//! - "order by field ascending, limit N"
//! - "first record ordered by field"
//! - "sum of a numeric field"
//!
//! Implementations never see caller-supplied field names: sort and sum
//! targets arrive as validated `CatField` / `AggregateField` values.

mod errors;
mod memory;
mod sqlite;

pub use errors::{StoreError, StoreResult};
pub use memory::InMemoryCatRepository;
pub use sqlite::SqliteCatRepository;

use crate::entity::{AggregateField, Cat, CatField};

/// Store operations for Cat records.
///
/// Ordered queries are ascending on the given field with ties broken by
/// ascending id.
pub trait CatRepository: Send + Sync {
    /// Short store name reported by the health check
    fn kind(&self) -> &'static str;

    /// Persist a new record and return it with its assigned id.
    fn insert(&self, cat: &Cat) -> StoreResult<Cat>;

    fn find_by_id(&self, id: i64) -> StoreResult<Option<Cat>>;

    /// All records in id order
    fn find_all(&self) -> StoreResult<Vec<Cat>>;

    fn count(&self) -> StoreResult<usize> {
        Ok(self.find_all()?.len())
    }

    /// Overwrite an existing record. `cat.id` must be set.
    fn update(&self, cat: &Cat) -> StoreResult<Cat>;

    /// Remove a record. Returns whether a row was removed.
    fn delete_by_id(&self, id: i64) -> StoreResult<bool>;

    fn exists_by_id(&self, id: i64) -> StoreResult<bool> {
        Ok(self.find_by_id(id)?.is_some())
    }

    /// At most `limit` records ordered by `field`
    fn find_ordered_by(&self, field: CatField, limit: usize) -> StoreResult<Vec<Cat>>;

    /// The first record ordered by `field`, `None` when the store is empty
    fn find_first_ordered_by(&self, field: CatField) -> StoreResult<Option<Cat>> {
        Ok(self.find_ordered_by(field, 1)?.into_iter().next())
    }

    /// Sum of `field` over all records, 0 when the store is empty
    fn sum_of(&self, field: AggregateField) -> StoreResult<i64>;
}
