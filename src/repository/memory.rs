//! In-memory `CatRepository`
//!
//! Rows live in a `BTreeMap` keyed by id, so iteration is id order and a
//! stable sort on the field gives the same tie-breaking as the SQLite store.

use std::collections::BTreeMap;
use std::sync::Mutex;

use super::errors::{StoreError, StoreResult};
use super::CatRepository;
use crate::entity::{AggregateField, Cat, CatField};

#[derive(Debug, Default)]
struct MemoryState {
    last_id: i64,
    rows: BTreeMap<i64, Cat>,
}

/// Volatile Cat store
#[derive(Debug, Default)]
pub struct InMemoryCatRepository {
    state: Mutex<MemoryState>,
}

impl InMemoryCatRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.state.lock()?.rows.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl CatRepository for InMemoryCatRepository {
    fn kind(&self) -> &'static str {
        "memory"
    }

    fn insert(&self, cat: &Cat) -> StoreResult<Cat> {
        let mut state = self.state.lock()?;
        state.last_id += 1;
        let id = state.last_id;

        let mut stored = cat.clone();
        stored.id = Some(id);
        state.rows.insert(id, stored.clone());
        Ok(stored)
    }

    fn find_by_id(&self, id: i64) -> StoreResult<Option<Cat>> {
        Ok(self.state.lock()?.rows.get(&id).cloned())
    }

    fn find_all(&self) -> StoreResult<Vec<Cat>> {
        Ok(self.state.lock()?.rows.values().cloned().collect())
    }

    fn count(&self) -> StoreResult<usize> {
        self.len()
    }

    fn update(&self, cat: &Cat) -> StoreResult<Cat> {
        let id = cat.id.ok_or(StoreError::MissingId)?;
        let mut state = self.state.lock()?;
        let slot = state.rows.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        *slot = cat.clone();
        Ok(cat.clone())
    }

    fn delete_by_id(&self, id: i64) -> StoreResult<bool> {
        Ok(self.state.lock()?.rows.remove(&id).is_some())
    }

    fn find_ordered_by(&self, field: CatField, limit: usize) -> StoreResult<Vec<Cat>> {
        let mut cats = self.find_all()?;
        // sort_by is stable: equal keys keep id order
        cats.sort_by(|a, b| field.compare(a, b));
        cats.truncate(limit);
        Ok(cats)
    }

    fn sum_of(&self, field: AggregateField) -> StoreResult<i64> {
        let state = self.state.lock()?;
        Ok(state.rows.values().map(|cat| field.value_of(cat)).sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> InMemoryCatRepository {
        let repo = InMemoryCatRepository::new();
        for (name, age) in [("Couscous", 0), ("Tiramisu", 7), ("Humus", 1)] {
            repo.insert(&Cat::builder().name(name).age(age).build())
                .unwrap();
        }
        repo
    }

    #[test]
    fn test_ids_are_not_reused() {
        let repo = seeded();
        assert!(repo.delete_by_id(3).unwrap());

        let next = repo
            .insert(&Cat::builder().name("Millefoglie").age(4).build())
            .unwrap();
        assert_eq!(next.id, Some(4));
        assert_eq!(repo.count().unwrap(), 3);
        assert_eq!(repo.kind(), "memory");
    }

    #[test]
    fn test_find_ordered_by_age() {
        let repo = seeded();
        let names: Vec<_> = repo
            .find_ordered_by(CatField::Age, 3)
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Couscous", "Humus", "Tiramisu"]);
    }

    #[test]
    fn test_find_first_ordered_by_on_empty_store() {
        let repo = InMemoryCatRepository::new();
        assert!(repo.is_empty().unwrap());
        assert!(repo.find_first_ordered_by(CatField::Age).unwrap().is_none());
    }

    #[test]
    fn test_sum_of_age() {
        let repo = seeded();
        let age = CatField::validate_aggregate("age").unwrap();
        assert_eq!(repo.sum_of(age).unwrap(), 8);
    }

    #[test]
    fn test_update_replaces_row() {
        let repo = seeded();
        let mut cat = repo.find_by_id(2).unwrap().unwrap();
        cat.age = 8;
        repo.update(&cat).unwrap();

        assert_eq!(repo.find_by_id(2).unwrap().unwrap().age, 8);
        assert_eq!(repo.len().unwrap(), 3);
    }
}
