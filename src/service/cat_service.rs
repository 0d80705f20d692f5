//! Cat query service
//!
//! Sits in front of a `CatRepository` and owns the input rules:
//! - `top` must be positive, and is checked before the field name
//! - field names must pass `CatField::validate`
//! - totals additionally require a numeric field
//! - updates and deletes require the target row to exist

use std::sync::Arc;

use chrono::Utc;

use super::errors::{ServiceError, ServiceResult};
use crate::entity::{Cat, CatField};
use crate::observability::Logger;
use crate::repository::{CatRepository, StoreError};

/// Fixed size of the `find_top_three` query
pub const TOP_THREE: usize = 3;

/// Cat operations over a shared repository
#[derive(Clone)]
pub struct CatService {
    repository: Arc<dyn CatRepository>,
}

impl CatService {
    pub fn new(repository: Arc<dyn CatRepository>) -> Self {
        Self { repository }
    }

    /// Persist a new cat under a fresh id.
    ///
    /// Any id already set on `cat` is ignored.
    pub fn create(&self, cat: Cat) -> ServiceResult<Cat> {
        let mut record = Cat {
            id: None,
            ..cat
        };
        record.mark_created(Utc::now());

        let stored = self.repository.insert(&record)?;
        let id = stored.id.map(|id| id.to_string()).unwrap_or_default();
        Logger::info("CAT_CREATED", &[("id", id.as_str()), ("name", stored.name.as_str())]);
        Ok(stored)
    }

    /// Replace name and age of the cat stored under `id`.
    ///
    /// # Errors
    ///
    /// `UnknownId` when no such cat exists.
    pub fn update_by_id(&self, id: i64, cat: Cat) -> ServiceResult<Cat> {
        let mut record = self
            .repository
            .find_by_id(id)?
            .ok_or(ServiceError::UnknownId(id))?;
        record.apply_update(&cat, Utc::now());

        // The row may be removed between the read and the write
        let stored = self.repository.update(&record).map_err(|err| match err {
            StoreError::NotFound(id) => ServiceError::UnknownId(id),
            other => ServiceError::Store(other),
        })?;
        Logger::info(
            "CAT_UPDATED",
            &[
                ("id", id.to_string().as_str()),
                ("version", stored.version.to_string().as_str()),
            ],
        );
        Ok(stored)
    }

    /// Remove the cat stored under `id`.
    ///
    /// # Errors
    ///
    /// `UnknownId` when no such cat exists.
    pub fn delete_by_id(&self, id: i64) -> ServiceResult<()> {
        if !self.repository.delete_by_id(id)? {
            return Err(ServiceError::UnknownId(id));
        }
        Logger::info("CAT_DELETED", &[("id", id.to_string().as_str())]);
        Ok(())
    }

    /// Plain lookup; a missing cat is `Ok(None)`.
    pub fn find_by_id(&self, id: i64) -> ServiceResult<Option<Cat>> {
        Ok(self.repository.find_by_id(id)?)
    }

    pub fn find_all(&self) -> ServiceResult<Vec<Cat>> {
        Ok(self.repository.find_all()?)
    }

    /// Number of stored cats
    pub fn count(&self) -> ServiceResult<usize> {
        Ok(self.repository.count()?)
    }

    /// Name of the backing store
    pub fn store_kind(&self) -> &'static str {
        self.repository.kind()
    }

    /// The first `top` cats in ascending order of `field_name`.
    ///
    /// # Errors
    ///
    /// - `InvalidValue` for `top` when `top <= 0` (checked first)
    /// - `NoSuchField` when `field_name` is not queryable
    pub fn find_top_by_field(&self, top: i64, field_name: &str) -> ServiceResult<Vec<Cat>> {
        if top <= 0 {
            return Err(ServiceError::invalid_value("top", top));
        }
        let field = CatField::validate(field_name)?;
        let limit = usize::try_from(top).unwrap_or(usize::MAX);
        Ok(self.repository.find_ordered_by(field, limit)?)
    }

    /// The first three cats in ascending order of `field_name`.
    pub fn find_top_three(&self, field_name: &str) -> ServiceResult<Vec<Cat>> {
        let field = CatField::validate(field_name)?;
        Ok(self.repository.find_ordered_by(field, TOP_THREE)?)
    }

    /// The youngest cat.
    ///
    /// # Errors
    ///
    /// `NoRecords` when the store is empty.
    pub fn find_first_by_age(&self) -> ServiceResult<Cat> {
        self.repository
            .find_first_ordered_by(CatField::Age)?
            .ok_or(ServiceError::NoRecords)
    }

    /// Sum of a numeric field over all cats, 0 when there are none.
    ///
    /// `name` sorts but does not sum, so it is rejected here with
    /// `NoSuchField` like any unknown field.
    pub fn find_total_by(&self, field_name: &str) -> ServiceResult<i64> {
        let field = CatField::validate_aggregate(field_name)?;
        Ok(self.repository.sum_of(field)?)
    }
}
