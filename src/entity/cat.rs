//! The Cat record
//!
//! Equality and hashing only look at the business fields (name, age).
//! The identifier and audit metadata are ignored, so two separately stored
//! rows with the same name and age compare equal.

use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};

/// Anything that can make a noise
pub trait Animal {
    fn sound(&self) -> &'static str;
}

/// A stored cat.
///
/// `id` is `None` until the record has been persisted. `version`,
/// `created_on` and `updated_on` are audit metadata maintained by the
/// service layer.
#[derive(Debug, Clone, Default)]
pub struct Cat {
    pub id: Option<i64>,
    pub name: String,
    pub age: u32,
    pub version: u32,
    pub created_on: Option<DateTime<Utc>>,
    pub updated_on: Option<DateTime<Utc>>,
}

impl Cat {
    /// Start building a cat
    pub fn builder() -> CatBuilder {
        CatBuilder::default()
    }

    /// Stamp the record as freshly created at `now`.
    pub(crate) fn mark_created(&mut self, now: DateTime<Utc>) {
        self.version = 1;
        self.created_on = Some(now);
        self.updated_on = Some(now);
    }

    /// Copy the business fields of `changes` onto this record and bump the
    /// audit metadata. `id` and `created_on` are left untouched.
    pub(crate) fn apply_update(&mut self, changes: &Cat, now: DateTime<Utc>) {
        self.name = changes.name.clone();
        self.age = changes.age;
        self.version = self.version.saturating_add(1);
        self.updated_on = Some(now);
    }
}

impl PartialEq for Cat {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.age == other.age
    }
}

impl Eq for Cat {}

impl Hash for Cat {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.age.hash(state);
    }
}

impl Animal for Cat {
    fn sound(&self) -> &'static str {
        "Meow"
    }
}

/// Fluent builder for [`Cat`]
#[derive(Debug, Clone, Default)]
pub struct CatBuilder {
    id: Option<i64>,
    name: String,
    age: u32,
}

impl CatBuilder {
    pub fn id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn age(mut self, age: u32) -> Self {
        self.age = age;
        self
    }

    pub fn build(self) -> Cat {
        Cat {
            id: self.id,
            name: self.name,
            age: self.age,
            ..Cat::default()
        }
    }
}
