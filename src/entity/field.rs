//! Field-name validation for dynamic queries
//!
//! Callers name a field as free text (`?fieldName=age`). That text is only
//! ever looked up in `CAT_ATTRIBUTES`; once validated, the query layers work
//! with `CatField` and take their column names from this table, never from
//! the caller.
//!
//! Rules:
//! - Exact, case-sensitive match on the attribute name
//! - Only business attributes are queryable (no identifier, no audit fields)
//! - Only numeric business attributes can be summed

use std::cmp::Ordering;
use std::fmt;

use thiserror::Error;

use super::cat::Cat;

/// Result type for field validation
pub type FieldResult<T> = Result<T, FieldError>;

/// Field validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// The token does not name a queryable attribute
    #[error("No such field as '{0}'")]
    NoSuchField(String),
}

/// Role of an attribute on the entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    /// Primary key, assigned by the store
    Identifier,
    /// Caller-visible data, usable in queries
    Business(CatField),
    /// Bookkeeping maintained by the service
    Audit,
}

/// One declared attribute of the Cat entity
#[derive(Debug, Clone, Copy)]
pub struct AttributeDef {
    /// Attribute name as callers spell it
    pub name: &'static str,
    /// Store column
    pub column: &'static str,
    pub kind: AttributeKind,
    /// Numeric accessor; only summable attributes have one
    pub sum: Option<fn(&Cat) -> i64>,
}

fn age_of(cat: &Cat) -> i64 {
    i64::from(cat.age)
}

const ID: AttributeDef = AttributeDef {
    name: "id",
    column: "id",
    kind: AttributeKind::Identifier,
    sum: None,
};

const NAME: AttributeDef = AttributeDef {
    name: "name",
    column: "name",
    kind: AttributeKind::Business(CatField::Name),
    sum: None,
};

const AGE: AttributeDef = AttributeDef {
    name: "age",
    column: "age",
    kind: AttributeKind::Business(CatField::Age),
    sum: Some(age_of),
};

const VERSION: AttributeDef = AttributeDef {
    name: "version",
    column: "version",
    kind: AttributeKind::Audit,
    sum: None,
};

const CREATED_ON: AttributeDef = AttributeDef {
    name: "createdOn",
    column: "created_on",
    kind: AttributeKind::Audit,
    sum: None,
};

const UPDATED_ON: AttributeDef = AttributeDef {
    name: "updatedOn",
    column: "updated_on",
    kind: AttributeKind::Audit,
    sum: None,
};

/// Every attribute the Cat entity declares, in column order.
pub static CAT_ATTRIBUTES: [AttributeDef; 6] = [ID, NAME, AGE, VERSION, CREATED_ON, UPDATED_ON];

/// A validated, queryable Cat attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatField {
    Name,
    Age,
}

impl CatField {
    /// All queryable fields
    pub const ALL: [CatField; 2] = [CatField::Name, CatField::Age];

    /// Validate a caller-supplied field name.
    ///
    /// # Errors
    ///
    /// `FieldError::NoSuchField` carrying the rejected token when it is not a
    /// business attribute of the entity.
    pub fn validate(field_name: &str) -> FieldResult<CatField> {
        CAT_ATTRIBUTES
            .iter()
            .find(|attr| attr.name == field_name)
            .and_then(|attr| match attr.kind {
                AttributeKind::Business(field) => Some(field),
                AttributeKind::Identifier | AttributeKind::Audit => None,
            })
            .ok_or_else(|| FieldError::NoSuchField(field_name.to_string()))
    }

    /// Validate a field name for summation.
    ///
    /// A field that sorts fine but cannot be summed (`name`) is rejected with
    /// the same error as an unknown field.
    pub fn validate_aggregate(field_name: &str) -> FieldResult<AggregateField> {
        let field = Self::validate(field_name)?;
        let value = field
            .attribute()
            .sum
            .ok_or_else(|| FieldError::NoSuchField(field_name.to_string()))?;
        Ok(AggregateField { field, value })
    }

    /// Attribute name as callers spell it
    pub fn name(&self) -> &'static str {
        self.attribute().name
    }

    /// Store column for this field
    pub fn column(&self) -> &'static str {
        self.attribute().column
    }

    pub fn is_numeric(&self) -> bool {
        self.attribute().sum.is_some()
    }

    /// Ascending order of two records on this field
    pub fn compare(&self, a: &Cat, b: &Cat) -> Ordering {
        match self {
            CatField::Name => a.name.cmp(&b.name),
            CatField::Age => a.age.cmp(&b.age),
        }
    }

    /// Declaration of this field, independent of its position in the table
    fn attribute(&self) -> &'static AttributeDef {
        match self {
            CatField::Name => &NAME,
            CatField::Age => &AGE,
        }
    }
}

impl fmt::Display for CatField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A numeric field that may be summed across records.
///
/// Only obtainable through [`CatField::validate_aggregate`], which takes the
/// accessor from the attribute table.
#[derive(Debug, Clone, Copy)]
pub struct AggregateField {
    field: CatField,
    value: fn(&Cat) -> i64,
}

impl AggregateField {
    pub fn field(&self) -> CatField {
        self.field
    }

    pub fn column(&self) -> &'static str {
        self.field.column()
    }

    /// Numeric value of this field on a record
    pub fn value_of(&self, cat: &Cat) -> i64 {
        (self.value)(cat)
    }
}

impl PartialEq for AggregateField {
    fn eq(&self, other: &Self) -> bool {
        self.field == other.field
    }
}

impl Eq for AggregateField {}
