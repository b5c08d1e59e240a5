//! Person domain model.
//!
//! # Responsibility
//! - Define the single record type managed by this crate.
//! - Enforce field-level validity before anything reaches storage.
//!
//! # Invariants
//! - `uuid` is stable and never reused for another person.
//! - `name` is non-empty on every persisted record.
//! - `favorite_foods` preserves insertion order.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a person record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type PersonId = Uuid;

/// Field-level validity failures for a person record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonValidationError {
    /// The record carries the nil UUID, which can never identify a person.
    NilUuid,
    /// `name` is empty or whitespace-only.
    EmptyName,
}

impl Display for PersonValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilUuid => write!(f, "person uuid must not be nil"),
            Self::EmptyName => write!(f, "person name must not be empty"),
        }
    }
}

impl Error for PersonValidationError {}

/// Canonical record for the person collection.
///
/// Ages and foods are intentionally loose: `age` is optional and
/// `favorite_foods` carries no uniqueness constraint, matching the
/// collection's schema contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Stable global ID used for point lookups, updates and deletes.
    pub uuid: PersonId,
    /// Display name. Required non-empty; duplicates are allowed.
    pub name: String,
    /// Optional age in years.
    pub age: Option<i64>,
    /// Ordered list of favorite foods.
    pub favorite_foods: Vec<String>,
}

impl Person {
    /// Creates a new person with a generated stable ID and no optional data.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            age: None,
            favorite_foods: Vec::new(),
        }
    }

    /// Creates a person with a caller-provided stable ID.
    ///
    /// Used by import paths and tests where identity already exists.
    ///
    /// # Errors
    /// - `NilUuid` when the provided id is the nil UUID.
    pub fn with_id(
        uuid: PersonId,
        name: impl Into<String>,
    ) -> Result<Self, PersonValidationError> {
        if uuid.is_nil() {
            return Err(PersonValidationError::NilUuid);
        }
        Ok(Self {
            uuid,
            name: name.into(),
            age: None,
            favorite_foods: Vec::new(),
        })
    }

    /// Checks field-level validity.
    ///
    /// Write paths call this before any SQL mutation.
    pub fn validate(&self) -> Result<(), PersonValidationError> {
        if self.uuid.is_nil() {
            return Err(PersonValidationError::NilUuid);
        }
        if self.name.trim().is_empty() {
            return Err(PersonValidationError::EmptyName);
        }
        Ok(())
    }

    /// Appends one food to the end of `favorite_foods`.
    pub fn add_favorite_food(&mut self, food: impl Into<String>) {
        self.favorite_foods.push(food.into());
    }

    /// Returns whether the person lists the given food.
    pub fn likes(&self, food: &str) -> bool {
        self.favorite_foods.iter().any(|item| item == food)
    }
}
