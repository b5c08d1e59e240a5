//! Person use-case service.
//!
//! # Responsibility
//! - Provide stable entry points for the person-collection operations.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::model::person::{Person, PersonId};
use crate::repo::person_repo::{PersonRepository, RepoError, RepoResult};
use crate::repo::query::PersonQuery;

/// Use-case service wrapper for person-collection operations.
pub struct PersonService<R: PersonRepository> {
    repo: R,
}

impl<R: PersonRepository> PersonService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists one person and returns the assigned stable id.
    pub fn create_person(&self, person: &Person) -> RepoResult<PersonId> {
        self.repo.create_person(person)
    }

    /// Persists a batch of people in one transaction, all-or-nothing.
    pub fn create_people(&mut self, people: &[Person]) -> RepoResult<Vec<PersonId>> {
        self.repo.create_people(people)
    }

    /// Gets one person by stable id.
    pub fn find_by_id(&self, id: PersonId) -> RepoResult<Option<Person>> {
        self.repo.find_by_id(id)
    }

    /// Lists every person with the given name, oldest first.
    pub fn find_by_name(&self, name: &str) -> RepoResult<Vec<Person>> {
        self.repo.find_by_name(name)
    }

    /// Gets the oldest person listing the given favorite food.
    pub fn find_one_by_food(&self, food: &str) -> RepoResult<Option<Person>> {
        self.repo.find_one_by_food(food)
    }

    /// Appends one favorite food via fetch, mutate, save.
    ///
    /// # Contract
    /// - Returns the updated record with exactly one food appended.
    /// - `NotFound` when the id does not exist.
    /// - The read-then-write window is unprotected: a concurrent writer
    ///   between fetch and save is overwritten (last writer wins).
    pub fn record_favorite_food(&self, id: PersonId, food: &str) -> RepoResult<Person> {
        let mut person = self.repo.find_by_id(id)?.ok_or(RepoError::NotFound(id))?;
        person.add_favorite_food(food);
        self.repo.update_person(&person)?;
        Ok(person)
    }

    /// Atomically sets the age of the oldest person with the given name.
    ///
    /// Returns the post-update view, or `None` when no person matches.
    pub fn update_age_by_name(&mut self, name: &str, age: i64) -> RepoResult<Option<Person>> {
        self.repo.update_age_by_name(name, age)
    }

    /// Deletes one person by id and returns the deleted snapshot.
    pub fn remove_by_id(&mut self, id: PersonId) -> RepoResult<Option<Person>> {
        self.repo.remove_by_id(id)
    }

    /// Deletes every person with the given name and returns the count.
    pub fn remove_by_name(&self, name: &str) -> RepoResult<usize> {
        self.repo.remove_by_name(name)
    }

    /// Executes a composed query (filter, sort, limit, projection).
    pub fn search(&self, query: &PersonQuery) -> RepoResult<Vec<Person>> {
        self.repo.search(query)
    }
}
