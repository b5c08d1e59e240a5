//! Composable query options for the person collection.
//!
//! A `PersonQuery` is built by chaining narrowing steps and handed to
//! `PersonRepository::search` for execution. Steps compose in any order;
//! execution always applies filter, then sort, then limit, then projection.

/// Sort direction for the name column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameOrder {
    Ascending,
    Descending,
}

/// Chainable query options for `PersonRepository::search`.
///
/// The default query matches every record, keeps insertion order, applies no
/// limit and projects all fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonQuery {
    /// Keep only records whose `favorite_foods` contains this value.
    pub favorite_food: Option<String>,
    /// Sort by name instead of insertion order.
    pub order: Option<NameOrder>,
    /// Maximum rows to return.
    pub limit: Option<u32>,
    /// When `false`, the stored age is projected out and every returned
    /// record carries `age: None`.
    pub include_age: bool,
}

impl Default for PersonQuery {
    fn default() -> Self {
        Self {
            favorite_food: None,
            order: None,
            limit: None,
            include_age: true,
        }
    }
}

impl PersonQuery {
    /// Starts an unconstrained query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps only records listing the given favorite food.
    pub fn with_favorite_food(mut self, food: impl Into<String>) -> Self {
        self.favorite_food = Some(food.into());
        self
    }

    /// Sorts results by name in the given direction.
    pub fn sort_by_name(mut self, order: NameOrder) -> Self {
        self.order = Some(order);
        self
    }

    /// Caps the number of returned records.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Excludes the age field from the result projection.
    pub fn without_age(mut self) -> Self {
        self.include_age = false;
        self
    }
}
