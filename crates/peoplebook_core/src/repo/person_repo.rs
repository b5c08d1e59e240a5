//! Person repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD and query APIs over the `people` collection.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths must call `Person::validate()` before SQL mutations.
//! - Read paths must reject invalid persisted state instead of masking it.
//! - "First match" on non-unique filters is the oldest record
//!   (`created_at ASC, uuid ASC`).

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::person::{Person, PersonId, PersonValidationError};
use crate::repo::query::{NameOrder, PersonQuery};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const PERSON_SELECT_SQL: &str = "SELECT
    uuid,
    name,
    age,
    favorite_foods
FROM people";

const FIRST_MATCH_ORDER_SQL: &str = "ORDER BY created_at ASC, uuid ASC";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for person persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(PersonValidationError),
    Db(DbError),
    NotFound(PersonId),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "person not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted person data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; run migrations first"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PersonValidationError> for RepoError {
    fn from(value: PersonValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for person CRUD and query operations.
pub trait PersonRepository {
    /// Persists one person and returns the assigned stable id.
    fn create_person(&self, person: &Person) -> RepoResult<PersonId>;
    /// Persists a batch of people in one transaction, all-or-nothing.
    fn create_people(&mut self, people: &[Person]) -> RepoResult<Vec<PersonId>>;
    /// Replaces all fields of an existing person.
    fn update_person(&self, person: &Person) -> RepoResult<()>;
    /// Gets one person by stable id. Missing id is `None`, not an error.
    fn find_by_id(&self, id: PersonId) -> RepoResult<Option<Person>>;
    /// Lists every person with the given name, oldest first.
    fn find_by_name(&self, name: &str) -> RepoResult<Vec<Person>>;
    /// Gets the oldest person listing the given favorite food.
    fn find_one_by_food(&self, food: &str) -> RepoResult<Option<Person>>;
    /// Atomically sets the age of the oldest person with the given name and
    /// returns the post-update view.
    fn update_age_by_name(&mut self, name: &str, age: i64) -> RepoResult<Option<Person>>;
    /// Deletes one person by id and returns the deleted snapshot.
    fn remove_by_id(&mut self, id: PersonId) -> RepoResult<Option<Person>>;
    /// Deletes every person with the given name and returns the count.
    fn remove_by_name(&self, name: &str) -> RepoResult<usize>;
    /// Executes a composed query (filter, sort, limit, projection).
    fn search(&self, query: &PersonQuery) -> RepoResult<Vec<Person>>;
}

/// SQLite-backed person repository.
pub struct SqlitePersonRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqlitePersonRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_people_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl PersonRepository for SqlitePersonRepository<'_> {
    fn create_person(&self, person: &Person) -> RepoResult<PersonId> {
        person.validate()?;
        insert_person(self.conn, person)?;
        Ok(person.uuid)
    }

    fn create_people(&mut self, people: &[Person]) -> RepoResult<Vec<PersonId>> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let mut ids = Vec::with_capacity(people.len());
        for person in people {
            person.validate()?;
            insert_person(&tx, person)?;
            ids.push(person.uuid);
        }

        tx.commit()?;
        Ok(ids)
    }

    fn update_person(&self, person: &Person) -> RepoResult<()> {
        person.validate()?;

        let changed = self.conn.execute(
            "UPDATE people
             SET
                name = ?1,
                age = ?2,
                favorite_foods = ?3,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?4;",
            params![
                person.name.as_str(),
                person.age,
                foods_to_db(&person.favorite_foods)?,
                person.uuid.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(person.uuid));
        }

        Ok(())
    }

    fn find_by_id(&self, id: PersonId) -> RepoResult<Option<Person>> {
        load_person(self.conn, &id.to_string())
    }

    fn find_by_name(&self, name: &str) -> RepoResult<Vec<Person>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PERSON_SELECT_SQL}
             WHERE name = ?1
             {FIRST_MATCH_ORDER_SQL};"
        ))?;

        let mut rows = stmt.query([name])?;
        let mut people = Vec::new();
        while let Some(row) = rows.next()? {
            people.push(parse_person_row(row)?);
        }

        Ok(people)
    }

    fn find_one_by_food(&self, food: &str) -> RepoResult<Option<Person>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PERSON_SELECT_SQL}
             WHERE EXISTS (
                SELECT 1
                FROM json_each(people.favorite_foods)
                WHERE json_each.value = ?1
             )
             {FIRST_MATCH_ORDER_SQL}
             LIMIT 1;"
        ))?;

        let mut rows = stmt.query([food])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_person_row(row)?));
        }

        Ok(None)
    }

    fn update_age_by_name(&mut self, name: &str, age: i64) -> RepoResult<Option<Person>> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let target = first_uuid_by_name(&tx, name)?;
        let Some(uuid_text) = target else {
            return Ok(None);
        };

        tx.execute(
            "UPDATE people
             SET
                age = ?1,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?2;",
            params![age, uuid_text.as_str()],
        )?;

        let updated = load_person(&tx, &uuid_text)?.ok_or_else(|| {
            RepoError::InvalidData(format!(
                "person `{uuid_text}` vanished during update_age_by_name"
            ))
        })?;

        tx.commit()?;
        Ok(Some(updated))
    }

    fn remove_by_id(&mut self, id: PersonId) -> RepoResult<Option<Person>> {
        let uuid_text = id.to_string();
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let Some(snapshot) = load_person(&tx, &uuid_text)? else {
            return Ok(None);
        };

        tx.execute("DELETE FROM people WHERE uuid = ?1;", [uuid_text.as_str()])?;
        tx.commit()?;

        Ok(Some(snapshot))
    }

    fn remove_by_name(&self, name: &str) -> RepoResult<usize> {
        let deleted = self
            .conn
            .execute("DELETE FROM people WHERE name = ?1;", [name])?;
        Ok(deleted)
    }

    fn search(&self, query: &PersonQuery) -> RepoResult<Vec<Person>> {
        // Projection happens in SQL; the parser reads the projected NULL.
        let age_select = if query.include_age { "age" } else { "NULL AS age" };
        let mut sql = format!(
            "SELECT
                uuid,
                name,
                {age_select},
                favorite_foods
             FROM people
             WHERE 1 = 1"
        );
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(food) = query.favorite_food.as_ref() {
            sql.push_str(
                " AND EXISTS (
                    SELECT 1
                    FROM json_each(people.favorite_foods)
                    WHERE json_each.value = ?
                )",
            );
            bind_values.push(Value::Text(food.clone()));
        }

        match query.order {
            Some(NameOrder::Ascending) => sql.push_str(" ORDER BY name ASC, uuid ASC"),
            Some(NameOrder::Descending) => sql.push_str(" ORDER BY name DESC, uuid ASC"),
            None => sql.push_str(&format!(" {FIRST_MATCH_ORDER_SQL}")),
        }

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut people = Vec::new();
        while let Some(row) = rows.next()? {
            people.push(parse_person_row(row)?);
        }

        Ok(people)
    }
}

fn insert_person(conn: &Connection, person: &Person) -> RepoResult<()> {
    conn.execute(
        "INSERT INTO people (
            uuid,
            name,
            age,
            favorite_foods
        ) VALUES (?1, ?2, ?3, ?4);",
        params![
            person.uuid.to_string(),
            person.name.as_str(),
            person.age,
            foods_to_db(&person.favorite_foods)?,
        ],
    )?;
    Ok(())
}

fn load_person(conn: &Connection, uuid_text: &str) -> RepoResult<Option<Person>> {
    let mut stmt = conn.prepare(&format!("{PERSON_SELECT_SQL} WHERE uuid = ?1;"))?;
    let mut rows = stmt.query([uuid_text])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_person_row(row)?));
    }
    Ok(None)
}

fn first_uuid_by_name(conn: &Connection, name: &str) -> RepoResult<Option<String>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT uuid FROM people WHERE name = ?1 {FIRST_MATCH_ORDER_SQL} LIMIT 1;"
    ))?;
    let mut rows = stmt.query([name])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(row.get("uuid")?));
    }
    Ok(None)
}

fn parse_person_row(row: &Row<'_>) -> RepoResult<Person> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in people.uuid"))
    })?;

    let foods_text: String = row.get("favorite_foods")?;
    let favorite_foods: Vec<String> = serde_json::from_str(&foods_text).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid favorite_foods JSON for person `{uuid_text}`"
        ))
    })?;

    let person = Person {
        uuid,
        name: row.get("name")?,
        age: row.get("age")?,
        favorite_foods,
    };
    person.validate()?;
    Ok(person)
}

fn foods_to_db(foods: &[String]) -> RepoResult<String> {
    serde_json::to_string(foods)
        .map_err(|err| RepoError::InvalidData(format!("failed to encode favorite_foods: {err}")))
}

fn ensure_people_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "people")? {
        return Err(RepoError::MissingRequiredTable("people"));
    }

    for column in [
        "uuid",
        "name",
        "age",
        "favorite_foods",
        "created_at",
        "updated_at",
    ] {
        if !table_has_column(conn, "people", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "people",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
