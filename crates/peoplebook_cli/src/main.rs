//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `peoplebook_core` wiring.
//! - Seed sample records and run the chained query end to end.
//!
//! Uses the store at `PEOPLEBOOK_DB` when set, otherwise an in-memory store.

use peoplebook_core::db::{open_db, open_db_in_memory};
use peoplebook_core::{
    DbConfig, NameOrder, Person, PersonQuery, PersonRepository, SqlitePersonRepository,
};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let mut conn = match DbConfig::from_env() {
        Ok(config) => open_db(&config.path)?,
        Err(_) => open_db_in_memory()?,
    };

    let mut repo = SqlitePersonRepository::try_new(&mut conn)?;
    repo.create_people(&sample_people())?;

    let query = PersonQuery::new()
        .with_favorite_food("pizza")
        .sort_by_name(NameOrder::Ascending)
        .limit(2)
        .without_age();

    println!("peoplebook_core version={}", peoplebook_core::core_version());
    for person in repo.search(&query)? {
        println!(
            "{} likes {}",
            person.name,
            person.favorite_foods.join(", ")
        );
    }

    Ok(())
}

fn sample_people() -> Vec<Person> {
    let mut avery = Person::new("Avery Stone");
    avery.age = Some(33);
    avery.favorite_foods = vec!["pizza".into(), "ramen".into(), "dumplings".into()];

    let mut blair = Person::new("Blair Quinn");
    blair.age = Some(33);
    blair.favorite_foods = vec!["pizza".into(), "oysters".into(), "olives".into()];

    let mut casey = Person::new("Casey Wren");
    casey.age = Some(9);
    casey.favorite_foods = vec!["leftovers".into(), "bacon".into()];

    vec![avery, blair, casey]
}
