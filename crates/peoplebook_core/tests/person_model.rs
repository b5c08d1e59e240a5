use peoplebook_core::{Person, PersonValidationError};
use uuid::Uuid;

#[test]
fn person_new_sets_defaults() {
    let person = Person::new("Avery Stone");

    assert!(!person.uuid.is_nil());
    assert_eq!(person.name, "Avery Stone");
    assert_eq!(person.age, None);
    assert!(person.favorite_foods.is_empty());
}

#[test]
fn validate_accepts_minimal_record() {
    let person = Person::new("Avery Stone");
    person.validate().unwrap();
}

#[test]
fn validate_rejects_empty_and_whitespace_names() {
    let empty = Person::new("");
    assert_eq!(
        empty.validate().unwrap_err(),
        PersonValidationError::EmptyName
    );

    let whitespace = Person::new("   ");
    assert_eq!(
        whitespace.validate().unwrap_err(),
        PersonValidationError::EmptyName
    );
}

#[test]
fn with_id_rejects_nil_uuid() {
    let err = Person::with_id(Uuid::nil(), "invalid").unwrap_err();
    assert_eq!(err, PersonValidationError::NilUuid);
}

#[test]
fn add_favorite_food_preserves_order() {
    let mut person = Person::new("Blair Quinn");
    person.add_favorite_food("pizza");
    person.add_favorite_food("oysters");
    person.add_favorite_food("olives");

    assert_eq!(person.favorite_foods, vec!["pizza", "oysters", "olives"]);
    assert!(person.likes("oysters"));
    assert!(!person.likes("ramen"));
}

#[test]
fn person_serialization_uses_expected_wire_fields() {
    let person_id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let mut person = Person::with_id(person_id, "Casey Wren").unwrap();
    person.age = Some(9);
    person.favorite_foods = vec!["leftovers".to_string(), "bacon".to_string()];

    let json = serde_json::to_value(&person).unwrap();
    assert_eq!(json["uuid"], person_id.to_string());
    assert_eq!(json["name"], "Casey Wren");
    assert_eq!(json["age"], 9);
    assert_eq!(json["favorite_foods"][0], "leftovers");
    assert_eq!(json["favorite_foods"][1], "bacon");

    let decoded: Person = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, person);
}
