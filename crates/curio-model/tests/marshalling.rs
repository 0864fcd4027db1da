//! End-to-end marshalling behavior across the catalog entities.

use std::collections::HashMap;

use curio_model::schema::{RecordRef, Value};
use curio_model::{password, Category, Error, Item, Lifecycle, OAuth, Record, StoredFile, User};

fn map(pairs: &[(&str, Value)]) -> HashMap<String, Value> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

#[test]
fn item_round_trips_through_map() {
    let data = map(&[
        ("title", Value::Str("Wrench".into())),
        ("description", Value::Str("adjustable".into())),
        ("author", Value::Int(3)),
    ]);
    let item = Item::from_map(&data, None, &[]).unwrap();

    let snapshot = item.to_map(&[]);
    let rebuilt = Item::from_map(
        &snapshot.clone().into_iter().collect(),
        Some(&|_t: &str, raw: &Value| Ok(raw.clone())),
        &[],
    )
    .unwrap();

    assert_eq!(rebuilt.to_map(&[]), snapshot);
}

#[test]
fn category_round_trips_without_relations() {
    let data = map(&[
        ("title", Value::Str("Tools".into())),
        ("description", Value::Null),
    ]);
    let category = Category::from_map(&data, None, &[]).unwrap();

    let snapshot = category.to_map(&["items"]);
    let rebuilt =
        Category::from_map(&snapshot.clone().into_iter().collect(), None, &["items"]).unwrap();

    assert_eq!(rebuilt.to_map(&["items"]), snapshot);
}

#[test]
fn to_map_respects_exclude() {
    let data = map(&[("title", Value::Str("Wrench".into()))]);
    let item = Item::from_map(&data, None, &[]).unwrap();

    let snapshot = item.to_map(&["description", "id"]);
    assert!(snapshot.contains_key("title"));
    assert!(!snapshot.contains_key("description"));
    assert!(!snapshot.contains_key("id"));
}

#[test]
fn to_json_is_sorted_indented_and_stable() {
    let data = map(&[
        ("title", Value::Str("Wrench".into())),
        ("author", Value::Int(3)),
    ]);
    let mut item = Item::from_map(&data, None, &[]).unwrap();
    item.before_insert().unwrap();

    let json = item.to_json().unwrap();
    assert_eq!(json, item.to_json().unwrap());

    // 4-space indent.
    assert!(json.contains("\n    \"title\": \"Wrench\""));

    // Keys arrive alphabetically sorted.
    let keys: Vec<&str> = json
        .lines()
        .filter_map(|l| l.trim_start().strip_prefix('"'))
        .filter_map(|l| l.split('"').next())
        .collect();
    let mut sorted = keys.clone();
    sorted.sort_unstable();
    assert_eq!(keys, sorted);

    // Timestamps render in their string form.
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(parsed["created"].is_string());
}

#[test]
fn user_insert_flow_hashes_and_validates() {
    let data = map(&[
        ("name", Value::Str("Ada".into())),
        ("email", Value::Str("a@x.com".into())),
        ("password", Value::Str("secret".into())),
    ]);
    let mut user = User::from_map(&data, None, &[]).unwrap();

    user.before_insert().unwrap();
    assert!(password::identify(&user.password));
    assert!(user.check_password("secret"));

    // Saving again with the already-hashed value changes nothing.
    let stored = user.password.clone();
    let resave = map(&[("password", Value::Str(stored.clone()))]);
    user.apply(&resave, None, &[]).unwrap();
    user.before_update().unwrap();
    assert_eq!(user.password, stored);
}

#[test]
fn user_without_login_method_aborts_insert() {
    let user_data = map(&[("name", Value::Str("Ghost".into()))]);
    let mut user = User::from_map(&user_data, None, &[]).unwrap();

    assert!(matches!(
        user.before_insert(),
        Err(Error::InvalidAccountState)
    ));
}

#[test]
fn oauth_link_satisfies_user_invariant() {
    let mut user = User::default();
    user.oauth.push(RecordRef::new("OAuth", 11));
    assert!(user.before_insert().is_ok());

    let oauth_data = map(&[
        ("provider", Value::Str("google".into())),
        ("puid", Value::Str("g-42".into())),
        ("access_token", Value::Str("tok".into())),
        ("user", Value::Int(1)),
    ]);
    let resolve = |target: &str, raw: &Value| -> Result<Value, Error> {
        Ok(Value::Ref(RecordRef::new(target, raw.as_i64().unwrap())))
    };
    let mut oauth = OAuth::from_map(&oauth_data, Some(&resolve), &[]).unwrap();
    oauth.before_insert().unwrap();

    assert_eq!(oauth.user, Some(RecordRef::new("User", 1)));
}

#[test]
fn file_hash_follows_blob_through_updates() {
    let data = map(&[
        ("name", Value::Str("photo.png".into())),
        ("blob", Value::Bytes(b"abc".to_vec())),
        ("type", Value::Str("image/png".into())),
    ]);
    let mut file = StoredFile::from_map(&data, None, &[]).unwrap();

    file.before_insert().unwrap();
    assert_eq!(file.hash.as_deref(), Some("kAFQmDzST7DWlj99KOF_cg=="));

    let clear = map(&[("blob", Value::Bytes(Vec::new()))]);
    file.apply(&clear, None, &[]).unwrap();
    file.before_update().unwrap();
    assert_eq!(file.hash, None);
}

#[test]
fn relation_handler_failures_propagate() {
    let data = map(&[
        ("title", Value::Str("Wrench".into())),
        ("categories", Value::Int(404)),
    ]);
    let failing = |target: &str, _raw: &Value| -> Result<Value, Error> {
        Err(curio_model::schema::Error::UnknownEntity(target.to_string()).into())
    };

    let err = Item::from_map(&data, Some(&failing), &[]).unwrap_err();
    assert!(matches!(
        err,
        Error::Schema(curio_model::schema::Error::UnknownEntity(_))
    ));
}
