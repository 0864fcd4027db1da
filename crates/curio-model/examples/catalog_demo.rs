//! Walkthrough: register the schema, build a few records, print JSON.
//!
//! Run with `RUST_LOG=debug cargo run --example catalog_demo` to see the
//! registration and hashing trace output.

use std::collections::HashMap;

use curio_model::schema::{RecordRef, Value};
use curio_model::{catalog_schema, Error, Item, Lifecycle, Record, StoredFile, User};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Error> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let registry = catalog_schema()?;
    info!(entities = ?registry.entity_names(), "schema registered");
    for constraint in registry.constraints() {
        info!(constraint = constraint.name(), "declared");
    }

    let mut user_data = HashMap::new();
    user_data.insert("name".to_string(), Value::Str("Ada".into()));
    user_data.insert("email".to_string(), Value::Str("ada@example.com".into()));
    user_data.insert("password".to_string(), Value::Str("correct horse".into()));
    let mut user = User::from_map(&user_data, None, &[])?;
    user.before_insert()?;
    println!("{}", user.to_json()?);

    let resolve = |target: &str, raw: &Value| -> Result<Value, Error> {
        // A real handler would look the record up in the session.
        Ok(Value::Ref(RecordRef::new(target, raw.as_i64().unwrap_or(0))))
    };
    let mut item_data = HashMap::new();
    item_data.insert("title".to_string(), Value::Str("Wrench".into()));
    item_data.insert("categories".to_string(), Value::Int(1));
    let mut item = Item::from_map(&item_data, Some(&resolve), &[])?;
    item.before_insert()?;
    println!("{}", item.to_json()?);

    let mut file = StoredFile {
        name: "manual.txt".into(),
        blob: b"lefty loosey, righty tighty".to_vec(),
        ..Default::default()
    };
    file.before_insert()?;
    println!("{}", file.to_json()?);

    Ok(())
}
