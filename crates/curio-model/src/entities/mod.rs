//! Concrete catalog entities.

mod category;
mod file;
mod item;
mod oauth;
mod user;

pub use category::Category;
pub use file::StoredFile;
pub use item::Item;
pub use oauth::OAuth;
pub use user::User;

use curio_schema::SchemaRegistry;

use crate::record::Record;
use crate::Error;

/// Build the catalog schema registry from the entity descriptors.
///
/// Called once at process start; the returned registry is immutable and
/// passed by reference to the storage layer.
pub fn catalog_schema() -> Result<SchemaRegistry, Error> {
    Ok(SchemaRegistry::builder()
        .register(User::entity_def().clone())
        .register(OAuth::entity_def().clone())
        .register(StoredFile::entity_def().clone())
        .register(Category::entity_def().clone())
        .register(Item::entity_def().clone())
        .build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use curio_schema::ConstraintDef;

    #[test]
    fn test_catalog_schema_builds() {
        let registry = catalog_schema().unwrap();
        assert_eq!(
            registry.entity_names(),
            vec!["Category", "File", "Item", "OAuth", "User"]
        );
    }

    #[test]
    fn test_catalog_unique_constraints() {
        let registry = catalog_schema().unwrap();
        let uniques: Vec<&str> = registry
            .constraints()
            .iter()
            .filter(|c| c.is_unique())
            .map(|c| c.name())
            .collect();

        assert_eq!(
            uniques,
            vec![
                "category_title_unique",
                "file_hash_unique",
                "oauth_puid_unique",
                "user_email_unique",
                "user_username_unique",
                "user_fbid_unique",
                "user_ggid_unique",
            ]
        );
    }

    #[test]
    fn test_catalog_relational_constraints() {
        let registry = catalog_schema().unwrap();

        let fks: Vec<&str> = registry
            .constraints()
            .iter()
            .filter(|c| c.is_foreign_key())
            .map(|c| c.name())
            .collect();
        assert_eq!(fks, vec!["oauth_user_fk"]);

        let joins: Vec<&ConstraintDef> = registry
            .constraints()
            .iter()
            .filter(|c| matches!(c, ConstraintDef::JoinTable { .. }))
            .collect();
        assert_eq!(joins.len(), 1);
        assert_eq!(joins[0].name(), "category_item");
    }
}
