//! JSON array import.

use std::path::Path;

use serde_json::Value;
use tracing::{debug, info};

use orgdb_core::entities::OrganizationFields;
use orgdb_core::enums::ImportMode;
use orgdb_core::responses::ImportResponse;

use crate::error::DatabaseError;
use crate::service::DirectoryService;

/// One validated import item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportItem {
    pub id: Option<String>,
    pub fields: OrganizationFields,
}

/// Parse a JSON array of organization objects.
///
/// `ID` may be a string or a number; blank or missing IDs are generated on
/// insert. Every item is validated before anything is written.
///
/// # Errors
///
/// Returns `DatabaseError::Validation` naming the first bad item.
pub fn parse_import(value: Value) -> Result<Vec<ImportItem>, DatabaseError> {
    let Value::Array(items) = value else {
        return Err(DatabaseError::Validation(
            "import data must be a JSON array of organizations".into(),
        ));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| {
            if !item.is_object() {
                return Err(DatabaseError::Validation(format!(
                    "import item {idx} is not an object"
                )));
            }
            let id = match item.get("ID") {
                None | Some(Value::Null) => None,
                Some(Value::String(s)) if s.trim().is_empty() => None,
                Some(Value::String(s)) => Some(s.trim().to_string()),
                Some(Value::Number(n)) => Some(n.to_string()),
                Some(other) => {
                    return Err(DatabaseError::Validation(format!(
                        "import item {idx} has an unusable ID: {other}"
                    )));
                }
            };
            let fields = OrganizationFields::from_json(&item)
                .map_err(|e| DatabaseError::Validation(format!("import item {idx}: {e}")))?;
            Ok(ImportItem { id, fields })
        })
        .collect()
}

impl DirectoryService {
    /// Import parsed items.
    ///
    /// `Replace` deletes every current organization through the delete
    /// lifecycle first. `Append` skips items whose `ID` already exists. Each
    /// inserted organization gets a `created` history entry by `actor`.
    ///
    /// # Errors
    ///
    /// Returns the first lifecycle error; items before it stay imported.
    pub async fn import_organizations(
        &self,
        items: Vec<ImportItem>,
        mode: ImportMode,
        actor: &str,
    ) -> Result<ImportResponse, DatabaseError> {
        let mut response = ImportResponse {
            mode,
            deleted: 0,
            imported: 0,
            skipped: 0,
        };

        if mode == ImportMode::Replace {
            for org in self.list_organizations(0).await? {
                self.delete_organization(&org.id, actor).await?;
                response.deleted += 1;
            }
        }

        for item in items {
            if let Some(id) = item.id.as_deref() {
                if self.find_organization(id).await?.is_some() {
                    debug!(id, "import skipped existing organization");
                    response.skipped += 1;
                    continue;
                }
            }
            self.create_organization_with_id(item.id, item.fields, actor)
                .await?;
            response.imported += 1;
        }

        info!(
            mode = %mode,
            deleted = response.deleted,
            imported = response.imported,
            skipped = response.skipped,
            "import finished"
        );
        Ok(response)
    }

    /// Read a JSON array file and import it.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for unreadable or malformed input,
    /// or the first lifecycle error.
    pub async fn import_file(
        &self,
        path: &Path,
        mode: ImportMode,
        actor: &str,
    ) -> Result<ImportResponse, DatabaseError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            DatabaseError::Validation(format!("cannot read {}: {e}", path.display()))
        })?;
        let value: Value = serde_json::from_str(&raw).map_err(|e| {
            DatabaseError::Validation(format!("{} is not valid JSON: {e}", path.display()))
        })?;
        let items = parse_import(value)?;
        self.import_organizations(items, mode, actor).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{ACTOR, create_named, test_service};
    use orgdb_core::enums::HistoryAction;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn parse_normalizes_loose_items() {
        let items = parse_import(json!([
            {"ID": 7, "Name": "Seven", "Flagged for Review": "", "Region": "EU", "Website": null},
            {"ID": "  ", "Name": "Blank"},
            {"Name": "NoId", "Focus": ["water"]}
        ]))
        .unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].id.as_deref(), Some("7"));
        assert!(!items[0].fields.flagged_for_review);
        assert!(items[0].fields.region.is_empty());
        assert_eq!(items[0].fields.website, "");
        assert!(items[1].id.is_none());
        assert_eq!(items[2].fields.focus, vec!["water"]);
    }

    #[test]
    fn parse_rejects_non_arrays_and_bad_items() {
        assert!(parse_import(json!({"Name": "x"})).is_err());
        let err = parse_import(json!([{"Name": "ok"}, "nope"])).unwrap_err();
        assert!(err.to_string().contains("item 1"));
        let err = parse_import(json!([{"ID": ["x"]}])).unwrap_err();
        assert!(matches!(err, DatabaseError::Validation(_)));
    }

    #[tokio::test]
    async fn append_skips_existing_ids() {
        let svc = test_service().await;
        let existing = create_named(&svc, "Existing").await;

        let items = parse_import(json!([
            {"ID": existing.id.clone(), "Name": "Changed"},
            {"ID": "legacy-1", "Name": "Legacy"},
            {"ID": "legacy-1", "Name": "Duplicate in file"},
            {"Name": "Fresh"}
        ]))
        .unwrap();
        let response = svc
            .import_organizations(items, ImportMode::Append, "importer")
            .await
            .unwrap();
        assert_eq!(
            response,
            ImportResponse {
                mode: ImportMode::Append,
                deleted: 0,
                imported: 2,
                skipped: 2,
            }
        );
        assert_eq!(svc.get_organization(&existing.id).await.unwrap().fields.name, "Existing");

        let legacy = svc.get_organization("legacy-1").await.unwrap();
        assert_eq!(legacy.fields.name, "Legacy");
        assert_eq!(legacy.created_by, "importer");
        let history = svc.get_history("legacy-1").await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].action, HistoryAction::Created);
        assert_eq!(history[0].changed_by, "importer");
    }

    #[tokio::test]
    async fn replace_deletes_through_lifecycle() {
        let svc = test_service().await;
        let old = create_named(&svc, "Old").await;

        let items = parse_import(json!([{"ID": "new-1", "Name": "New"}])).unwrap();
        let response = svc
            .import_organizations(items, ImportMode::Replace, ACTOR)
            .await
            .unwrap();
        assert_eq!(response.deleted, 1);
        assert_eq!(response.imported, 1);

        assert!(svc.find_organization(&old.id).await.unwrap().is_none());
        let old_history = svc.get_history(&old.id).await.unwrap();
        assert_eq!(old_history[0].action, HistoryAction::Deleted);
        assert_eq!(old_history[0].version, 2);

        let names: Vec<String> = svc
            .list_organizations(0)
            .await
            .unwrap()
            .into_iter()
            .map(|o| o.fields.name)
            .collect();
        assert_eq!(names, vec!["New"]);
    }

    #[tokio::test]
    async fn import_file_reads_json_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orgs.json");
        std::fs::write(
            &path,
            serde_json::to_string(&json!([{"ID": "f-1", "Name": "From File"}])).unwrap(),
        )
        .unwrap();

        let svc = test_service().await;
        let response = svc.import_file(&path, ImportMode::Append, ACTOR).await.unwrap();
        assert_eq!(response.imported, 1);
        assert_eq!(svc.get_organization("f-1").await.unwrap().fields.name, "From File");
    }

    #[tokio::test]
    async fn import_file_rejects_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "[{").unwrap();

        let svc = test_service().await;
        let err = svc.import_file(&path, ImportMode::Append, ACTOR).await.unwrap_err();
        assert!(matches!(err, DatabaseError::Validation(_)));
        let missing = svc
            .import_file(&dir.path().join("absent.json"), ImportMode::Append, ACTOR)
            .await
            .unwrap_err();
        assert!(matches!(missing, DatabaseError::Validation(_)));
    }
}
