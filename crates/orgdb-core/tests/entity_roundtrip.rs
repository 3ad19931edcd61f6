//! Serde roundtrip and JsonSchema validation tests for entity and response types.

use chrono::Utc;
use orgdb_core::diff::{ChangeSet, FieldChange};
use orgdb_core::entities::*;
use orgdb_core::enums::*;
use orgdb_core::responses::*;
use schemars::schema_for;
use serde_json::json;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            // Serde roundtrip
            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            // Schema validation
            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn sample_org() -> Organization {
    let now = Utc::now();
    Organization {
        id: "org_9f2c41d07a6b4e35b8e1c2d3f4a5b6c7".into(),
        fields: OrganizationFields {
            name: "Open Water Alliance".into(),
            abbreviation: "OWA".into(),
            operational_domain: "Environment".into(),
            scope: "International".into(),
            website: "https://openwater.example.org".into(),
            city: "Lisbon".into(),
            country: "Portugal".into(),
            focus: vec!["water".into(), "sanitation".into()],
            region: vec!["EU".into()],
            flagged_for_review: true,
            flag_reason: "Website unreachable".into(),
            ..Default::default()
        },
        created_by: "editor@example.org".into(),
        updated_by: Some("reviewer@example.org".into()),
        created_at: now,
        updated_at: now,
    }
}

roundtrip_and_validate!(
    organization_fields_roundtrip,
    OrganizationFields,
    sample_org().fields
);

roundtrip_and_validate!(organization_roundtrip, Organization, sample_org());

roundtrip_and_validate!(
    organization_without_updater_roundtrip,
    Organization,
    Organization {
        updated_by: None,
        ..sample_org()
    }
);

roundtrip_and_validate!(
    history_entry_created_roundtrip,
    HistoryEntry,
    HistoryEntry {
        organization_id: sample_org().id,
        version: 1,
        action: HistoryAction::Created,
        data: sample_org().snapshot().unwrap(),
        changes: None,
        changed_by: "editor@example.org".into(),
        timestamp: Utc::now(),
    }
);

roundtrip_and_validate!(history_entry_updated_roundtrip, HistoryEntry, {
    let mut changes = ChangeSet::new();
    changes.insert(
        "Name".into(),
        FieldChange {
            from: json!("Foo"),
            to: json!("Bar"),
        },
    );
    changes.insert(
        "Region".into(),
        FieldChange {
            from: json!(["EU"]),
            to: json!(["EU", "NA"]),
        },
    );
    HistoryEntry {
        organization_id: sample_org().id,
        version: 2,
        action: HistoryAction::Updated,
        data: sample_org().snapshot().unwrap(),
        changes: Some(changes),
        changed_by: "reviewer@example.org".into(),
        timestamp: Utc::now(),
    }
});

roundtrip_and_validate!(
    delete_response_roundtrip,
    DeleteResponse,
    DeleteResponse {
        id: "org_1".into(),
        deleted: true,
    }
);

roundtrip_and_validate!(
    rollback_response_roundtrip,
    RollbackResponse,
    RollbackResponse {
        organization: sample_org(),
        restored_version: 1,
        new_version: 3,
    }
);

roundtrip_and_validate!(
    latest_version_response_roundtrip,
    LatestVersionResponse,
    LatestVersionResponse {
        organization_id: "org_1".into(),
        latest_version: 0,
    }
);

roundtrip_and_validate!(
    stats_response_roundtrip,
    StatsResponse,
    StatsResponse {
        total: 12,
        with_website: 9,
        flagged_for_review: 2,
    }
);

roundtrip_and_validate!(
    import_response_roundtrip,
    ImportResponse,
    ImportResponse {
        mode: ImportMode::Replace,
        deleted: 4,
        imported: 10,
        skipped: 0,
    }
);

roundtrip_and_validate!(
    export_response_roundtrip,
    ExportResponse,
    ExportResponse {
        path: "orgs.json".into(),
        organizations: 10,
        history_path: Some("history.jsonl".into()),
        history_entries: 31,
    }
);

#[test]
fn history_entry_uses_camel_case_keys() {
    let entry = HistoryEntry {
        organization_id: "org_1".into(),
        version: 1,
        action: HistoryAction::Deleted,
        data: sample_org().snapshot().unwrap(),
        changes: None,
        changed_by: "x".into(),
        timestamp: Utc::now(),
    };
    let value = serde_json::to_value(&entry).unwrap();
    for key in ["organizationId", "version", "action", "data", "changes", "changedBy", "timestamp"] {
        assert!(value.get(key).is_some(), "missing key {key}");
    }
    assert_eq!(value["action"], json!("deleted"));
}
