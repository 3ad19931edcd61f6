use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::form_serde;
use crate::snapshot::{Snapshot, to_snapshot};

/// Editable directory fields of an organization.
///
/// Serialized keys keep the directory's original column headings
/// (`"Operational Domain"`, `"State/Province"`, ...). Every field is always
/// present when serialized so history snapshots keep a stable shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(default)]
pub struct OrganizationFields {
    #[serde(rename = "Name", deserialize_with = "form_serde::string")]
    pub name: String,
    #[serde(rename = "Abbreviation", deserialize_with = "form_serde::string")]
    pub abbreviation: String,
    #[serde(rename = "Operational Domain", deserialize_with = "form_serde::string")]
    pub operational_domain: String,
    #[serde(rename = "Scope", deserialize_with = "form_serde::string")]
    pub scope: String,
    #[serde(rename = "Website", deserialize_with = "form_serde::string")]
    pub website: String,
    #[serde(rename = "City", deserialize_with = "form_serde::string")]
    pub city: String,
    #[serde(rename = "State/Province", deserialize_with = "form_serde::string")]
    pub state_province: String,
    #[serde(rename = "Postal Code", deserialize_with = "form_serde::string")]
    pub postal_code: String,
    #[serde(rename = "Country", deserialize_with = "form_serde::string")]
    pub country: String,
    #[serde(rename = "Address Line 1", deserialize_with = "form_serde::string")]
    pub address_line1: String,
    #[serde(rename = "Address Line 2", deserialize_with = "form_serde::string")]
    pub address_line2: String,
    #[serde(rename = "Latitude", deserialize_with = "form_serde::string")]
    pub latitude: String,
    #[serde(rename = "Longitude", deserialize_with = "form_serde::string")]
    pub longitude: String,
    #[serde(rename = "Focus", deserialize_with = "form_serde::string_list")]
    pub focus: Vec<String>,
    #[serde(rename = "Overview", deserialize_with = "form_serde::string")]
    pub overview: String,
    #[serde(rename = "Key Activities", deserialize_with = "form_serde::string")]
    pub key_activities: String,
    #[serde(rename = "Region", deserialize_with = "form_serde::string_list")]
    pub region: Vec<String>,
    #[serde(rename = "Locations/Countries", deserialize_with = "form_serde::string")]
    pub locations_countries: String,
    #[serde(rename = "Flagged for Review", deserialize_with = "form_serde::flag")]
    pub flagged_for_review: bool,
    #[serde(rename = "Flag Reason", deserialize_with = "form_serde::string")]
    pub flag_reason: String,
    #[serde(rename = "Email", deserialize_with = "form_serde::string")]
    pub email: String,
    #[serde(rename = "Social Media", deserialize_with = "form_serde::string")]
    pub social_media: String,
    #[serde(rename = "Notes", deserialize_with = "form_serde::string")]
    pub notes: String,
    #[serde(rename = "Empty Org?", deserialize_with = "form_serde::string")]
    pub empty_org: String,
}

impl OrganizationFields {
    /// Serialized key of every editable field, in declaration order.
    pub const FIELD_NAMES: &'static [&'static str] = &[
        "Name",
        "Abbreviation",
        "Operational Domain",
        "Scope",
        "Website",
        "City",
        "State/Province",
        "Postal Code",
        "Country",
        "Address Line 1",
        "Address Line 2",
        "Latitude",
        "Longitude",
        "Focus",
        "Overview",
        "Key Activities",
        "Region",
        "Locations/Countries",
        "Flagged for Review",
        "Flag Reason",
        "Email",
        "Social Media",
        "Notes",
        "Empty Org?",
    ];

    /// Build fields from loosely-typed JSON (form post, import item, history
    /// snapshot). Unknown keys are ignored; missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if a field has an unusable shape.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, CoreError> {
        Self::deserialize(value)
            .map_err(|e| CoreError::Validation(format!("invalid organization fields: {e}")))
    }

    /// Fields holding a list or a flag rather than free text.
    pub const STRUCTURED_FIELDS: &'static [&'static str] =
        &["Focus", "Region", "Flagged for Review"];

    /// Whether `key` names an editable field.
    #[must_use]
    pub fn is_field(key: &str) -> bool {
        Self::FIELD_NAMES.contains(&key)
    }

    /// Whether `key` names a free-text field.
    #[must_use]
    pub fn is_text_field(key: &str) -> bool {
        Self::is_field(key) && !Self::STRUCTURED_FIELDS.contains(&key)
    }
}

/// A directory record: identifier, editable fields, and audit fields.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Organization {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(flatten)]
    pub fields: OrganizationFields,
    #[serde(rename = "createdBy")]
    pub created_by: String,
    #[serde(rename = "updatedBy", default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Organization {
    /// Full snapshot of this record as stored in history.
    ///
    /// # Errors
    ///
    /// Returns `CoreError` if serialization fails.
    pub fn snapshot(&self) -> Result<Snapshot, CoreError> {
        to_snapshot(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample() -> Organization {
        let now = Utc::now();
        Organization {
            id: "org_0123".into(),
            fields: OrganizationFields {
                name: "Foo".into(),
                region: vec!["EU".into()],
                ..Default::default()
            },
            created_by: "editor@example.org".into(),
            updated_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn snapshot_uses_directory_keys() {
        let snap = sample().snapshot().unwrap();
        assert_eq!(snap["ID"], json!("org_0123"));
        assert_eq!(snap["Name"], json!("Foo"));
        assert_eq!(snap["Region"], json!(["EU"]));
        assert_eq!(snap["Flagged for Review"], json!(false));
        assert_eq!(snap["createdBy"], json!("editor@example.org"));
        assert!(!snap.contains_key("updatedBy"));
    }

    #[test]
    fn snapshot_has_every_field() {
        let snap = sample().snapshot().unwrap();
        for key in OrganizationFields::FIELD_NAMES {
            assert!(snap.contains_key(*key), "snapshot missing {key}");
        }
    }

    #[test]
    fn field_names_match_serialization() {
        let value = serde_json::to_value(OrganizationFields::default()).unwrap();
        let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        let mut expected = OrganizationFields::FIELD_NAMES.to_vec();
        keys.sort_unstable();
        expected.sort_unstable();
        assert_eq!(keys, expected);
    }

    #[test]
    fn from_json_fills_defaults_and_ignores_unknown() {
        let fields = OrganizationFields::from_json(&json!({
            "Name": "Foo",
            "Region": "EU",
            "Flagged for Review": "",
            "Website": null,
            "createdBy": "someone",
            "Unrelated": 1
        }))
        .unwrap();
        assert_eq!(fields.name, "Foo");
        assert!(fields.region.is_empty());
        assert!(!fields.flagged_for_review);
        assert_eq!(fields.website, "");
    }

    #[test]
    fn text_fields_exclude_lists_and_flag() {
        assert!(OrganizationFields::is_text_field("Latitude"));
        assert!(OrganizationFields::is_text_field("Postal Code"));
        assert!(!OrganizationFields::is_text_field("Region"));
        assert!(!OrganizationFields::is_text_field("Flagged for Review"));
        assert!(!OrganizationFields::is_text_field("createdBy"));
    }

    #[test]
    fn organization_roundtrip() {
        let org = sample();
        let json = serde_json::to_string(&org).unwrap();
        let back: Organization = serde_json::from_str(&json).unwrap();
        assert_eq!(back, org);
    }
}
