//! Organization update builder.

use serde::Serialize;
use serde_json::Value;

use orgdb_core::entities::OrganizationFields;
use orgdb_core::snapshot::Snapshot;

use crate::error::DatabaseError;

/// Keys a caller may never change through an update.
pub const PROTECTED_KEYS: &[&str] = &[
    "ID",
    "_id",
    "__v",
    "createdBy",
    "createdAt",
    "updatedBy",
    "updatedAt",
];

/// A partial field mapping keyed by serialized field name.
///
/// Serializes as the plain mapping of changed keys.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(transparent)]
pub struct OrganizationUpdate {
    fields: Snapshot,
}

impl OrganizationUpdate {
    /// Validate a caller-supplied JSON object as an update.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` if `value` is not an object, names a
    /// protected key, or names a key that is not an organization field.
    pub fn from_json(value: Value) -> Result<Self, DatabaseError> {
        let Value::Object(fields) = value else {
            return Err(DatabaseError::Validation(
                "update must be a JSON object".into(),
            ));
        };
        for key in fields.keys() {
            if PROTECTED_KEYS.contains(&key.as_str()) {
                return Err(DatabaseError::Validation(format!(
                    "field '{key}' cannot be changed"
                )));
            }
            if !OrganizationFields::is_field(key) {
                return Err(DatabaseError::Validation(format!(
                    "unknown organization field '{key}'"
                )));
            }
        }
        Ok(Self { fields })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Serialized names of the fields this update touches.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Overlay this update on `current` and normalize the result.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` if an updated value has an unusable
    /// shape for its field.
    pub fn apply_to(
        &self,
        current: &OrganizationFields,
    ) -> Result<OrganizationFields, DatabaseError> {
        let mut merged = match serde_json::to_value(current) {
            Ok(Value::Object(map)) => map,
            Ok(other) => {
                return Err(DatabaseError::InvalidState(format!(
                    "organization fields serialized to {other}"
                )));
            }
            Err(e) => return Err(DatabaseError::Other(e.into())),
        };
        for (key, value) in &self.fields {
            merged.insert(key.clone(), value.clone());
        }
        Ok(OrganizationFields::from_json(&Value::Object(merged))?)
    }
}

#[derive(Debug, Default)]
pub struct OrganizationUpdateBuilder(OrganizationUpdate);

impl OrganizationUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn set(mut self, key: &str, value: Value) -> Self {
        self.0.fields.insert(key.to_string(), value);
        self
    }

    #[must_use]
    pub fn name(self, val: impl Into<String>) -> Self {
        self.set("Name", Value::String(val.into()))
    }

    #[must_use]
    pub fn abbreviation(self, val: impl Into<String>) -> Self {
        self.set("Abbreviation", Value::String(val.into()))
    }

    #[must_use]
    pub fn website(self, val: impl Into<String>) -> Self {
        self.set("Website", Value::String(val.into()))
    }

    #[must_use]
    pub fn city(self, val: impl Into<String>) -> Self {
        self.set("City", Value::String(val.into()))
    }

    #[must_use]
    pub fn country(self, val: impl Into<String>) -> Self {
        self.set("Country", Value::String(val.into()))
    }

    #[must_use]
    pub fn notes(self, val: impl Into<String>) -> Self {
        self.set("Notes", Value::String(val.into()))
    }

    #[must_use]
    pub fn focus(self, val: Vec<String>) -> Self {
        self.set("Focus", Value::from(val))
    }

    #[must_use]
    pub fn region(self, val: Vec<String>) -> Self {
        self.set("Region", Value::from(val))
    }

    #[must_use]
    pub fn flagged_for_review(self, val: bool) -> Self {
        self.set("Flagged for Review", Value::Bool(val))
    }

    #[must_use]
    pub fn flag_reason(self, val: impl Into<String>) -> Self {
        self.set("Flag Reason", Value::String(val.into()))
    }

    #[must_use]
    pub fn build(self) -> OrganizationUpdate {
        self.0
    }
}
