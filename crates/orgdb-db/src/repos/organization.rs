//! Organization repository: record lifecycle with version history.
//!
//! Create, update and rollback write the record first and then append a
//! history entry. Delete appends the `deleted` entry first and then removes
//! the record. A failure of the second write leaves the first in place and is
//! logged as a consistency gap.

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, error};

use orgdb_core::entities::{HistoryEntry, Organization, OrganizationFields};
use orgdb_core::enums::HistoryAction;
use orgdb_core::ids::PREFIX_ORGANIZATION;
use orgdb_core::responses::StatsResponse;
use orgdb_core::snapshot::{Snapshot, strip_metadata};

use crate::error::DatabaseError;
use crate::helpers::{
    format_timestamp, get_opt_string, now_micros, parse_datetime, parse_string_list,
    string_list_json,
};
use crate::service::DirectoryService;
use crate::updates::organization::OrganizationUpdate;

const ENTITY: &str = "organization";

/// Field columns in `OrganizationFields` declaration order.
const FIELD_COLUMNS: [&str; 24] = [
    "name",
    "abbreviation",
    "operational_domain",
    "scope",
    "website",
    "city",
    "state_province",
    "postal_code",
    "country",
    "address_line1",
    "address_line2",
    "latitude",
    "longitude",
    "focus",
    "overview",
    "key_activities",
    "region",
    "locations_countries",
    "flagged_for_review",
    "flag_reason",
    "email",
    "social_media",
    "notes",
    "empty_org",
];

const SELECT_COLS: &str = "id, name, abbreviation, operational_domain, scope, website, city, \
     state_province, postal_code, country, address_line1, address_line2, latitude, longitude, \
     focus, overview, key_activities, region, locations_countries, flagged_for_review, \
     flag_reason, email, social_media, notes, empty_org, \
     created_by, updated_by, created_at, updated_at";

fn row_to_organization(row: &libsql::Row) -> Result<Organization, DatabaseError> {
    let text = |idx: i32| row.get::<String>(idx);
    Ok(Organization {
        id: text(0)?,
        fields: OrganizationFields {
            name: text(1)?,
            abbreviation: text(2)?,
            operational_domain: text(3)?,
            scope: text(4)?,
            website: text(5)?,
            city: text(6)?,
            state_province: text(7)?,
            postal_code: text(8)?,
            country: text(9)?,
            address_line1: text(10)?,
            address_line2: text(11)?,
            latitude: text(12)?,
            longitude: text(13)?,
            focus: parse_string_list(&text(14)?)?,
            overview: text(15)?,
            key_activities: text(16)?,
            region: parse_string_list(&text(17)?)?,
            locations_countries: text(18)?,
            flagged_for_review: row.get::<i64>(19)? != 0,
            flag_reason: text(20)?,
            email: text(21)?,
            social_media: text(22)?,
            notes: text(23)?,
            empty_org: text(24)?,
        },
        created_by: text(25)?,
        updated_by: get_opt_string(row, 26)?,
        created_at: parse_datetime(&text(27)?)?,
        updated_at: parse_datetime(&text(28)?)?,
    })
}

/// Column values for `FIELD_COLUMNS`, in order.
fn field_values(fields: &OrganizationFields) -> Result<Vec<libsql::Value>, DatabaseError> {
    use libsql::Value::{Integer, Text};
    Ok(vec![
        Text(fields.name.clone()),
        Text(fields.abbreviation.clone()),
        Text(fields.operational_domain.clone()),
        Text(fields.scope.clone()),
        Text(fields.website.clone()),
        Text(fields.city.clone()),
        Text(fields.state_province.clone()),
        Text(fields.postal_code.clone()),
        Text(fields.country.clone()),
        Text(fields.address_line1.clone()),
        Text(fields.address_line2.clone()),
        Text(fields.latitude.clone()),
        Text(fields.longitude.clone()),
        Text(string_list_json(&fields.focus)?),
        Text(fields.overview.clone()),
        Text(fields.key_activities.clone()),
        Text(string_list_json(&fields.region)?),
        Text(fields.locations_countries.clone()),
        Integer(i64::from(fields.flagged_for_review)),
        Text(fields.flag_reason.clone()),
        Text(fields.email.clone()),
        Text(fields.social_media.clone()),
        Text(fields.notes.clone()),
        Text(fields.empty_org.clone()),
    ])
}

fn opt_text(value: Option<&str>) -> libsql::Value {
    value.map_or(libsql::Value::Null, |s| libsql::Value::Text(s.to_string()))
}

fn require_actor(actor: &str) -> Result<(), DatabaseError> {
    if actor.trim().is_empty() {
        return Err(DatabaseError::Validation("an actor is required".into()));
    }
    Ok(())
}

impl DirectoryService {
    /// Create an organization with a freshly generated `ID`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for an empty actor, or a storage
    /// error from either write.
    pub async fn create_organization(
        &self,
        fields: OrganizationFields,
        actor: &str,
    ) -> Result<Organization, DatabaseError> {
        self.create_organization_with_id(None, fields, actor).await
    }

    /// Create an organization, keeping `id` when given (bulk import).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for an empty actor or a blank `id`,
    /// or a storage error (including a duplicate `id`).
    pub async fn create_organization_with_id(
        &self,
        id: Option<String>,
        fields: OrganizationFields,
        actor: &str,
    ) -> Result<Organization, DatabaseError> {
        require_actor(actor)?;
        let id = match id {
            Some(id) if id.trim().is_empty() => {
                return Err(DatabaseError::Validation("organization ID is blank".into()));
            }
            Some(id) => id,
            None => self.db().generate_id(PREFIX_ORGANIZATION).await?,
        };
        let now = now_micros();

        let org = Organization {
            id,
            fields,
            created_by: actor.to_string(),
            updated_by: None,
            created_at: now,
            updated_at: now,
        };
        self.insert_organization(&org).await?;
        debug!(id = %org.id, actor, "organization created");

        let snapshot = org.snapshot()?;
        self.record_history(&org.id, HistoryAction::Created, &snapshot, None, actor)
            .await?;
        Ok(org)
    }

    async fn insert_organization(&self, org: &Organization) -> Result<(), DatabaseError> {
        let mut params = vec![libsql::Value::Text(org.id.clone())];
        params.extend(field_values(&org.fields)?);
        params.push(libsql::Value::Text(org.created_by.clone()));
        params.push(opt_text(org.updated_by.as_deref()));
        params.push(libsql::Value::Text(format_timestamp(&org.created_at)));
        params.push(libsql::Value::Text(format_timestamp(&org.updated_at)));

        let placeholders = (1..=params.len())
            .map(|i| format!("?{i}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!("INSERT INTO organizations ({SELECT_COLS}) VALUES ({placeholders})");
        self.db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        Ok(())
    }

    /// Overwrite every field and the update audit of an existing row.
    async fn write_organization(&self, org: &Organization) -> Result<(), DatabaseError> {
        let mut params = field_values(&org.fields)?;
        let mut sets: Vec<String> = FIELD_COLUMNS
            .iter()
            .enumerate()
            .map(|(i, col)| format!("{col} = ?{}", i + 1))
            .collect();

        params.push(opt_text(org.updated_by.as_deref()));
        sets.push(format!("updated_by = ?{}", params.len()));
        params.push(libsql::Value::Text(format_timestamp(&org.updated_at)));
        sets.push(format!("updated_at = ?{}", params.len()));
        params.push(libsql::Value::Text(org.id.clone()));
        let id_idx = params.len();

        let sql = format!(
            "UPDATE organizations SET {} WHERE id = ?{id_idx}",
            sets.join(", ")
        );
        let affected = self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        if affected == 0 {
            return Err(DatabaseError::not_found(ENTITY, org.id.clone()));
        }
        Ok(())
    }

    /// Append a history entry for a record write that already happened.
    ///
    /// A failure here means the record and its history disagree.
    async fn record_history(
        &self,
        id: &str,
        action: HistoryAction,
        new: &Snapshot,
        old: Option<&Snapshot>,
        actor: &str,
    ) -> Result<HistoryEntry, DatabaseError> {
        self.save_version(id, action, new, old, actor)
            .await
            .inspect_err(|e| {
                error!(
                    organization_id = id,
                    action = %action,
                    error = %e,
                    "record written but history entry failed; history is incomplete"
                );
            })
    }

    /// Look up an organization by `ID`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a row is malformed.
    pub async fn find_organization(&self, id: &str) -> Result<Option<Organization>, DatabaseError> {
        let sql = format!("SELECT {SELECT_COLS} FROM organizations WHERE id = ?1");
        let mut rows = self.db().conn().query(&sql, [id]).await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_organization(&row)?)),
            None => Ok(None),
        }
    }

    /// Fetch an organization by `ID`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no such organization exists.
    pub async fn get_organization(&self, id: &str) -> Result<Organization, DatabaseError> {
        self.find_organization(id)
            .await?
            .ok_or_else(|| DatabaseError::not_found(ENTITY, id))
    }

    /// Organizations ordered by name, at most `limit` (0 means no limit).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a row is malformed.
    pub async fn list_organizations(&self, limit: u32) -> Result<Vec<Organization>, DatabaseError> {
        let limit_clause = if limit == 0 {
            String::new()
        } else {
            format!("LIMIT {limit}")
        };
        let sql = format!(
            "SELECT {SELECT_COLS} FROM organizations ORDER BY name COLLATE NOCASE, id {limit_clause}"
        );
        let mut rows = self.db().conn().query(&sql, ()).await?;

        let mut orgs = Vec::new();
        while let Some(row) = rows.next().await? {
            orgs.push(row_to_organization(&row)?);
        }
        Ok(orgs)
    }

    /// Apply a partial update and record an `updated` history entry.
    ///
    /// An empty update is a no-op and records nothing.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the organization does not exist,
    /// `DatabaseError::Validation` for an empty actor or a malformed value,
    /// or a storage error from either write.
    pub async fn update_organization(
        &self,
        id: &str,
        update: &OrganizationUpdate,
        actor: &str,
    ) -> Result<Organization, DatabaseError> {
        require_actor(actor)?;
        let current = self.get_organization(id).await?;
        if update.is_empty() {
            return Ok(current);
        }
        debug!(id, fields = ?update.keys().collect::<Vec<_>>(), "applying organization update");

        let fields = update.apply_to(&current.fields)?;
        self.replace_fields(current, fields, actor, now_micros())
            .await
            .map(|(org, _)| org)
    }

    /// Persist `fields` over `current` and record the `updated` entry.
    async fn replace_fields(
        &self,
        current: Organization,
        fields: OrganizationFields,
        actor: &str,
        now: DateTime<Utc>,
    ) -> Result<(Organization, HistoryEntry), DatabaseError> {
        let old = current.snapshot()?;
        let org = Organization {
            fields,
            updated_by: Some(actor.to_string()),
            updated_at: now,
            ..current
        };
        self.write_organization(&org).await?;
        debug!(id = %org.id, actor, "organization updated");

        let new = org.snapshot()?;
        let entry = self
            .record_history(&org.id, HistoryAction::Updated, &new, Some(&old), actor)
            .await?;
        Ok((org, entry))
    }

    /// Record a `deleted` history entry, then remove the organization.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the organization does not exist,
    /// or a storage error. If the history write fails the record is kept.
    pub async fn delete_organization(&self, id: &str, actor: &str) -> Result<(), DatabaseError> {
        require_actor(actor)?;
        let current = self.get_organization(id).await?;
        let snapshot = current.snapshot()?;
        self.save_version(id, HistoryAction::Deleted, &snapshot, None, actor)
            .await?;

        let removed = self
            .db()
            .conn()
            .execute("DELETE FROM organizations WHERE id = ?1", [id])
            .await
            .inspect_err(|e| {
                error!(
                    organization_id = id,
                    error = %e,
                    "deleted entry recorded but record removal failed; history is ahead of the record"
                );
            })?;
        if removed == 0 {
            // Removed concurrently after the read; the entry above stands.
            debug!(id, "organization already removed");
        } else {
            debug!(id, actor, "organization deleted");
        }
        Ok(())
    }

    /// Restore the fields stored at `version` as a new forward version.
    ///
    /// `ID` and the creation audit fields of the current record are kept.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the version or the organization
    /// does not exist, `DatabaseError::Validation` if the stored snapshot can
    /// no longer be read as organization fields, or a storage error.
    pub async fn rollback_organization(
        &self,
        id: &str,
        version: u32,
        actor: &str,
    ) -> Result<(Organization, HistoryEntry), DatabaseError> {
        require_actor(actor)?;
        let target = self
            .get_version(id, version)
            .await?
            .ok_or_else(|| DatabaseError::not_found("version", format!("{id}@{version}")))?;
        let current = self.get_organization(id).await?;

        let fields = OrganizationFields::from_json(&Value::Object(strip_metadata(&target.data)))?;
        let (org, entry) = self
            .replace_fields(current, fields, actor, now_micros())
            .await?;
        debug!(id, restored = version, new_version = entry.version, "organization rolled back");
        Ok((org, entry))
    }

    /// Directory-wide counts.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn organization_stats(&self) -> Result<StatsResponse, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT COUNT(*),
                        COALESCE(SUM(CASE WHEN trim(website) <> '' THEN 1 ELSE 0 END), 0),
                        COALESCE(SUM(CASE WHEN flagged_for_review <> 0 THEN 1 ELSE 0 END), 0)
                 FROM organizations",
                (),
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let count = |idx: i32| -> Result<u64, DatabaseError> {
            let v = row.get::<i64>(idx)?;
            u64::try_from(v).map_err(|_| DatabaseError::InvalidState(format!("negative count {v}")))
        };
        Ok(StatsResponse {
            total: count(0)?,
            with_website: count(1)?,
            flagged_for_review: count(2)?,
        })
    }
}
