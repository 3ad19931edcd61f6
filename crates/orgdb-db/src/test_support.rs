//! Shared test utilities for orgdb-db unit tests.

pub(crate) mod helpers {
    use orgdb_core::entities::{Organization, OrganizationFields};

    use crate::OrgDb;
    use crate::service::DirectoryService;

    pub const ACTOR: &str = "editor@example.org";

    /// Create an in-memory `DirectoryService`.
    pub async fn test_service() -> DirectoryService {
        let db = OrgDb::open_local(":memory:").await.unwrap();
        DirectoryService::from_db(db)
    }

    /// Fields with just a name set.
    pub fn named(name: &str) -> OrganizationFields {
        OrganizationFields {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Create an organization named `name` as [`ACTOR`].
    pub async fn create_named(svc: &DirectoryService, name: &str) -> Organization {
        svc.create_organization(named(name), ACTOR).await.unwrap()
    }
}
