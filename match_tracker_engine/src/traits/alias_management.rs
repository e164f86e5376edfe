use crate::{
    db_types::{Alias, AliasRecord, ExternalTeam, Team},
    traits::DatabaseError,
};

/// Team identity and naming.
///
/// Aliases are unique and compared case-insensitively. A team is linked to the fixture provider by at most one
/// [`ExternalTeam`] record.
#[allow(async_fn_in_trait)]
pub trait AliasManagement {
    /// Fetches the alias, its team and the team's provider link (if any). Alias matching ignores case.
    async fn fetch_alias_record(&self, alias: &str) -> Result<Option<AliasRecord>, DatabaseError>;

    /// Returns every alias whose team does not have a provider link yet.
    async fn fetch_unlinked_aliases(&self) -> Result<Vec<AliasRecord>, DatabaseError>;

    async fn create_team(&self, name: &str) -> Result<Team, DatabaseError>;

    /// Adds an alias for the team. Fails with [`DatabaseError::AlreadyExists`] if any team already uses the alias.
    async fn add_alias(&self, team_id: i64, alias: &str) -> Result<Alias, DatabaseError>;

    /// Links the team to the provider's team id, replacing an existing link.
    async fn link_external_team(&self, team_id: i64, provider_team_id: i64) -> Result<ExternalTeam, DatabaseError>;
}
