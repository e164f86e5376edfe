use std::fmt::Debug;

use log::*;
use serde::{Deserialize, Serialize};

use crate::{
    db_types::Team,
    traits::{AliasManagement, DatabaseError},
    tracker_api::errors::{AliasError, ResultTrackerError, TeamRole},
};

/// A team alias resolved to the internal team and the fixture provider's id for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedAlias {
    pub team_id: i64,
    pub team_name: String,
    pub external_team_id: i64,
}

/// `AliasApi` maps human-entered team names onto teams, and seeds new teams.
pub struct AliasApi<B> {
    db: B,
}

impl<B> Debug for AliasApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AliasApi")
    }
}

impl<B> AliasApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> AliasApi<B>
where B: AliasManagement
{
    /// Finds the team known by `alias`, ignoring case.
    ///
    /// A team can only take part in result tracking if it is linked to the fixture provider, so an alias for an
    /// unlinked team is an error ([`AliasError::MissingExternalLink`]), distinct from an unknown alias.
    pub async fn find(&self, alias: &str) -> Result<ResolvedAlias, AliasError> {
        let record = self.db.fetch_alias_record(alias).await?.ok_or_else(|| AliasError::NotFound(alias.to_string()))?;
        let external_team_id =
            record.provider_team_id.ok_or_else(|| AliasError::MissingExternalLink(alias.to_string()))?;
        trace!("🏷️ '{alias}' resolved to team #{} ({})", record.team_id, record.team_name);
        Ok(ResolvedAlias { team_id: record.team_id, team_name: record.team_name, external_team_id })
    }

    /// Resolves the home and away aliases of a fixture, reporting which one failed.
    pub async fn find_pair(
        &self,
        home: &str,
        away: &str,
    ) -> Result<(ResolvedAlias, ResolvedAlias), ResultTrackerError> {
        let home = self.find(home).await.map_err(|e| e.with_role(TeamRole::Home))?;
        let away = self.find(away).await.map_err(|e| e.with_role(TeamRole::Away))?;
        Ok((home, away))
    }

    /// Creates a team, registers its aliases and optionally links it to the provider's team id.
    ///
    /// The team's own name is always registered as one of its aliases.
    pub async fn register_team(
        &self,
        name: &str,
        aliases: &[String],
        provider_team_id: Option<i64>,
    ) -> Result<Team, ResultTrackerError> {
        let team = self.db.create_team(name).await?;
        let names = std::iter::once(name).chain(aliases.iter().map(String::as_str));
        for alias in names {
            match self.db.add_alias(team.id, alias).await {
                Ok(_) => {},
                Err(DatabaseError::AlreadyExists(_)) => {
                    warn!("🏷️ The alias '{alias}' is already in use. It was not added to team #{}", team.id);
                },
                Err(e) => return Err(e.into()),
            }
        }
        if let Some(provider_id) = provider_team_id {
            self.db.link_external_team(team.id, provider_id).await?;
        }
        info!("🏷️ Team #{} ({}) registered", team.id, team.name);
        Ok(team)
    }
}
