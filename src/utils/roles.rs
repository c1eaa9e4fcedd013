//! Discord role membership: looking roles up in a guild and adding or removing them from
//! members. The commands only see the [`RoleGateway`] trait.

use serenity::all::{GuildId, RoleId, UserId};
use serenity::async_trait;
use serenity::http::Http;
use serenity::model::ModelError;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// A catalog role as it exists in a guild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRole {
    pub id: RoleId,
    pub name: String,
}

#[derive(Error, Debug)]
pub enum RoleError {
    /// Discord refused the change, usually because the bot's role is too low.
    #[error("Missing permissions to manage this role")]
    PermissionDenied,

    #[error("Discord error: {0}")]
    Platform(#[source] serenity::Error),
}

impl From<serenity::Error> for RoleError {
    fn from(error: serenity::Error) -> Self {
        let denied = match &error {
            serenity::Error::Http(http) => http.status_code().map(|s| s.as_u16()) == Some(403),
            serenity::Error::Model(ModelError::InvalidPermissions { .. }) => true,
            _ => false,
        };

        if denied {
            RoleError::PermissionDenied
        } else {
            RoleError::Platform(error)
        }
    }
}

/// Role operations against the chat platform.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoleGateway: Send + Sync {
    /// Looks `role_id` up among the guild's roles.
    async fn find_role(
        &self,
        guild_id: GuildId,
        role_id: RoleId,
    ) -> Result<Option<ResolvedRole>, RoleError>;

    async fn add_member_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<(), RoleError>;

    async fn remove_member_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<(), RoleError>;
}

/// [`RoleGateway`] talking to Discord over HTTP.
pub struct SerenityRoleGateway {
    http: Arc<Http>,
}

impl SerenityRoleGateway {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl RoleGateway for SerenityRoleGateway {
    async fn find_role(
        &self,
        guild_id: GuildId,
        role_id: RoleId,
    ) -> Result<Option<ResolvedRole>, RoleError> {
        debug!("Fetching roles of guild {}", guild_id);
        let roles = guild_id.roles(&self.http).await?;
        Ok(roles.get(&role_id).map(|role| ResolvedRole {
            id: role.id,
            name: role.name.clone(),
        }))
    }

    async fn add_member_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<(), RoleError> {
        self.http
            .add_member_role(guild_id, user_id, role_id, Some("Requested with add_role"))
            .await?;
        Ok(())
    }

    async fn remove_member_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<(), RoleError> {
        self.http
            .remove_member_role(guild_id, user_id, role_id, Some("Requested with remove_role"))
            .await?;
        Ok(())
    }
}
