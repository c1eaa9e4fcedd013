use serenity::all::{GuildId, UserId};
use tracing::{debug, error, warn};

use super::{CatalogHelp, chunk_response, replies};
use crate::{CommandResult, Context, Data};
use crate::utils::catalog::Role;
use crate::utils::roles::{ResolvedRole, RoleError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleChange {
    Add,
    Remove,
}

impl RoleChange {
    fn command(self) -> &'static str {
        match self {
            RoleChange::Add => "add_role",
            RoleChange::Remove => "remove_role",
        }
    }
}

/// Give yourself a role from the role catalog.
#[poise::command(prefix_command, category = "Roles")]
pub async fn add_role(ctx: Context<'_>, args: Vec<String>) -> CommandResult {
    let reply =
        change_role(ctx.data(), ctx.guild_id(), ctx.author().id, &args, RoleChange::Add).await;
    chunk_response(ctx, reply).await
}

/// Take a role from the role catalog away from yourself.
#[poise::command(prefix_command, category = "Roles")]
pub async fn remove_role(ctx: Context<'_>, args: Vec<String>) -> CommandResult {
    let reply =
        change_role(ctx.data(), ctx.guild_id(), ctx.author().id, &args, RoleChange::Remove).await;
    chunk_response(ctx, reply).await
}

/// Finds the guild role for a catalog role, asking Discord only the first time.
async fn resolve_role(
    data: &Data,
    guild_id: GuildId,
    role: &Role,
) -> Result<Option<ResolvedRole>, RoleError> {
    let cached = data
        .resolved_roles()
        .get(&role.key)
        .map(|entry| entry.value().clone());
    if cached.is_some() {
        return Ok(cached);
    }

    let resolved = data.roles().find_role(guild_id, role.id).await?;
    if let Some(resolved) = &resolved {
        debug!(role = %role.key, name = %resolved.name, "Caching resolved role");
        data.resolved_roles()
            .insert(role.key.clone(), resolved.clone());
    }
    Ok(resolved)
}

fn role_failure(command: &str, args: &[String], e: RoleError) -> String {
    match e {
        RoleError::PermissionDenied => {
            warn!(command, ?args, "Discord denied a role change");
            replies::PERMISSION_DENIED.to_string()
        }
        RoleError::Platform(e) => {
            error!(command, ?args, "Role change failed: {}", e);
            replies::UNKNOWN_ERROR.to_string()
        }
    }
}

/// Gives `user` the catalog role named in `args`, or takes it away. Outside a guild
/// (`guild_id` is `None`) nothing is changed.
pub async fn change_role(
    data: &Data,
    guild_id: Option<GuildId>,
    user: UserId,
    args: &[String],
    change: RoleChange,
) -> String {
    let command = change.command();
    if let Some(reply) = data.usage_reply(command, args, 1..=1, CatalogHelp::Roles) {
        return reply;
    }

    let Some(guild_id) = guild_id else {
        return replies::SERVER_ONLY.to_string();
    };

    let roles = &data.catalog().roles;
    let Some(role) = roles.get(&args[0]) else {
        return replies::role_not_found(&args[0], &roles.render());
    };

    let resolved = match resolve_role(data, guild_id, role).await {
        Ok(Some(resolved)) => resolved,
        Ok(None) => {
            warn!(role = %role.key, guild = %guild_id, "Catalog role missing from guild");
            return replies::role_unavailable(&role.title);
        }
        Err(e) => return role_failure(command, args, e),
    };

    let gateway = data.roles();
    let result = match change {
        RoleChange::Add => gateway.add_member_role(guild_id, user, resolved.id).await,
        RoleChange::Remove => {
            gateway
                .remove_member_role(guild_id, user, resolved.id)
                .await
        }
    };

    match (result, change) {
        (Ok(()), RoleChange::Add) => replies::role_added(&role.title),
        (Ok(()), RoleChange::Remove) => replies::role_removed(&role.title),
        (Err(e), _) => role_failure(command, args, e),
    }
}
