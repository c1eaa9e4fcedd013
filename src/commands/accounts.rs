use serenity::all::UserId;
use tracing::{error, info};

use super::{CatalogHelp, chunk_response, replies};
use crate::{CommandResult, Context, Data};
use crate::utils::database::{NewAccount, StoreError, UserAccount};
use crate::utils::validation::{ValidatedSource, validate};

/// Splits `<source> [server] <name>` arguments.
fn source_server_name(args: &[String]) -> Option<(&str, Option<&str>, &str)> {
    match args {
        [source, name] => Some((source.as_str(), None, name.as_str())),
        [source, server, name] => Some((source.as_str(), Some(server.as_str()), name.as_str())),
        _ => None,
    }
}

/// Splits `<source> [server]` arguments.
fn source_server(args: &[String]) -> Option<(&str, Option<&str>)> {
    match args {
        [source] => Some((source.as_str(), None)),
        [source, server] => Some((source.as_str(), Some(server.as_str()))),
        _ => None,
    }
}

fn server_suffix(server: Option<&str>) -> String {
    server
        .map(|server| format!(" (server: {server})"))
        .unwrap_or_default()
}

/// `azurlane (server: Sandy): myname`, as shown to the account's owner.
pub fn render_own_account(account: &UserAccount) -> String {
    let mut line = format!(
        "{}{}: {}",
        account.source,
        server_suffix(account.server.as_deref()),
        account.name
    );
    if let Some(comment) = &account.comment {
        line.push_str(&format!(" - {comment}"));
    }
    line
}

/// `<@123> (server: Sandy): myname`, as shown in a source listing.
pub fn render_listed_account(account: &UserAccount) -> String {
    let mut line = format!(
        "<@{}>{}: {}",
        account.owner_user_id,
        server_suffix(account.server.as_deref()),
        account.name
    );
    if let Some(comment) = &account.comment {
        line.push_str(&format!(" - {comment}"));
    }
    line
}

/// Validates the source and server, turning a rejection into its reply.
fn validated(
    data: &Data,
    command: &str,
    source: &str,
    server: Option<&str>,
    allow_empty_server: bool,
) -> Result<ValidatedSource, String> {
    validate(&data.catalog().sources, source, server, allow_empty_server)
        .map_err(|e| replies::validation_failure(&e, data.prefix(), command))
}

fn unknown_error(command: &str, args: &[String], e: &StoreError) -> String {
    error!(command, ?args, "Account store failure: {}", e);
    replies::UNKNOWN_ERROR.to_string()
}

fn wrong_count(data: &Data, command: &str) -> String {
    replies::wrong_argument_count(&data.usage(command, CatalogHelp::Sources))
}

/// Register one of your game or website accounts.
#[poise::command(prefix_command, category = "Accounts")]
pub async fn register_account(ctx: Context<'_>, args: Vec<String>) -> CommandResult {
    chunk_response(ctx, register(ctx.data(), ctx.author().id, &args)).await
}

/// List the accounts you registered.
#[poise::command(prefix_command, category = "Accounts")]
pub async fn list_self_accounts(ctx: Context<'_>, args: Vec<String>) -> CommandResult {
    chunk_response(ctx, list_own(ctx.data(), ctx.author().id, &args)).await
}

/// List everyone's accounts for an account source.
#[poise::command(prefix_command, category = "Accounts")]
pub async fn list_accounts(ctx: Context<'_>, args: Vec<String>) -> CommandResult {
    chunk_response(ctx, list_for_source(ctx.data(), &args)).await
}

/// Remove all your accounts for an account source.
#[poise::command(prefix_command, category = "Accounts")]
pub async fn remove_all_accounts(ctx: Context<'_>, args: Vec<String>) -> CommandResult {
    chunk_response(ctx, remove_all(ctx.data(), ctx.author().id, &args)).await
}

/// Remove one of your registered accounts.
#[poise::command(prefix_command, category = "Accounts")]
pub async fn remove_account(ctx: Context<'_>, args: Vec<String>) -> CommandResult {
    chunk_response(ctx, remove_one(ctx.data(), ctx.author().id, &args)).await
}

/// Stores `<source> [server] <name>` for `owner`.
pub fn register(data: &Data, owner: UserId, args: &[String]) -> String {
    const COMMAND: &str = "register_account";
    if let Some(reply) = data.usage_reply(COMMAND, args, 2..=3, CatalogHelp::Sources) {
        return reply;
    }
    let Some((source, server, name)) = source_server_name(args) else {
        return wrong_count(data, COMMAND);
    };

    let target = match validated(data, COMMAND, source, server, false) {
        Ok(target) => target,
        Err(reply) => return reply,
    };

    let account = NewAccount {
        owner_user_id: owner.to_string(),
        source: target.source,
        server: target.server,
        name: name.to_string(),
        comment: None,
    };

    match data.store().insert_account(&account) {
        Ok(account) => {
            info!(owner = %owner, source = %account.source, "Account registered");
            format!("Successfully registered {}.", render_own_account(&account))
        }
        Err(StoreError::Duplicate) => replies::ALREADY_REGISTERED.to_string(),
        Err(e) => unknown_error(COMMAND, args, &e),
    }
}

pub fn list_own(data: &Data, owner: UserId, args: &[String]) -> String {
    const COMMAND: &str = "list_self_accounts";
    if let Some(reply) = data.usage_reply(COMMAND, args, 0..=0, CatalogHelp::Sources) {
        return reply;
    }

    match data.store().accounts_by_owner(&owner.to_string()) {
        Ok(accounts) if accounts.is_empty() => replies::NO_OWN_ACCOUNTS.to_string(),
        Ok(accounts) => {
            let mut reply = String::from("Your registered accounts:");
            for account in &accounts {
                reply.push('\n');
                reply.push_str(&render_own_account(account));
            }
            reply
        }
        Err(e) => unknown_error(COMMAND, args, &e),
    }
}

/// Everyone's accounts for `<source> [server]`; without a server, every server is listed.
pub fn list_for_source(data: &Data, args: &[String]) -> String {
    const COMMAND: &str = "list_accounts";
    if let Some(reply) = data.usage_reply(COMMAND, args, 1..=2, CatalogHelp::Sources) {
        return reply;
    }
    let Some((source, server)) = source_server(args) else {
        return wrong_count(data, COMMAND);
    };

    let target = match validated(data, COMMAND, source, server, true) {
        Ok(target) => target,
        Err(reply) => return reply,
    };
    let scope = format!(
        "{}{}",
        target.source,
        server_suffix(target.server.as_deref())
    );

    match data
        .store()
        .accounts_by_source(&target.source, target.server.as_deref())
    {
        Ok(accounts) if accounts.is_empty() => format!("No accounts registered for {scope}."),
        Ok(accounts) => {
            let mut reply = format!("Accounts registered for {scope}:");
            for account in &accounts {
                reply.push('\n');
                reply.push_str(&render_listed_account(account));
            }
            reply
        }
        Err(e) => unknown_error(COMMAND, args, &e),
    }
}

pub fn remove_all(data: &Data, owner: UserId, args: &[String]) -> String {
    const COMMAND: &str = "remove_all_accounts";
    if let Some(reply) = data.usage_reply(COMMAND, args, 1..=2, CatalogHelp::Sources) {
        return reply;
    }
    let Some((source, server)) = source_server(args) else {
        return wrong_count(data, COMMAND);
    };

    let target = match validated(data, COMMAND, source, server, true) {
        Ok(target) => target,
        Err(reply) => return reply,
    };

    match data.store().remove_accounts(
        &owner.to_string(),
        &target.source,
        target.server.as_deref(),
    ) {
        Ok(removed) => replies::removed_count(removed),
        Err(e) => unknown_error(COMMAND, args, &e),
    }
}

/// Removes one named registration. Without a server only serverless records match.
pub fn remove_one(data: &Data, owner: UserId, args: &[String]) -> String {
    const COMMAND: &str = "remove_account";
    if let Some(reply) = data.usage_reply(COMMAND, args, 2..=3, CatalogHelp::Sources) {
        return reply;
    }
    let Some((source, server, name)) = source_server_name(args) else {
        return wrong_count(data, COMMAND);
    };

    let target = match validated(data, COMMAND, source, server, false) {
        Ok(target) => target,
        Err(reply) => return reply,
    };

    match data.store().remove_account(
        &owner.to_string(),
        &target.source,
        target.server.as_deref(),
        name,
    ) {
        Ok(removed) => replies::removed_count(removed),
        Err(e) => unknown_error(COMMAND, args, &e),
    }
}
