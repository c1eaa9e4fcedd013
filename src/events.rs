//! Framework hooks: logging every invocation and answering the errors poise hands back.

use poise::FrameworkError;
use tracing::{error, info, warn};

use crate::commands::replies;
use crate::{Context, Data, Error};

/// Logs each command before it runs.
pub async fn pre_command(ctx: Context<'_>) {
    info!(
        command = %ctx.command().name,
        user = %ctx.author().name,
        guild = ?ctx.guild_id(),
        "Running command"
    );
}

/// Reply to a prefixed message naming no known command. A message holding nothing but
/// the prefix gets no reply.
pub fn unknown_command_reply(prefix: &str, msg_content: &str) -> Option<String> {
    if msg_content.trim().is_empty() {
        return None;
    }
    Some(replies::invalid_command(prefix))
}

/// Error hook registered with the poise framework.
pub async fn on_error(error: FrameworkError<'_, Data, Error>) {
    match error {
        FrameworkError::UnknownCommand {
            ctx,
            msg,
            prefix,
            msg_content,
            ..
        } => {
            let Some(reply) = unknown_command_reply(prefix, msg_content) else {
                return;
            };
            warn!(user = %msg.author.name, content = %msg_content, "Unknown command");
            if let Err(e) = msg.channel_id.say(&ctx.http, reply).await {
                error!("Unable to send reply to {}: {}", msg.author.name, e);
            }
        }
        FrameworkError::Command { error, ctx, .. } => {
            error!(command = %ctx.command().name, "Command failed: {}", error);
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}
