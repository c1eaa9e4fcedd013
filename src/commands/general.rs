use super::{CatalogHelp, USAGES, chunk_response, replies};
use crate::{CommandResult, Context, Data};

/// List every command with its usage.
#[poise::command(prefix_command, category = "General", discard_spare_arguments)]
pub async fn help(ctx: Context<'_>) -> CommandResult {
    chunk_response(ctx, help_text(ctx.data())).await
}

/// Draw a random number.
#[poise::command(prefix_command, category = "General")]
pub async fn random(ctx: Context<'_>, args: Vec<String>) -> CommandResult {
    chunk_response(ctx, random_reply(ctx.data(), &args)).await
}

/// Flip a coin.
#[poise::command(prefix_command, category = "General", discard_spare_arguments)]
pub async fn coinflip(ctx: Context<'_>) -> CommandResult {
    chunk_response(ctx, coin_side()).await
}

pub fn help_text(data: &Data) -> String {
    let prefix = data.prefix();
    let mut reply = format!("Commands (prefix `{prefix}`):");
    for command in USAGES {
        reply.push_str(&format!(
            "\n{} - {}",
            command.usage_line(prefix),
            command.description
        ));
    }
    reply.push_str(&format!(
        "\nMost commands show more details with `{prefix}<command> help`."
    ));
    reply
}

pub fn random_reply(data: &Data, args: &[String]) -> String {
    if let Some(reply) = data.usage_reply("random", args, 0..=2, CatalogHelp::Nothing) {
        return reply;
    }

    match roll(args) {
        Some(value) => value.to_string(),
        None => replies::INVALID_ARGUMENT.to_string(),
    }
}

pub fn coin_side() -> &'static str {
    if rand::random::<bool>() { "Heads" } else { "Tails" }
}

/// Draws a number: 0 or 1 without bounds, within `[0, n]` for one bound `n > 0`, and
/// within the inclusive range spanned by two bounds given in any order.
fn roll(args: &[String]) -> Option<i64> {
    match args {
        [] => Some(rand::random_range(0..=1)),
        [bound] => {
            let bound: i64 = bound.parse().ok()?;
            (bound > 0).then(|| rand::random_range(0..=bound))
        }
        [first, second] => {
            let first: i64 = first.parse().ok()?;
            let second: i64 = second.parse().ok()?;
            Some(rand::random_range(first.min(second)..=first.max(second)))
        }
        _ => None,
    }
}
