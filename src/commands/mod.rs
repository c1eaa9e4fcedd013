//! Prefix commands.
//!
//! Every command is a poise `prefix_command` wrapping a plain handler that takes the shared
//! [`Data`] and returns the reply text, so the handlers run without a Discord connection.

/// Account registration commands.
pub mod accounts;
/// `help`, `random` and `coinflip`.
pub mod general;
/// Fixed reply texts.
pub mod replies;
/// Self-service role commands.
pub mod roles;

use std::ops::RangeInclusive;

use crate::utils::catalog::fold;
use crate::{CommandResult, Context, Data, Error, events};

/// The maximum character length allowed for a single Discord message.
pub const MAX_MESSAGE_LENGTH: usize = 2000;

/// Synopsis of a command, shown by `help` and by `<command> help`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandUsage {
    pub name: &'static str,
    /// Argument synopsis, empty for commands without arguments.
    pub usage: &'static str,
    pub description: &'static str,
}

impl CommandUsage {
    pub fn usage_line(&self, prefix: &str) -> String {
        if self.usage.is_empty() {
            format!("`{prefix}{}`", self.name)
        } else {
            format!("`{prefix}{} {}`", self.name, self.usage)
        }
    }
}

/// Usage of every command, in the order `help` lists them.
pub const USAGES: &[CommandUsage] = &[
    CommandUsage {
        name: "help",
        usage: "",
        description: "Show this message.",
    },
    CommandUsage {
        name: "random",
        usage: "[n] [n1 n2]",
        description: "Random number: 0 or 1, between 0 and n, or between n1 and n2.",
    },
    CommandUsage {
        name: "coinflip",
        usage: "",
        description: "Flip a coin.",
    },
    CommandUsage {
        name: "register_account",
        usage: "<source> [server] <name>",
        description: "Register one of your game or website accounts.",
    },
    CommandUsage {
        name: "list_self_accounts",
        usage: "",
        description: "List your registered accounts.",
    },
    CommandUsage {
        name: "list_accounts",
        usage: "<source> [server]",
        description: "List everyone's accounts for a game or website.",
    },
    CommandUsage {
        name: "remove_all_accounts",
        usage: "<source> [server]",
        description: "Remove all your accounts for a game or website.",
    },
    CommandUsage {
        name: "remove_account",
        usage: "<source> [server] <name>",
        description: "Remove one of your registered accounts.",
    },
    CommandUsage {
        name: "add_role",
        usage: "<role>",
        description: "Give yourself a role.",
    },
    CommandUsage {
        name: "remove_role",
        usage: "<role>",
        description: "Take a role away from yourself.",
    },
];

/// Looks a command's usage up by its exact name.
pub fn usage_of(name: &str) -> Option<&'static CommandUsage> {
    USAGES.iter().find(|usage| usage.name == name)
}

/// Every command the bot registers with the framework.
pub fn list() -> Vec<poise::Command<Data, Error>> {
    vec![
        general::help(),
        general::random(),
        general::coinflip(),
        accounts::register_account(),
        accounts::list_self_accounts(),
        accounts::list_accounts(),
        accounts::remove_all_accounts(),
        accounts::remove_account(),
        roles::add_role(),
        roles::remove_role(),
    ]
}

/// Framework options: the commands, the configured prefix and the error hook.
///
/// Command names match in any letter case. Messages from bots, including this one, never
/// run commands, and mentioning the bot is not a prefix.
pub fn framework_options(prefix: &str) -> poise::FrameworkOptions<Data, Error> {
    poise::FrameworkOptions {
        commands: list(),
        prefix_options: poise::PrefixFrameworkOptions {
            prefix: Some(prefix.to_string()),
            mention_as_prefix: false,
            execute_self_messages: false,
            ignore_bots: true,
            case_insensitive_commands: true,
            ..Default::default()
        },
        on_error: |error| Box::pin(events::on_error(error)),
        pre_command: |ctx| Box::pin(events::pre_command(ctx)),
        ..Default::default()
    }
}

/// Which catalog a command's help text ends with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CatalogHelp {
    Nothing,
    Sources,
    Roles,
}

impl Data {
    /// Usage text of a command followed by the catalog its arguments refer to.
    pub(crate) fn usage(&self, name: &str, catalog: CatalogHelp) -> String {
        let mut usage = match usage_of(name) {
            Some(command) => format!(
                "Usage: {}\n{}",
                command.usage_line(self.prefix()),
                command.description
            ),
            None => String::new(),
        };

        match catalog {
            CatalogHelp::Nothing => {}
            CatalogHelp::Sources => {
                usage.push_str("\n\n");
                usage.push_str(&self.catalog().sources.render());
            }
            CatalogHelp::Roles => {
                usage.push_str("\n\n");
                usage.push_str(&self.catalog().roles.render());
            }
        }
        usage
    }

    /// Answers a literal `help` argument with the usage text, and an argument count outside
    /// `expected` with an error plus the usage text. `None` means the handler can go on.
    pub(crate) fn usage_reply(
        &self,
        name: &str,
        args: &[String],
        expected: RangeInclusive<usize>,
        catalog: CatalogHelp,
    ) -> Option<String> {
        if let [only] = args {
            if fold(only) == "help" {
                return Some(self.usage(name, catalog));
            }
        }

        if !expected.contains(&args.len()) {
            return Some(replies::wrong_argument_count(&self.usage(name, catalog)));
        }

        None
    }
}

/// Sends a potentially long reply, split into chunks that respect Discord's message
/// length limit.
pub async fn chunk_response<S: AsRef<str>>(ctx: Context<'_>, response: S) -> CommandResult {
    for chunk in split_message(response.as_ref()) {
        ctx.say(chunk).await?;
    }
    Ok(())
}

/// Splits a reply on character boundaries into chunks of at most [`MAX_MESSAGE_LENGTH`]
/// characters.
pub fn split_message(message: &str) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut rest = message;
    while !rest.is_empty() {
        let end = rest
            .char_indices()
            .nth(MAX_MESSAGE_LENGTH)
            .map_or(rest.len(), |(position, _)| position);
        let (chunk, tail) = rest.split_at(end);
        chunks.push(chunk);
        rest = tail;
    }
    chunks
}
