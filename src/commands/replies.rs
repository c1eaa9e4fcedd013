//! Every fixed text the bot answers with.

use crate::utils::validation::ValidationError;

pub const UNKNOWN_ERROR: &str = "An unknown error occurred, please contact an administrator.";
pub const ALREADY_REGISTERED: &str = "This account is already registered.";
pub const PERMISSION_DENIED: &str =
    "I don't have the permissions to manage this role, please contact an administrator.";
pub const SERVER_ONLY: &str = "This command can only be used in a server.";
pub const INVALID_ARGUMENT: &str =
    "Invalid argument: expected whole numbers, and a single bound must be greater than 0.";
pub const NO_OWN_ACCOUNTS: &str = "You have no registered accounts.";

pub fn invalid_command(prefix: &str) -> String {
    format!("Invalid command. Use `{prefix}help` to see the list of commands.")
}

pub fn wrong_argument_count(usage: &str) -> String {
    format!("Invalid number of arguments.\n{usage}")
}

/// User-facing text for a rejected source / server pair.
pub fn validation_failure(error: &ValidationError, prefix: &str, command: &str) -> String {
    match error {
        ValidationError::SourceNotFound(_) => format!(
            "{error} Use `{prefix}{command} help` to see the available account sources."
        ),
        ValidationError::ServerNotApplicable(_)
        | ValidationError::ServerRequired(_)
        | ValidationError::InvalidServer { .. } => error.to_string(),
    }
}

pub fn removed_count(count: usize) -> String {
    match count {
        1 => "Removed 1 account.".to_string(),
        n => format!("Removed {n} accounts."),
    }
}

pub fn role_not_found(input: &str, catalog: &str) -> String {
    format!("Role \"{input}\" not found.\n{catalog}")
}

pub fn role_unavailable(title: &str) -> String {
    format!("The role {title} is not available on this server.")
}

pub fn role_added(title: &str) -> String {
    format!("You now have the role {title}.")
}

pub fn role_removed(title: &str) -> String {
    format!("You no longer have the role {title}.")
}
