//! End-to-end scenarios: command arguments in, replies out, against a real in-memory store.

use haruhichan::commands::general::{coin_side, help_text, random_reply};
use haruhichan::commands::roles::{RoleChange, change_role};
use haruhichan::commands::{accounts, framework_options, replies};
use haruhichan::events::unknown_command_reply;
use haruhichan::utils::catalog::Catalog;
use haruhichan::utils::config::Config;
use haruhichan::utils::roles::{ResolvedRole, RoleError};
use mockall::predicate::eq;
use pretty_assertions::assert_eq;
use serenity::all::{GuildId, RoleId, UserId};
use std::path::PathBuf;

use crate::common::fixtures::{GUILD_ID, OTHER_ID, OWNER_ID, WEEB_ROLE_ID};
use crate::common::mocks::MockRoles;
use crate::common::{args, fixture_catalog, fixtures_path, guild, test_data, user};
use crate::test_utils;

#[test]
fn test_register_list_and_remove_account() {
    test_utils::init();
    let (data, store) = test_data(MockRoles::new());
    let owner = user(OWNER_ID);

    assert_eq!(
        accounts::register(&data, owner, &args("al sandy myname")),
        "Successfully registered azurlane (server: sandy): myname."
    );
    let listing = accounts::list_own(&data, owner, &[]);
    assert!(listing.lines().any(|line| line == "azurlane (server: sandy): myname"));

    assert_eq!(
        accounts::register(&data, owner, &args("al sandy myname")),
        replies::ALREADY_REGISTERED
    );
    assert_eq!(store.count().unwrap(), 1);

    assert_eq!(
        accounts::remove_one(&data, owner, &args("azurlane sandy myname")),
        "Removed 1 account."
    );
    assert_eq!(accounts::list_own(&data, owner, &[]), replies::NO_OWN_ACCOUNTS);
    assert_eq!(
        accounts::remove_one(&data, owner, &args("azurlane sandy myname")),
        "Removed 0 accounts."
    );
}

#[test]
fn test_accounts_are_scoped_to_their_owner() {
    test_utils::init();
    let (data, store) = test_data(MockRoles::new());
    let owner = user(OWNER_ID);
    let other = user(OTHER_ID);

    accounts::register(&data, owner, &args("al iris haruhi"));
    accounts::register(&data, other, &args("AL IRIS yuki"));
    accounts::register(&data, other, &args("osu mikuru"));
    assert_eq!(store.count().unwrap(), 3);

    assert_eq!(
        accounts::list_for_source(&data, &args("azurlane")),
        "Accounts registered for azurlane:\n<@123> (server: iris): haruhi\n<@456> (server: iris): yuki"
    );

    assert_eq!(
        accounts::remove_all(&data, owner, &args("al")),
        "Removed 1 account."
    );
    assert_eq!(
        accounts::list_own(&data, other, &[]),
        "Your registered accounts:\nazurlane (server: iris): yuki\nosu: mikuru"
    );
}

#[test]
fn test_invalid_commands_and_arguments() {
    test_utils::init();
    let (data, store) = test_data(MockRoles::new());
    let owner = user(OWNER_ID);

    assert_eq!(
        unknown_command_reply("!", "sos_brigade"),
        Some(replies::invalid_command("!"))
    );
    assert_eq!(unknown_command_reply("!", ""), None);
    assert_eq!(
        accounts::register(&data, owner, &args("al avrora myname")),
        "\"avrora\" is not a valid server for azurlane. Valid servers: sandy, iris."
    );
    assert_eq!(random_reply(&data, &args("twelve")), replies::INVALID_ARGUMENT);
    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn test_general_commands() {
    let (data, _store) = test_data(MockRoles::new());
    assert!(help_text(&data).contains("`!register_account <source> [server] <name>`"));
    assert!(["Heads", "Tails"].contains(&coin_side()));
    assert_eq!(random_reply(&data, &args("-2 -2")), "-2");
}

#[test]
fn test_framework_registers_every_command() {
    let options = framework_options("!");
    let names: Vec<&str> = options
        .commands
        .iter()
        .map(|command| command.name.as_str())
        .collect();
    assert_eq!(
        names,
        [
            "help",
            "random",
            "coinflip",
            "register_account",
            "list_self_accounts",
            "list_accounts",
            "remove_all_accounts",
            "remove_account",
            "add_role",
            "remove_role",
        ]
    );
    assert!(options.prefix_options.ignore_bots);
    assert!(options.prefix_options.case_insensitive_commands);
}

#[tokio::test]
async fn test_add_role_through_gateway() {
    test_utils::init();
    let mut roles = MockRoles::new();
    roles
        .expect_find_role()
        .with(eq(GuildId::new(GUILD_ID)), eq(RoleId::new(WEEB_ROLE_ID)))
        .times(1)
        .returning(|_, id| {
            Ok(Some(ResolvedRole {
                id,
                name: "Weeb".to_string(),
            }))
        });
    roles
        .expect_add_member_role()
        .with(
            eq(GuildId::new(GUILD_ID)),
            eq(UserId::new(OWNER_ID)),
            eq(RoleId::new(WEEB_ROLE_ID)),
        )
        .times(1)
        .returning(|_, _, _| Ok(()));
    roles
        .expect_remove_member_role()
        .times(1)
        .returning(|_, _, _| Err(RoleError::PermissionDenied));
    let (data, _store) = test_data(roles);
    let owner = user(OWNER_ID);

    assert_eq!(
        change_role(&data, guild(), owner, &args("Weeb"), RoleChange::Add).await,
        replies::role_added("Weeb")
    );
    assert_eq!(
        change_role(&data, guild(), owner, &args("weeb"), RoleChange::Remove).await,
        replies::PERMISSION_DENIED
    );
    assert_eq!(
        change_role(&data, None, owner, &args("weeb"), RoleChange::Add).await,
        replies::SERVER_ONLY
    );
}

#[test]
fn test_fixture_files_load() {
    let config = Config::load(&fixtures_path().join("config.toml")).unwrap();
    assert_eq!(config.chat.command_prefix, "!");
    assert_eq!(config.database.path, PathBuf::from("fixture.db"));

    let catalog = Catalog::load(&config.commands.settings_file).unwrap();
    let fixture = fixture_catalog();
    assert_eq!(catalog.sources.render(), fixture.sources.render());
    assert_eq!(catalog.roles.render(), fixture.roles.render());
}
