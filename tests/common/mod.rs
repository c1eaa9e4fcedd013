//! Common test utilities, fixtures, and mocks
//! This module contains shared functionality used across different test categories

pub mod fixtures;
pub mod mocks;

use haruhichan::Data;
use haruhichan::utils::catalog::Catalog;
use haruhichan::utils::database::SqliteAccountStore;
use serenity::all::{GuildId, UserId};
use std::path::PathBuf;
use std::sync::Arc;

use mocks::MockRoles;

/// Get the path to test fixtures directory
pub fn fixtures_path() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("common");
    path.push("fixtures");
    path
}

/// Catalog loaded from the fixture settings file.
pub fn fixture_catalog() -> Catalog {
    Catalog::load(&fixtures_path().join("commands_settings.json"))
        .expect("Failed to load fixture settings")
}

/// Bot data over an in-memory store, also returned so tests can inspect it.
pub fn test_data(roles: MockRoles) -> (Data, Arc<SqliteAccountStore>) {
    let store = Arc::new(
        SqliteAccountStore::open_in_memory().expect("Failed to open in-memory database"),
    );
    let data = Data::new(
        "!",
        Arc::new(fixture_catalog()),
        store.clone(),
        Arc::new(roles),
    );
    (data, store)
}

/// Splits command arguments the way a prefix command receives them.
pub fn args(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}

pub fn user(id: u64) -> UserId {
    UserId::new(id)
}

pub fn guild() -> Option<GuildId> {
    Some(GuildId::new(fixtures::GUILD_ID))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_path() {
        let path = fixtures_path();
        assert!(path.ends_with("tests/common/fixtures"));
        assert!(path.join("commands_settings.json").exists());
    }
}
