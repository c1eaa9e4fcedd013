//! Test fixtures for the HaruhiChan Discord bot
//! This module contains sample data and configurations used in tests

/// Owner used by the end-to-end scenarios
pub const OWNER_ID: u64 = 123;

/// Another member registering accounts
pub const OTHER_ID: u64 = 456;

/// Guild every fixture member belongs to
pub const GUILD_ID: u64 = 987654321;

/// Role id of the `weeb` fixture role
pub const WEEB_ROLE_ID: u64 = 111111111111111111;
