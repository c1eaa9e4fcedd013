//! This module aggregates the building blocks the commands are made of.

/// Account source and role catalogs loaded from the commands settings.
pub mod catalog;
/// Process configuration file and environment overrides.
pub mod config;
/// Account registrations stored in SQLite.
pub mod database;
/// Discord role membership operations.
pub mod roles;
/// Validation of user-supplied account sources and servers.
pub mod validation;
