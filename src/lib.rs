//! HaruhiChan, a small Discord bot for otaku servers: prefix commands to register game and
//! website accounts, list them, and hand out self-service roles.

pub mod commands;
pub mod events;
pub mod utils;

use dashmap::DashMap;
use std::sync::Arc;

use utils::catalog::Catalog;
use utils::database::AccountStore;
use utils::roles::{ResolvedRole, RoleGateway};

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;
pub type CommandResult = Result<(), Error>;

/// User data, shared by every command invocation.
pub struct Data {
    prefix: String,
    catalog: Arc<Catalog>,
    store: Arc<dyn AccountStore>,
    roles: Arc<dyn RoleGateway>,
    /// Catalog role key -> role found in the guild, filled on first use.
    resolved_roles: DashMap<String, ResolvedRole>,
}

impl Data {
    pub fn new(
        prefix: impl Into<String>,
        catalog: Arc<Catalog>,
        store: Arc<dyn AccountStore>,
        roles: Arc<dyn RoleGateway>,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            catalog,
            store,
            roles,
            resolved_roles: DashMap::new(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &dyn AccountStore {
        self.store.as_ref()
    }

    pub fn roles(&self) -> &dyn RoleGateway {
        self.roles.as_ref()
    }

    pub fn resolved_roles(&self) -> &DashMap<String, ResolvedRole> {
        &self.resolved_roles
    }
}
