//! In-memory catalogs of registrable account sources and assignable roles, loaded once from
//! the commands settings document. Both catalogs are immutable after loading.

use serde::Deserialize;
use serenity::all::RoleId;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

use crate::utils::config::{ConfigError, read_file};

/// A game or website users can register accounts for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSource {
    pub name: String,
    pub aliases: Vec<String>,
    /// Empty when the source is not split into servers.
    pub servers: Vec<String>,
}

impl AccountSource {
    pub fn has_servers(&self) -> bool {
        !self.servers.is_empty()
    }

    /// Returns the catalog spelling of `input` if it is one of this source's servers.
    pub fn find_server(&self, input: &str) -> Option<&str> {
        let input = fold(input);
        self.servers
            .iter()
            .find(|server| fold(server) == input)
            .map(String::as_str)
    }
}

/// Case folding shared by every catalog lookup and the `help` argument.
pub(crate) fn fold(text: &str) -> String {
    text.to_lowercase()
}

/// A role members can give to or take from themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub key: String,
    pub id: RoleId,
    pub title: String,
    pub description: String,
}

/// Sections are kept as JSON objects so entries stay in document order.
#[derive(Debug, Deserialize)]
struct RawSettings {
    account_sources: Map<String, Value>,
    roles: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct RawSource {
    #[serde(default)]
    aliases: Option<Vec<String>>,
    #[serde(default)]
    servers: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct RawRole {
    id: RoleId,
    title: String,
    description: String,
}

/// Account sources with case-insensitive lookup by canonical name or alias.
#[derive(Debug, Clone, Default)]
pub struct SourceCatalog {
    sources: Vec<AccountSource>,
    /// Lowercased canonical name or alias -> index in `sources`.
    lookup: HashMap<String, usize>,
}

impl SourceCatalog {
    /// Builds the catalog, rejecting any name, alias or server that could match ambiguously.
    pub fn new(sources: Vec<AccountSource>) -> Result<Self, ConfigError> {
        let mut lookup = HashMap::new();

        for (index, source) in sources.iter().enumerate() {
            if lookup.insert(fold(&source.name), index).is_some() {
                return Err(ConfigError::DuplicateSource(source.name.clone()));
            }
        }

        for (index, source) in sources.iter().enumerate() {
            for alias in &source.aliases {
                match lookup.get(&fold(alias)) {
                    Some(&other) if other == index => {}
                    Some(&other) => {
                        return Err(ConfigError::AliasCollision {
                            alias: alias.clone(),
                            source_name: source.name.clone(),
                            other: sources[other].name.clone(),
                        });
                    }
                    None => {
                        lookup.insert(fold(alias), index);
                    }
                }
            }

            let mut seen = Vec::with_capacity(source.servers.len());
            for server in &source.servers {
                let lowered = fold(server);
                if seen.contains(&lowered) {
                    return Err(ConfigError::DuplicateServer {
                        server: server.clone(),
                        source_name: source.name.clone(),
                    });
                }
                seen.push(lowered);
            }
        }

        Ok(Self { sources, lookup })
    }

    /// Finds a source by canonical name or alias, ignoring letter case.
    pub fn resolve(&self, input: &str) -> Option<&AccountSource> {
        self.lookup
            .get(&fold(input))
            .map(|&index| &self.sources[index])
    }

    pub fn iter(&self) -> impl Iterator<Item = &AccountSource> {
        self.sources.iter()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Renders the catalog for help replies.
    pub fn render(&self) -> String {
        let mut rendered = String::from("Available account sources:");
        for source in &self.sources {
            rendered.push_str("\n- ");
            rendered.push_str(&source.name);
            if !source.aliases.is_empty() {
                rendered.push_str(&format!(" (aliases: {})", source.aliases.join(", ")));
            }
            if source.has_servers() {
                rendered.push_str(&format!(" [servers: {}]", source.servers.join(", ")));
            }
        }
        rendered
    }
}

/// Assignable roles with case-insensitive lookup by key.
#[derive(Debug, Clone, Default)]
pub struct RoleCatalog {
    roles: Vec<Role>,
    /// Folded key -> index in `roles`.
    lookup: HashMap<String, usize>,
}

impl RoleCatalog {
    pub fn new(roles: Vec<Role>) -> Result<Self, ConfigError> {
        let mut lookup = HashMap::new();
        for (index, role) in roles.iter().enumerate() {
            if lookup.insert(fold(&role.key), index).is_some() {
                return Err(ConfigError::DuplicateRole(role.key.clone()));
            }
        }
        Ok(Self { roles, lookup })
    }

    pub fn get(&self, key: &str) -> Option<&Role> {
        self.lookup.get(&fold(key)).map(|&index| &self.roles[index])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Role> {
        self.roles.iter()
    }

    pub fn render(&self) -> String {
        let mut rendered = String::from("Available roles:");
        for role in &self.roles {
            rendered.push_str(&format!(
                "\n- {}: {} - {}",
                role.key, role.title, role.description
            ));
        }
        rendered
    }
}

/// Everything the commands settings document describes.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub sources: SourceCatalog,
    pub roles: RoleCatalog,
}

impl Catalog {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        info!("Loading commands settings from {}", path.display());
        let content = read_file(path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let raw: RawSettings = serde_json::from_str(content)?;

        let sources = raw
            .account_sources
            .into_iter()
            .map(|(name, value)| -> Result<AccountSource, serde_json::Error> {
                let source: RawSource = serde_json::from_value(value)?;
                Ok(AccountSource {
                    name,
                    aliases: source.aliases.unwrap_or_default(),
                    servers: source.servers.unwrap_or_default(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let roles = raw
            .roles
            .into_iter()
            .map(|(key, value)| -> Result<Role, serde_json::Error> {
                let role: RawRole = serde_json::from_value(value)?;
                Ok(Role {
                    key,
                    id: role.id,
                    title: role.title,
                    description: role.description,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let catalog = Self {
            sources: SourceCatalog::new(sources)?,
            roles: RoleCatalog::new(roles)?,
        };

        debug!(
            sources = catalog.sources.len(),
            roles = catalog.roles.iter().count(),
            "Commands settings loaded"
        );
        Ok(catalog)
    }
}

/// Settings document shared by the unit tests of every module.
#[cfg(test)]
pub(crate) const TEST_SETTINGS: &str = r#"{
    "account_sources": {
        "azurlane": { "aliases": ["al"], "servers": ["Sandy", "Iris"] },
        "osu": { "aliases": null, "servers": null },
        "fgo": { "aliases": ["fate", "FateGO"], "servers": ["NA", "JP"] }
    },
    "roles": {
        "weeb": { "id": "111111111111111111", "title": "Weeb", "description": "Anime enjoyer" },
        "gamer": { "id": 222222222222222222, "title": "Gamer", "description": "Plays games" }
    }
}"#;

#[cfg(test)]
pub(crate) fn test_catalog() -> Catalog {
    Catalog::from_json_str(TEST_SETTINGS).expect("test settings are valid")
}
