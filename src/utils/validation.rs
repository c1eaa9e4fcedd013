//! Turns user-typed account source and server names into their catalog spelling.

use thiserror::Error;

use crate::utils::catalog::SourceCatalog;

/// Why an account source / server pair was rejected. The messages are shown to users as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Account source \"{0}\" not found.")]
    SourceNotFound(String),

    #[error("{0} accounts do not have servers.")]
    ServerNotApplicable(String),

    #[error("A server is required for {0} accounts.")]
    ServerRequired(String),

    #[error("\"{server}\" is not a valid server for {source_name}. Valid servers: {}.", .valid_servers.join(", "))]
    InvalidServer {
        server: String,
        source_name: String,
        valid_servers: Vec<String>,
    },
}

/// A source and server spelled the way the catalog spells them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSource {
    pub source: String,
    pub server: Option<String>,
}

/// Resolves `input_source` and checks `input_server` against it.
///
/// Sources without servers reject any server. Sources with servers require one unless
/// `allow_empty_server` is set.
pub fn validate(
    catalog: &SourceCatalog,
    input_source: &str,
    input_server: Option<&str>,
    allow_empty_server: bool,
) -> Result<ValidatedSource, ValidationError> {
    let source = catalog
        .resolve(input_source)
        .ok_or_else(|| ValidationError::SourceNotFound(input_source.to_string()))?;

    let server = match input_server {
        Some(_) if !source.has_servers() => {
            return Err(ValidationError::ServerNotApplicable(source.name.clone()));
        }
        None if source.has_servers() && !allow_empty_server => {
            return Err(ValidationError::ServerRequired(source.name.clone()));
        }
        None => None,
        Some(input) => {
            let server =
                source
                    .find_server(input)
                    .ok_or_else(|| ValidationError::InvalidServer {
                        server: input.to_string(),
                        source_name: source.name.clone(),
                        valid_servers: source.servers.clone(),
                    })?;
            Some(server.to_string())
        }
    };

    Ok(ValidatedSource {
        source: source.name.clone(),
        server,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::catalog::test_catalog;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn validated(source: &str, server: Option<&str>) -> ValidatedSource {
        ValidatedSource {
            source: source.to_string(),
            server: server.map(str::to_string),
        }
    }

    #[rstest]
    #[case("al", Some("sandy"), false, validated("azurlane", Some("Sandy")))]
    #[case("AZURLANE", Some("IRIS"), true, validated("azurlane", Some("Iris")))]
    #[case("Fate", Some("na"), false, validated("fgo", Some("NA")))]
    #[case("osu", None, false, validated("osu", None))]
    #[case("OSU", None, true, validated("osu", None))]
    fn test_valid_inputs(
        #[case] source: &str,
        #[case] server: Option<&str>,
        #[case] allow_empty_server: bool,
        #[case] expected: ValidatedSource,
    ) {
        let catalog = test_catalog();
        assert_eq!(
            validate(&catalog.sources, source, server, allow_empty_server),
            Ok(expected)
        );
    }

    #[test]
    fn test_unknown_source() {
        let catalog = test_catalog();
        assert_eq!(
            validate(&catalog.sources, "Genshin", Some("asia"), true),
            Err(ValidationError::SourceNotFound("Genshin".into()))
        );
    }

    #[rstest]
    fn test_server_required_unless_allowed(#[values("azurlane", "al", "fgo", "FATE")] source: &str) {
        let catalog = test_catalog();
        assert!(matches!(
            validate(&catalog.sources, source, None, false),
            Err(ValidationError::ServerRequired(_))
        ));

        let allowed = validate(&catalog.sources, source, None, true).unwrap();
        assert_eq!(allowed.server, None);
    }

    #[rstest]
    fn test_server_never_applicable_without_servers(
        #[values("sandy", "NA", "", "anything")] server: &str,
        #[values(true, false)] allow_empty_server: bool,
    ) {
        let catalog = test_catalog();
        assert_eq!(
            validate(&catalog.sources, "osu", Some(server), allow_empty_server),
            Err(ValidationError::ServerNotApplicable("osu".into()))
        );
    }

    #[test]
    fn test_invalid_server_lists_valid_ones() {
        let catalog = test_catalog();
        let error = validate(&catalog.sources, "al", Some("avrora"), false).unwrap_err();
        assert_eq!(
            error,
            ValidationError::InvalidServer {
                server: "avrora".into(),
                source_name: "azurlane".into(),
                valid_servers: vec!["Sandy".into(), "Iris".into()],
            }
        );
        assert_eq!(
            error.to_string(),
            "\"avrora\" is not a valid server for azurlane. Valid servers: Sandy, Iris."
        );
    }
}
