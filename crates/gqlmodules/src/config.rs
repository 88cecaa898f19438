//! Schema configuration.
//!
//! Limits and switches applied when the assembled schema is handed to the
//! GraphQL engine. Configuration is read from TOML, either as top-level keys
//! or from a `[graphql]` section of a larger file. Unknown keys are rejected.
//!
//! # Example Configuration
//!
//! ```toml
//! [graphql]
//! max_depth = 15
//! max_complexity = 500
//! introspection = true
//! ```

use serde::{Deserialize, Serialize};

use crate::error::DeclarationError;

/// Section holding the configuration inside a larger TOML file.
pub const CONFIG_SECTION: &str = "graphql";

/// Execution limits for an assembled schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaConfig {
    /// Maximum query depth allowed.
    /// Default: 15
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Maximum query complexity allowed.
    /// Default: 500
    #[serde(default = "default_max_complexity")]
    pub max_complexity: usize,

    /// Enable GraphQL introspection queries.
    /// Default: true
    #[serde(default = "default_introspection")]
    pub introspection: bool,
}

fn default_max_depth() -> usize {
    15
}

fn default_max_complexity() -> usize {
    500
}

fn default_introspection() -> bool {
    true
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            max_complexity: default_max_complexity(),
            introspection: default_introspection(),
        }
    }
}

impl SchemaConfig {
    /// Parses a configuration from a TOML document.
    ///
    /// Settings are read from the `[graphql]` section when the document has
    /// one; other sections are left to their owners. Without that section
    /// the whole document must consist of configuration keys.
    ///
    /// # Errors
    ///
    /// Returns [`DeclarationError::Config`] if the document does not parse,
    /// contains unknown keys, or the resulting values are invalid.
    pub fn from_toml_str(source: &str) -> Result<Self, DeclarationError> {
        let mut document: toml::Table =
            toml::from_str(source).map_err(|e| DeclarationError::Config(e.to_string()))?;
        let section = document
            .remove(CONFIG_SECTION)
            .unwrap_or(toml::Value::Table(document));

        let config: Self = section
            .try_into()
            .map_err(|e: toml::de::Error| DeclarationError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration values are invalid.
    pub fn validate(&self) -> Result<(), DeclarationError> {
        if self.max_depth == 0 {
            return Err(DeclarationError::Config("max_depth must be > 0".into()));
        }
        if self.max_complexity == 0 {
            return Err(DeclarationError::Config("max_complexity must be > 0".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_default_config() {
        let config = SchemaConfig::default();
        assert_eq!(config.max_depth, 15);
        assert_eq!(config.max_complexity, 500);
        assert!(config.introspection);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_max_depth() {
        let config = SchemaConfig {
            max_depth: 0,
            ..SchemaConfig::default()
        };
        assert_eq!(config.validate().unwrap_err().kind(), ErrorKind::Config);
    }

    #[test]
    fn test_invalid_max_complexity() {
        let config = SchemaConfig {
            max_complexity: 0,
            ..SchemaConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_deserialize_from_toml() {
        let config = SchemaConfig::from_toml_str(
            r#"
            max_depth = 20
            introspection = false
        "#,
        )
        .unwrap();

        assert_eq!(config.max_depth, 20);
        assert_eq!(config.max_complexity, 500);
        assert!(!config.introspection);
    }

    #[test]
    fn test_reads_graphql_section() {
        let config = SchemaConfig::from_toml_str(
            r#"
            [server]
            port = 8080

            [graphql]
            max_depth = 3
            max_complexity = 500
            introspection = false
        "#,
        )
        .unwrap();

        assert_eq!(config.max_depth, 3);
        assert_eq!(config.max_complexity, 500);
        assert!(!config.introspection);
    }

    #[test]
    fn test_rejects_unknown_keys() {
        let err = SchemaConfig::from_toml_str("introspection_enabled = false").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);

        let err = SchemaConfig::from_toml_str("[server]\nport = 8080").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);

        let err = SchemaConfig::from_toml_str("[graphql]\nintrospection = false\nplayground = true")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = SchemaConfig::from_toml_str("max_depth = \"deep\"").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }
}
