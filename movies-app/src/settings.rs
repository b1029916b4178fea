//! Typed configuration sections read from `application.yaml`.

use movies_core::{ConfigError, ConfigSection, MoviesConfig};

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl ConfigSection for ServerConfig {
    fn prefix() -> &'static str {
        "server"
    }

    fn from_config(config: &MoviesConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            host: config.get_or(&Self::key("host"), "0.0.0.0".to_string()),
            port: config.get_or(&Self::key("port"), 3000),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    pub url: String,
    pub connections: u32,
}

impl DatabaseConfig {
    /// A private in-memory database, used by tests.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            connections: 1,
        }
    }
}

impl ConfigSection for DatabaseConfig {
    fn prefix() -> &'static str {
        "database"
    }

    fn from_config(config: &MoviesConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            url: config.get(&Self::key("url"))?,
            connections: config.get_or(&Self::key("connections"), 5),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_read_their_prefix() {
        let config = MoviesConfig::from_yaml_str(
            "server:\n  port: 8080\ndatabase:\n  url: \"sqlite://catalog.db\"\n",
            "test",
        )
        .unwrap();

        let server: ServerConfig = config.section().unwrap();
        assert_eq!(server.addr(), "0.0.0.0:8080");

        let database: DatabaseConfig = config.section().unwrap();
        assert_eq!(database.url, "sqlite://catalog.db");
        assert_eq!(database.connections, 5);
    }

    #[test]
    fn database_url_is_required() {
        let err = MoviesConfig::empty()
            .section::<DatabaseConfig>()
            .unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(key) if key == "database.url"));
    }
}
