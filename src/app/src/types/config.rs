use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_valid::Validate;

use super::common::{SubmitError, DEFAULT_API_HOST};

/// Database file used by the local-file store when no path is given
pub const DEFAULT_DB_PATH: &str = "authenticator.db";

/// Database name used by networked stores when none is given
pub const DEFAULT_DATABASE: &str = "authenticator";

/// Kind of data store the backend should use
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DbKind {
    #[default]
    Sqlite,
    Mysql,
    Postgres,
}

impl DbKind {
    pub const ALL: [DbKind; 3] = [DbKind::Sqlite, DbKind::Mysql, DbKind::Postgres];

    /// Wire value of the `db_type` discriminant
    pub fn as_str(&self) -> &'static str {
        match self {
            DbKind::Sqlite => "sqlite",
            DbKind::Mysql => "mysql",
            DbKind::Postgres => "postgres",
        }
    }

    /// Human readable name for pickers
    pub fn label(&self) -> &'static str {
        match self {
            DbKind::Sqlite => "SQLite",
            DbKind::Mysql => "MySQL",
            DbKind::Postgres => "PostgreSQL",
        }
    }

    /// Whether the store is reached over the network (host, user, port, ...)
    pub fn is_networked(&self) -> bool {
        !matches!(self, DbKind::Sqlite)
    }
}

impl fmt::Display for DbKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DbKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        DbKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown database type '{s}' (expected sqlite, mysql or postgres)"))
    }
}

/// Default port for a database kind; `None` for the local-file store.
pub fn default_port(kind: DbKind) -> Option<u16> {
    match kind {
        DbKind::Sqlite => None,
        DbKind::Mysql => Some(3306),
        DbKind::Postgres => Some(5432),
    }
}

/// Connection parameters of a networked store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct NetworkedConfig {
    pub host: String,
    pub user: String,
    pub password: String,
    #[validate(minimum = 1)]
    pub port: u16,
    pub database: String,
}

/// Body of `POST /config`.
///
/// Serialized as a flat object whose `db_type` field holds the discriminant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "db_type", rename_all = "lowercase")]
pub enum ConnectionConfig {
    Sqlite { db_path: String },
    Mysql(NetworkedConfig),
    Postgres(NetworkedConfig),
}

impl ConnectionConfig {
    pub fn kind(&self) -> DbKind {
        match self {
            ConnectionConfig::Sqlite { .. } => DbKind::Sqlite,
            ConnectionConfig::Mysql(_) => DbKind::Mysql,
            ConnectionConfig::Postgres(_) => DbKind::Postgres,
        }
    }
}

/// Raw state of the configuration screen.
///
/// Fields hold exactly what the user typed; defaults are applied by
/// [`ConfigForm::to_payload`] at submission time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfigForm {
    pub api_host: String,
    pub db_kind: DbKind,
    pub db_path: String,
    pub host: String,
    pub user: String,
    pub password: String,
    pub port: String,
    pub database: String,
}

impl Default for ConfigForm {
    fn default() -> Self {
        Self {
            api_host: DEFAULT_API_HOST.to_string(),
            db_kind: DbKind::default(),
            db_path: DEFAULT_DB_PATH.to_string(),
            host: String::new(),
            user: String::new(),
            password: String::new(),
            port: String::new(),
            database: String::new(),
        }
    }
}

impl ConfigForm {
    /// Fresh form that keeps a previously entered API address
    pub fn with_api_host(api_host: impl Into<String>) -> Self {
        Self {
            api_host: api_host.into(),
            ..Default::default()
        }
    }

    /// Build the request body for the selected store kind.
    pub fn to_payload(&self) -> Result<ConnectionConfig, SubmitError> {
        if !self.db_kind.is_networked() {
            return Ok(ConnectionConfig::Sqlite {
                db_path: or_default(&self.db_path, DEFAULT_DB_PATH),
            });
        }

        let networked = NetworkedConfig {
            host: self.host.clone(),
            user: self.user.clone(),
            password: self.password.clone(),
            port: parse_port(&self.port, self.db_kind)?,
            database: or_default(&self.database, DEFAULT_DATABASE),
        };
        networked.validate().map_err(|_| invalid_port())?;

        Ok(match self.db_kind {
            DbKind::Mysql => ConnectionConfig::Mysql(networked),
            _ => ConnectionConfig::Postgres(networked),
        })
    }
}

/// Parse the port text field, falling back to the kind's default when blank.
///
/// Only the number format is checked here; the range is part of
/// [`NetworkedConfig`] validation.
pub fn parse_port(text: &str, kind: DbKind) -> Result<u16, SubmitError> {
    let text = text.trim();
    if text.is_empty() {
        return default_port(kind).ok_or_else(|| {
            SubmitError::Validation(format!("{} does not use a port", kind.label()))
        });
    }

    text.parse::<u16>().map_err(|_| invalid_port())
}

fn invalid_port() -> SubmitError {
    SubmitError::Validation("Port must be a number between 1 and 65535".to_string())
}

fn or_default(value: &str, default: &str) -> String {
    if value.trim().is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn networked_form(kind: DbKind) -> ConfigForm {
        ConfigForm {
            db_kind: kind,
            host: "db.local".to_string(),
            user: "admin".to_string(),
            password: "secret".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn default_port_depends_on_kind_only() {
        assert_eq!(default_port(DbKind::Mysql), Some(3306));
        assert_eq!(default_port(DbKind::Postgres), Some(5432));
        assert_eq!(default_port(DbKind::Sqlite), None);
    }

    #[test]
    fn blank_sqlite_path_falls_back_to_default() {
        for blank in ["", "   "] {
            let form = ConfigForm {
                db_path: blank.to_string(),
                ..Default::default()
            };

            let body = serde_json::to_value(form.to_payload().unwrap()).unwrap();

            assert_eq!(
                body,
                json!({ "db_type": "sqlite", "db_path": "authenticator.db" })
            );
        }
    }

    #[test]
    fn sqlite_payload_keeps_custom_path() {
        let form = ConfigForm {
            db_path: "/data/auth.db".to_string(),
            host: "ignored".to_string(),
            ..Default::default()
        };

        let body = serde_json::to_value(form.to_payload().unwrap()).unwrap();

        assert_eq!(body, json!({ "db_type": "sqlite", "db_path": "/data/auth.db" }));
    }

    #[test]
    fn blank_port_uses_default_of_selected_kind() {
        let mysql = serde_json::to_value(networked_form(DbKind::Mysql).to_payload().unwrap())
            .unwrap();
        let postgres =
            serde_json::to_value(networked_form(DbKind::Postgres).to_payload().unwrap()).unwrap();

        assert_eq!(mysql["db_type"], "mysql");
        assert_eq!(mysql["port"], 3306);
        assert_eq!(postgres["db_type"], "postgres");
        assert_eq!(postgres["port"], 5432);
    }

    #[test]
    fn networked_payload_is_flat_with_integer_port() {
        let form = ConfigForm {
            port: " 3307 ".to_string(),
            database: "auth".to_string(),
            ..networked_form(DbKind::Mysql)
        };

        let body = serde_json::to_value(form.to_payload().unwrap()).unwrap();

        assert_eq!(
            body,
            json!({
                "db_type": "mysql",
                "host": "db.local",
                "user": "admin",
                "password": "secret",
                "port": 3307,
                "database": "auth"
            })
        );
    }

    #[test]
    fn blank_database_falls_back_to_default() {
        let payload = networked_form(DbKind::Postgres).to_payload().unwrap();

        match payload {
            ConnectionConfig::Postgres(config) => assert_eq!(config.database, "authenticator"),
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn non_numeric_port_is_rejected() {
        for port in ["abc", "0", "70000", "-1"] {
            let form = ConfigForm {
                port: port.to_string(),
                ..networked_form(DbKind::Postgres)
            };

            assert!(matches!(
                form.to_payload(),
                Err(SubmitError::Validation(_))
            ));
        }
    }

    #[test]
    fn port_zero_fails_validation() {
        assert_eq!(parse_port("0", DbKind::Mysql), Ok(0));

        let config = NetworkedConfig {
            host: "db.local".to_string(),
            user: "admin".to_string(),
            password: "secret".to_string(),
            port: 0,
            database: DEFAULT_DATABASE.to_string(),
        };

        assert!(config.validate().is_err());
        assert!(NetworkedConfig { port: 1, ..config }.validate().is_ok());
    }

    #[test]
    fn db_kind_parses_case_insensitively() {
        assert_eq!("MySQL".parse::<DbKind>(), Ok(DbKind::Mysql));
        assert_eq!(" postgres ".parse::<DbKind>(), Ok(DbKind::Postgres));
        assert!("oracle".parse::<DbKind>().is_err());
    }
}
