//! Deployment environment selection
//!
//! The environment decides which `{environment}.toml` file is layered over
//! `default.toml`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local work; `development.toml` selects the memory backend
    #[default]
    Development,
    Test,
    Staging,
    Production,
}

const ALL: [Environment; 4] = [
    Environment::Development,
    Environment::Test,
    Environment::Staging,
    Environment::Production,
];

impl Environment {
    pub const ENV_VAR: &'static str = "HOSPITAL_APP_ENV";

    /// Environment named by `HOSPITAL_APP_ENV`, falling back to
    /// `Development` when unset or unrecognized.
    pub fn from_env() -> Self {
        match std::env::var(Self::ENV_VAR) {
            Ok(value) => value.parse().unwrap_or_else(|e: ConfigError| {
                eprintln!("{}; using development", e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }

    fn short_name(&self) -> Option<&'static str> {
        match self {
            Environment::Development => Some("dev"),
            Environment::Test => None,
            Environment::Staging => Some("stage"),
            Environment::Production => Some("prod"),
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ALL.into_iter()
            .find(|env| env.as_str() == wanted || env.short_name() == Some(wanted.as_str()))
            .ok_or_else(|| {
                let names: Vec<&str> = ALL.iter().map(Environment::as_str).collect();
                ConfigError::EnvVarError(format!(
                    "Unknown {} value '{}' (expected one of: {})",
                    Self::ENV_VAR,
                    s,
                    names.join(", ")
                ))
            })
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_and_short_names_parse() {
        for env in ALL {
            assert_eq!(env.as_str().parse::<Environment>().unwrap(), env);
            assert_eq!(env.to_string(), env.as_str());
            if let Some(short) = env.short_name() {
                assert_eq!(short.parse::<Environment>().unwrap(), env);
            }
        }
    }

    #[test]
    fn test_parsing_ignores_case_and_padding() {
        assert_eq!(" PROD ".parse::<Environment>().unwrap(), Environment::Production);
        assert_eq!("Staging".parse::<Environment>().unwrap(), Environment::Staging);
    }

    #[test]
    fn test_unknown_name_lists_choices() {
        let err = "qa".parse::<Environment>().unwrap_err();
        assert!(err.to_string().contains("development, test, staging, production"));
    }
}
