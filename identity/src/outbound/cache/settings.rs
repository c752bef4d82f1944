//! Cache connection settings read from the environment.
//!
//! Centralises the environment-driven store settings so they are validated
//! consistently and can be tested in isolation.

use mockable::Env;
use thiserror::Error;

const URL_ENV: &str = "REDIS_URL";
const POOL_SIZE_ENV: &str = "REDIS_POOL_SIZE";
const DEFAULT_POOL_SIZE: u32 = 10;

/// Errors raised while validating cache settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheSettingsError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {name}")]
    MissingEnv {
        /// Name of the missing variable.
        name: &'static str,
    },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        /// Name of the offending variable.
        name: &'static str,
        /// The rejected value.
        value: String,
        /// Human-readable description of what was expected.
        expected: &'static str,
    },
}

/// Connection settings for the shared store.
#[derive(Debug)]
pub struct CacheSettings {
    /// Redis connection URL.
    pub url: String,
    /// Maximum pooled connections.
    pub pool_size: u32,
}

impl CacheSettings {
    /// Read settings from the environment.
    ///
    /// `REDIS_URL` is required; `REDIS_POOL_SIZE` defaults to 10 and must
    /// parse as a positive integer when present.
    ///
    /// # Errors
    ///
    /// Returns [`CacheSettingsError`] for missing or invalid variables.
    pub fn from_env<E: Env>(env: &E) -> Result<Self, CacheSettingsError> {
        let url = env
            .string(URL_ENV)
            .ok_or(CacheSettingsError::MissingEnv { name: URL_ENV })?;
        if url.trim().is_empty() {
            return Err(CacheSettingsError::InvalidEnv {
                name: URL_ENV,
                value: url,
                expected: "non-empty redis:// URL",
            });
        }
        let pool_size = match env.string(POOL_SIZE_ENV) {
            None => DEFAULT_POOL_SIZE,
            Some(raw) => match raw.parse::<u32>() {
                Ok(size) if size > 0 => size,
                _ => {
                    return Err(CacheSettingsError::InvalidEnv {
                        name: POOL_SIZE_ENV,
                        value: raw,
                        expected: "positive integer",
                    });
                }
            },
        };
        Ok(Self { url, pool_size })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockable::MockEnv;
    use rstest::rstest;
    use std::collections::HashMap;

    fn mock_env(vars: HashMap<String, String>) -> MockEnv {
        let mut env = MockEnv::new();
        env.expect_string()
            .times(0..)
            .returning(move |key| vars.get(key).cloned());
        env
    }

    #[test]
    fn url_alone_yields_the_default_pool_size() {
        let env = mock_env(HashMap::from([(
            "REDIS_URL".to_owned(),
            "redis://127.0.0.1:6379".to_owned(),
        )]));

        let settings = CacheSettings::from_env(&env).expect("valid settings");
        assert_eq!(settings.url, "redis://127.0.0.1:6379");
        assert_eq!(settings.pool_size, DEFAULT_POOL_SIZE);
    }

    #[test]
    fn missing_url_is_an_error() {
        let env = mock_env(HashMap::new());

        let err = CacheSettings::from_env(&env).expect_err("missing URL");
        assert_eq!(err, CacheSettingsError::MissingEnv { name: "REDIS_URL" });
    }

    #[test]
    fn blank_url_is_rejected() {
        let env = mock_env(HashMap::from([("REDIS_URL".to_owned(), "  ".to_owned())]));

        let err = CacheSettings::from_env(&env).expect_err("blank URL");
        assert!(matches!(
            err,
            CacheSettingsError::InvalidEnv {
                name: "REDIS_URL",
                ..
            }
        ));
    }

    #[test]
    fn explicit_pool_size_is_honoured() {
        let env = mock_env(HashMap::from([
            ("REDIS_URL".to_owned(), "redis://cache:6379".to_owned()),
            ("REDIS_POOL_SIZE".to_owned(), "4".to_owned()),
        ]));

        let settings = CacheSettings::from_env(&env).expect("valid settings");
        assert_eq!(settings.pool_size, 4);
    }

    #[rstest]
    #[case("0")]
    #[case("-3")]
    #[case("many")]
    fn invalid_pool_sizes_are_rejected(#[case] raw: &str) {
        let env = mock_env(HashMap::from([
            ("REDIS_URL".to_owned(), "redis://cache:6379".to_owned()),
            ("REDIS_POOL_SIZE".to_owned(), raw.to_owned()),
        ]));

        let err = CacheSettings::from_env(&env).expect_err("invalid pool size");
        assert!(matches!(
            err,
            CacheSettingsError::InvalidEnv {
                name: "REDIS_POOL_SIZE",
                ..
            }
        ));
    }
}
