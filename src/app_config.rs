use config::{Config, ConfigError};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    server: Server,
    maps: Maps,
    #[serde(default)]
    users: Vec<ConfiguredUser>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(config::File::with_name("config").required(true))
            .add_source(config::File::with_name("config_local").required(false))
            .add_source(config::Environment::with_prefix("EMAAN").separator("__"))
            .build()?
            .try_deserialize()
    }

    pub fn server(&self) -> &Server {
        &self.server
    }

    pub fn maps(&self) -> &Maps {
        &self.maps
    }

    pub fn users(&self) -> &[ConfiguredUser] {
        &self.users
    }
}

#[derive(Debug, Deserialize)]
pub struct Server {
    host: String,
    port: u16,
    #[serde(with = "humantime_serde")]
    cors_max_age: Duration,
}

impl Server {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn cors_max_age(&self) -> Duration {
        self.cors_max_age
    }
}

#[derive(Debug, Deserialize)]
pub struct Maps {
    directory: String,
    default_radius_km: f64,
}

impl Maps {
    pub fn directory(&self) -> &str {
        &self.directory
    }

    pub fn default_radius_km(&self) -> f64 {
        self.default_radius_km
    }
}

/// A user that is known at startup together with the bearer token that authenticates them.
#[derive(Debug, Deserialize)]
pub struct ConfiguredUser {
    id: String,
    email: String,
    full_name: String,
    token: String,
}

impl ConfiguredUser {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

#[cfg(test)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

#[cfg(test)]
impl AppConfigBuilder {
    pub fn new() -> Self {
        AppConfigBuilder {
            config: AppConfig {
                server: Server {
                    host: "127.0.0.1".to_string(),
                    port: 0,
                    cors_max_age: Duration::from_secs(60),
                },
                maps: Maps {
                    directory: format!("{}/resources/mosques", env!("CARGO_MANIFEST_DIR")),
                    default_radius_km: 10.0,
                },
                users: vec![ConfiguredUser {
                    id: "user-1".to_string(),
                    email: "amina@example.com".to_string(),
                    full_name: "Amina".to_string(),
                    token: "token-1".to_string(),
                }],
            },
        }
    }

    pub fn default_radius_km(mut self, radius_km: f64) -> Self {
        self.config.maps.default_radius_km = radius_km;
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}
