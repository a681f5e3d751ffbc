//! Layered configuration: defaults, then a YAML file, then `CLINIC__*`
//! environment variables, then CLI overrides.

use std::path::Path;

use directory::SeedAdmin;
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_owned(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// sea-orm connection string, e.g. `postgres://...` or `sqlite://...`.
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://clinic.db?mode=rwc".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub bcrypt_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_hours: 24,
            bcrypt_cost: 12,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadsConfig {
    pub root_dir: String,
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self {
            root_dir: "uploads".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `info` or `clinic_server=debug`.
    pub level: String,
    /// `pretty` or `json`.
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: "pretty".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedAccount {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl Default for SeedAccount {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            password: String::new(),
        }
    }
}

impl From<SeedAccount> for SeedAdmin {
    fn from(a: SeedAccount) -> Self {
        Self {
            first_name: a.first_name,
            last_name: a.last_name,
            email: a.email,
            password: a.password,
        }
    }
}

/// First-boot data; ignored once the database carries the seeded marker.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    pub store_name: String,
    pub super_admin: SeedAccount,
    pub pms_admin: SeedAccount,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            store_name: "Clinic".to_owned(),
            super_admin: SeedAccount::default(),
            pms_admin: SeedAccount::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub uploads: UploadsConfig,
    pub logging: LoggingConfig,
    pub seed: SeedConfig,
}

impl AppConfig {
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        let config: Self = figment
            .merge(Env::prefixed("CLINIC__").split("__"))
            .extract()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.auth.jwt_secret.is_empty() {
            anyhow::bail!("auth.jwt_secret must be set");
        }
        if !(4..=31).contains(&self.auth.bcrypt_cost) {
            anyhow::bail!("auth.bcrypt_cost must be between 4 and 31");
        }
        match self.logging.format.as_str() {
            "pretty" | "json" => {}
            other => anyhow::bail!("logging.format must be 'pretty' or 'json', got '{other}'"),
        }
        Ok(())
    }

    /// Seed accounts need credentials on a fresh database only; an empty
    /// account blocks seeding rather than booting with a known password.
    pub fn seed_accounts(&self) -> anyhow::Result<(SeedAdmin, SeedAdmin)> {
        for (label, account) in [
            ("super_admin", &self.seed.super_admin),
            ("pms_admin", &self.seed.pms_admin),
        ] {
            if account.email.is_empty() || account.password.is_empty() {
                anyhow::bail!("seed.{label} needs an email and password for first boot");
            }
        }
        Ok((
            self.seed.super_admin.clone().into(),
            self.seed.pms_admin.clone().into(),
        ))
    }
}
