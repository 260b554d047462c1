use config::{Config as ConfigLoader, ConfigError, Environment, File};
use orion_llm::OpenAIConfig;
use orion_persist::{StorageBackend, DEFAULT_USER_NAME};
use orion_types::RecordId;
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o";
pub const DEFAULT_IMAGE_MODEL: &str = "dall-e-3";
pub const EMPTY_REPLY_PLACEHOLDER: &str = "⚠️ No response from AI.";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub relay: RelayConfig,
    #[serde(default)]
    pub image: ImageConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,

    // Secrets (from ENV only)
    #[serde(default)]
    pub openai_api_key: String,
    #[serde(default)]
    pub openai_base_url: Option<String>,
    #[serde(default)]
    pub supabase_url: String,
    #[serde(default)]
    pub supabase_service_role_key: String,
    #[serde(default)]
    pub mongodb_uri: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            request_timeout_secs: 120,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub enabled: bool,
    pub origins: Vec<String>,
}

/// Values the relay falls back to when a request leaves them out
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Used when `sessionId` is absent (default `1`)
    pub default_session_id: RecordId,
    /// Used when `userId` is absent (default `1`)
    pub default_user_id: RecordId,
    /// Used when `model` is absent (default `gpt-4o`)
    pub default_model: String,
    /// Display name given to lazily created users (default `Guest`)
    pub guest_name: String,
    /// Stored and returned when the backend produces no text
    pub empty_reply_placeholder: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            default_session_id: RecordId::Int(1),
            default_user_id: RecordId::Int(1),
            default_model: DEFAULT_CHAT_MODEL.to_string(),
            guest_name: DEFAULT_USER_NAME.to_string(),
            empty_reply_placeholder: EMPTY_REPLY_PLACEHOLDER.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    pub model: String,
    pub size: String,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_IMAGE_MODEL.to_string(),
            size: orion_llm::DEFAULT_IMAGE_SIZE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    #[default]
    Memory,
    Postgrest,
    Mongodb,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageKind,
    /// MongoDB database name
    pub database: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageKind::Memory,
            database: "orion".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from TOML files and environment variables
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. config/default.toml
    /// 2. config/{ENV}.toml (if ENV is set)
    /// 3. ORION_<SECTION>__<KEY> environment variables, e.g. ORION_SERVER__PORT
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("ENV").unwrap_or_else(|_| "dev".to_string());

        let builder = ConfigLoader::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("ORION")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut cfg: Config = builder.build()?.try_deserialize()?;
        cfg.load_secrets()?;
        Ok(cfg)
    }

    /// Load config from a specific path (useful for testing)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let builder = ConfigLoader::builder().add_source(File::from(path.as_ref()));
        builder.build()?.try_deserialize()
    }

    /// Secrets never live in TOML
    fn load_secrets(&mut self) -> Result<(), ConfigError> {
        self.openai_api_key = required_env("OPENAI_API_KEY")?;
        self.openai_base_url = std::env::var("OPENAI_BASE_URL").ok();

        match self.storage.backend {
            StorageKind::Memory => {}
            StorageKind::Postgrest => {
                self.supabase_url = required_env("SUPABASE_URL")?;
                self.supabase_service_role_key = required_env("SUPABASE_SERVICE_ROLE_KEY")?;
            }
            StorageKind::Mongodb => {
                self.mongodb_uri = required_env("MONGODB_URI")?;
            }
        }
        Ok(())
    }

    pub fn openai_config(&self) -> OpenAIConfig {
        let config = OpenAIConfig::new(self.openai_api_key.clone());
        match &self.openai_base_url {
            Some(base_url) => config.with_base_url(base_url.clone()),
            None => config,
        }
    }

    pub fn storage_backend(&self) -> Result<StorageBackend, ConfigError> {
        match self.storage.backend {
            StorageKind::Memory => Ok(StorageBackend::Memory),
            StorageKind::Postgrest => Ok(StorageBackend::Postgrest {
                url: self.supabase_url.clone(),
                service_key: self.supabase_service_role_key.clone(),
            }),
            #[cfg(feature = "mongodb")]
            StorageKind::Mongodb => Ok(StorageBackend::MongoDb {
                uri: self.mongodb_uri.clone(),
                database: self.storage.database.clone(),
            }),
            #[cfg(not(feature = "mongodb"))]
            StorageKind::Mongodb => Err(ConfigError::Message(
                "storage.backend = \"mongodb\" needs the `mongodb` feature".to_string(),
            )),
        }
    }
}

fn required_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name)
        .map_err(|_| ConfigError::Message(format!("{} environment variable is required", name)))
}
