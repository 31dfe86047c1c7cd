use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub images: ImageConfig,
    /// Maximum request body size for create/update, in bytes
    pub max_upload_size: u64,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Static asset root served at `/`
    pub public_dir: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// redb document store on disk
    Persistent,
    /// Process-local list, lost on restart
    Memory,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub backend: StoreBackend,
    /// Directory for the persistent store file
    pub data_dir: String,
}

#[derive(Debug, Clone)]
pub struct ImageConfig {
    /// Directory uploads are written to
    pub dir: String,
    /// Joined with the upload filename to form `img_name`; also the URL prefix
    pub path_prefix: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3002,
            public_dir: "./public".to_string(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Persistent,
            data_dir: "./data".to_string(),
        }
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            dir: "./public/images".to_string(),
            path_prefix: "images".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
            images: ImageConfig::default(),
            max_upload_size: 10 * 1024 * 1024, // 10MB
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = Config::default();

        let host = std::env::var("HOST").unwrap_or(defaults.server.host);

        let port = match std::env::var("PORT") {
            Ok(raw) => raw.trim().parse::<u16>().map_err(|_| {
                ConfigError::ValidationError(format!("PORT must be a port number, got '{raw}'"))
            })?,
            Err(_) => defaults.server.port,
        };

        let public_dir = std::env::var("PUBLIC_DIR").unwrap_or(defaults.server.public_dir);

        let backend = match std::env::var("STORE_BACKEND")
            .unwrap_or_else(|_| "persistent".to_string())
            .to_lowercase()
            .as_str()
        {
            "memory" => StoreBackend::Memory,
            "persistent" => StoreBackend::Persistent,
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "STORE_BACKEND must be 'persistent' or 'memory', got '{other}'"
                )))
            }
        };

        let data_dir = std::env::var("DATA_DIR").unwrap_or(defaults.storage.data_dir);

        let images_dir = std::env::var("IMAGES_DIR").unwrap_or(defaults.images.dir);
        let path_prefix =
            std::env::var("IMAGE_PATH_PREFIX").unwrap_or(defaults.images.path_prefix);

        let max_upload_size = std::env::var("MAX_UPLOAD_SIZE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.max_upload_size);

        let config = Config {
            server: ServerConfig {
                host,
                port,
                public_dir,
            },
            storage: StorageConfig { backend, data_dir },
            images: ImageConfig {
                dir: images_dir,
                path_prefix: path_prefix.trim_matches('/').to_string(),
            },
            max_upload_size,
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "PORT cannot be 0".to_string(),
            ));
        }

        let prefix = &self.images.path_prefix;
        if prefix.is_empty() || prefix.split('/').any(|part| part == "..") {
            return Err(ConfigError::ValidationError(format!(
                "IMAGE_PATH_PREFIX '{prefix}' must be a non-empty relative path"
            )));
        }

        // Route syntax characters would make the image route panic on registration
        if let Some(c) = prefix.chars().find(|c| matches!(c, ':' | '*' | '{' | '}')) {
            return Err(ConfigError::ValidationError(format!(
                "IMAGE_PATH_PREFIX '{prefix}' must not contain '{c}'"
            )));
        }

        Ok(())
    }

    /// Address the HTTP listener binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
