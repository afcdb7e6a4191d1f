//! Application configuration loaded from environment variables.

use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    // === Storage ===
    /// Path of the JSON document holding every hero.
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,

    // === Static Pages ===
    /// Directory with the landing page and its assets.
    #[serde(default = "default_client_dir")]
    pub client_dir: PathBuf,

    /// Directory containing `pages/form.html`.
    #[serde(default = "default_public_dir")]
    pub public_dir: PathBuf,

    // === Logging ===
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,
}

fn default_port() -> u16 {
    3000
}

fn default_data_path() -> PathBuf {
    PathBuf::from("data/heroes.json")
}

fn default_client_dir() -> PathBuf {
    PathBuf::from("client")
}

fn default_public_dir() -> PathBuf {
    PathBuf::from("public")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            data_path: default_data_path(),
            client_dir: default_client_dir(),
            public_dir: default_public_dir(),
            rust_log: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("PORT must be between 1 and 65535".to_string());
        }

        if self.data_path.as_os_str().is_empty() {
            return Err("DATA_PATH is required".to_string());
        }

        if self.data_path.is_dir() {
            return Err(format!(
                "DATA_PATH {} is a directory, expected a JSON file",
                self.data_path.display()
            ));
        }

        Ok(())
    }

    /// Location of the landing page.
    pub fn landing_page(&self) -> PathBuf {
        self.client_dir.join("index.html")
    }

    /// Location of the hero submission form.
    pub fn form_page(&self) -> PathBuf {
        self.public_dir.join("pages").join("form.html")
    }
}
