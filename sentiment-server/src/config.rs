use config::{Config, ConfigError, File};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
    pub api_prefix: String,
}

#[derive(Debug, Deserialize)]
pub struct Dataset {
    pub path: String,
}

#[derive(Debug, Deserialize)]
pub struct Status {
    pub path: String,
}

#[derive(Debug, Deserialize)]
pub struct Cors {
    /// Comma-separated list of allowed origins, `*` for any
    pub origins: String,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server: Server,
    pub dataset: Dataset,
    pub status: Status,
    pub cors: Cors,
}

/// Environment variables that override file and default settings
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("HOST", "server.host"),
    ("PORT", "server.port"),
    ("API_PREFIX", "server.api_prefix"),
    ("DATASET_PATH", "dataset.path"),
    ("STATUS_DB_PATH", "status.path"),
    ("CORS_ORIGINS", "cors.origins"),
];

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        let config_file_name = "settings.toml";

        let current_dir_path = PathBuf::from(config_file_name);
        if current_dir_path.exists() {
            builder = builder.add_source(File::from(current_dir_path).required(false));
        }

        // Development layout: run from the workspace root
        let dev_path = PathBuf::from("sentiment-server").join(config_file_name);
        if dev_path.exists() {
            builder = builder.add_source(File::from(dev_path).required(false));
        }

        builder = builder
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8001)?
            .set_default("server.api_prefix", "/api")?
            .set_default("dataset.path", "database.sqlite")?
            .set_default("status.path", "status.db")?
            .set_default("cors.origins", "*")?;

        for (var, key) in ENV_OVERRIDES {
            if let Ok(value) = std::env::var(var) {
                builder = builder.set_override(*key, value)?;
            }
        }

        let s = builder.build()?;
        s.try_deserialize()
    }
}

impl Cors {
    /// Split the configured origins, `None` meaning any origin is allowed
    pub fn origin_list(&self) -> Option<Vec<String>> {
        let origins: Vec<String> = self
            .origins
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
            None
        } else {
            Some(origins)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cors(origins: &str) -> Cors {
        Cors {
            origins: origins.to_string(),
        }
    }

    #[test]
    fn test_wildcard_allows_any_origin() {
        assert_eq!(cors("*").origin_list(), None);
        assert_eq!(cors("").origin_list(), None);
        assert_eq!(cors("http://a.example,*").origin_list(), None);
    }

    #[test]
    fn test_origin_list_is_trimmed() {
        let origins = cors("http://localhost:3000, https://dash.example.com ,")
            .origin_list()
            .expect("explicit origins");
        assert_eq!(
            origins,
            vec![
                "http://localhost:3000".to_string(),
                "https://dash.example.com".to_string()
            ]
        );
    }
}
