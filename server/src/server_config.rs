use std::time::Duration;

use common::config::{
    ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer,
    config_path_near_executable,
};
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "tictactoe_server_config.yaml";

pub fn get_config_manager(
    path_override: Option<&str>,
) -> ConfigManager<FileContentConfigProvider, ServerConfig, YamlConfigSerializer> {
    match path_override {
        Some(path) => ConfigManager::from_yaml_file(path),
        None => ConfigManager::from_yaml_file(&config_path_near_executable(CONFIG_FILE_NAME)),
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub address: String,
    pub static_files_path: Option<String>,
    pub cleanup_interval_secs: u64,
    pub inactivity_timeout_secs: u64,
}

impl ServerConfig {
    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_secs)
    }

    pub fn inactivity_timeout(&self) -> Duration {
        Duration::from_secs(self.inactivity_timeout_secs)
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.address.is_empty() {
            return Err("address must not be empty".to_string());
        }
        if let Some(path) = &self.static_files_path
            && path.is_empty()
        {
            return Err("static_files_path must not be empty if provided".to_string());
        }
        if self.cleanup_interval_secs == 0 {
            return Err("cleanup_interval_secs must be greater than 0".to_string());
        }
        if self.inactivity_timeout_secs == 0 {
            return Err("inactivity_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: "0.0.0.0:5000".to_string(),
            static_files_path: Some("web".to_string()),
            cleanup_interval_secs: 300,
            inactivity_timeout_secs: 3600,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::config::ConfigSerializer;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ServerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_config_can_be_serialized_and_deserialized() {
        let default_config = ServerConfig::default();
        let serializer = YamlConfigSerializer::new();
        let serialized = serializer.serialize(&default_config).unwrap();
        let deserialized: ServerConfig = serializer.deserialize(&serialized).unwrap();
        assert_eq!(default_config, deserialized);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let serializer = YamlConfigSerializer::new();
        let config: ServerConfig = serializer.deserialize("address: 127.0.0.1:8080\n").unwrap();
        assert_eq!(config.address, "127.0.0.1:8080");
        assert_eq!(config.inactivity_timeout_secs, 3600);
    }

    #[test]
    fn test_zero_durations_rejected() {
        let mut config = ServerConfig::default();
        config.cleanup_interval_secs = 0;
        assert!(config.validate().is_err());

        let mut config = ServerConfig::default();
        config.inactivity_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_address_rejected() {
        let config = ServerConfig {
            address: String::new(),
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
