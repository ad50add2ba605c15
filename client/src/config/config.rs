use common::config::{
    ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer,
    config_path_near_executable,
};
use serde::{Deserialize, Serialize};

use super::SaveConfig;

const CONFIG_FILE_NAME: &str = "tictactoe_console_config.yaml";

pub fn get_config_manager(
    path_override: Option<&str>,
) -> ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer> {
    match path_override {
        Some(path) => ConfigManager::from_yaml_file(path),
        None => ConfigManager::from_yaml_file(&config_path_near_executable(CONFIG_FILE_NAME)),
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub save: SaveConfig,
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        self.save.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::config::{ConfigContentProvider, ConfigSerializer};

    fn get_temp_file_path() -> String {
        let mut path = std::env::temp_dir();
        let random_number: u32 = rand::random();
        path.push(format!("temp_tictactoe_console_config_{}.yaml", random_number));
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_default_config_can_be_serialized_and_deserialized_string() {
        let default_config = Config::default();
        let serializer = YamlConfigSerializer::new();
        let serialized = serializer.serialize(&default_config).unwrap();
        let deserialized: Config = serializer.deserialize(&serialized).unwrap();
        assert_eq!(default_config, deserialized);
    }

    #[test]
    fn test_default_config_can_be_serialized_and_deserialized_manager() {
        let file_path = get_temp_file_path();
        let config = Config {
            save: SaveConfig {
                file: "my_game.txt".to_string(),
                offer_resume: false,
            },
        };

        let manager = get_config_manager(Some(&file_path));
        manager.set_config(&config).unwrap();

        let fresh_manager = get_config_manager(Some(&file_path));
        assert_eq!(fresh_manager.get_config(), Ok(config));

        std::fs::remove_file(&file_path).unwrap();
    }

    #[test]
    fn test_missing_config_file_gives_default() {
        let manager = get_config_manager(Some(&get_temp_file_path()));
        assert_eq!(manager.get_config(), Ok(Config::default()));
    }

    #[test]
    fn test_empty_save_file_rejected() {
        let file_path = get_temp_file_path();
        let provider = FileContentConfigProvider::new(file_path.clone());
        provider.set_config_content("save:\n  file: ''\n  offer_resume: true\n").unwrap();

        let manager = get_config_manager(Some(&file_path));
        assert!(manager.get_config().is_err());

        std::fs::remove_file(&file_path).unwrap();
    }
}
