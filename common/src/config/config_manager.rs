use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};

use super::{
    ConfigContentProvider, ConfigSerializer, FileContentConfigProvider, Validate,
    YamlConfigSerializer,
};

/// Loads a config once, validates it and caches the result. A missing source
/// yields `TConfig::default()`, which is not cached so a later write wins.
pub struct ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer = YamlConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    config_serializer: TConfigSerializer,
    config_content_provider: TConfigContentProvider,
    config: Arc<Mutex<Option<TConfig>>>,
}

impl<TConfig> ConfigManager<FileContentConfigProvider, TConfig, YamlConfigSerializer>
where
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    pub fn from_yaml_file(file_path: &str) -> Self {
        Self::new(
            FileContentConfigProvider::new(file_path.to_string()),
            YamlConfigSerializer::new(),
        )
    }
}

impl<TConfigContentProvider, TConfig, TConfigSerializer>
    ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    pub fn new(
        config_content_provider: TConfigContentProvider,
        config_serializer: TConfigSerializer,
    ) -> Self {
        Self {
            config: Arc::new(Mutex::new(None)),
            config_content_provider,
            config_serializer,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Option<TConfig>>, String> {
        self.config
            .lock()
            .map_err(|_| "Config cache lock poisoned".to_string())
    }

    pub fn get_config(&self) -> Result<TConfig, String> {
        let mut current = self.lock()?;

        if let Some(config) = current.as_ref() {
            return Ok(config.clone());
        }

        if let Some(config_data) = self.config_content_provider.get_config_content()? {
            let config = self.config_serializer.deserialize(&config_data)?;

            config
                .validate()
                .map_err(|e| format!("Config validation error: {}", e))?;

            *current = Some(config.clone());
            return Ok(config);
        }

        Ok(TConfig::default())
    }

    pub fn set_config(&self, config: &TConfig) -> Result<(), String> {
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        let serialized_config = self.config_serializer.serialize(config)?;

        self.config_content_provider
            .set_config_content(&serialized_config)?;

        *self.lock()? = Some(config.clone());
        Ok(())
    }
}
