mod config_content_provider;
mod config_manager;
mod config_serializer;

pub use config_content_provider::{ConfigContentProvider, FileContentConfigProvider};
pub use config_manager::ConfigManager;
pub use config_serializer::{ConfigSerializer, YamlConfigSerializer};

pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

/// Places `file_name` next to the running executable, falling back to the
/// working directory when the executable path is unknown.
pub fn config_path_near_executable(file_name: &str) -> String {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(file_name).to_string_lossy().into_owned();
    }
    file_name.to_string()
}
