mod config;
mod save_config;

pub use config::{Config, get_config_manager};
pub use save_config::SaveConfig;
