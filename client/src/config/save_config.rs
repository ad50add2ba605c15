use common::config::Validate;
use common::games::tictactoe::DEFAULT_SAVE_FILE_NAME;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct SaveConfig {
    pub file: String,
    pub offer_resume: bool,
}

impl Validate for SaveConfig {
    fn validate(&self) -> Result<(), String> {
        if self.file.trim().is_empty() {
            return Err("save file path must not be empty".to_string());
        }
        Ok(())
    }
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            file: DEFAULT_SAVE_FILE_NAME.to_string(),
            offer_resume: true,
        }
    }
}
