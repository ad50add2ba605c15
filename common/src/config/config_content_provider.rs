use std::io::ErrorKind;

pub trait ConfigContentProvider {
    fn get_config_content(&self) -> Result<Option<String>, String>;
    fn set_config_content(&self, content: &str) -> Result<(), String>;
}

pub struct FileContentConfigProvider {
    file_path: String,
}

impl FileContentConfigProvider {
    pub fn new(file_path: String) -> Self {
        Self { file_path }
    }
}

impl ConfigContentProvider for FileContentConfigProvider {
    fn get_config_content(&self) -> Result<Option<String>, String> {
        match std::fs::read_to_string(&self.file_path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(format!(
                "Failed to read config file {}: {}",
                self.file_path, err
            )),
        }
    }

    fn set_config_content(&self, content: &str) -> Result<(), String> {
        std::fs::write(&self.file_path, content).map_err(|e| {
            format!("Failed to write config file {}: {}", self.file_path, e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_temp_file_path() -> String {
        let mut path = std::env::temp_dir();
        let random_number: u32 = rand::random();
        path.push(format!("temp_tictactoe_config_{}.yaml", random_number));
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_missing_file_has_no_content() {
        let provider = FileContentConfigProvider::new(get_temp_file_path());
        assert_eq!(provider.get_config_content(), Ok(None));
    }

    #[test]
    fn test_written_content_is_read_back() {
        let path = get_temp_file_path();
        let provider = FileContentConfigProvider::new(path.clone());
        provider.set_config_content("address: 127.0.0.1:5000\n").unwrap();
        assert_eq!(
            provider.get_config_content(),
            Ok(Some("address: 127.0.0.1:5000\n".to_string()))
        );
        std::fs::remove_file(path).unwrap();
    }
}
