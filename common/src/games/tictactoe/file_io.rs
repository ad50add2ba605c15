use std::io::ErrorKind;
use std::path::Path;

use super::game_state::GameState;
use super::save_format::SaveDataError;

pub const DEFAULT_SAVE_FILE_NAME: &str = "game_state.txt";

#[derive(Debug)]
pub enum SaveFileError {
    IoError(std::io::Error),
    Data(SaveDataError),
}

impl std::fmt::Display for SaveFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveFileError::IoError(e) => write!(f, "IO error: {}", e),
            SaveFileError::Data(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SaveFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SaveFileError::IoError(e) => Some(e),
            SaveFileError::Data(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for SaveFileError {
    fn from(e: std::io::Error) -> Self {
        SaveFileError::IoError(e)
    }
}

impl From<SaveDataError> for SaveFileError {
    fn from(e: SaveDataError) -> Self {
        SaveFileError::Data(e)
    }
}

/// Overwrites `path` with the encoded state.
pub fn save_game(path: &Path, state: &GameState) -> Result<(), SaveFileError> {
    std::fs::write(path, state.serialize())?;
    Ok(())
}

/// Returns `Ok(None)` when there is no save file at `path`.
pub fn load_game(path: &Path) -> Result<Option<GameState>, SaveFileError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };

    let state = GameState::deserialize(&content)?;
    Ok(Some(state))
}

pub fn delete_saved_game(path: &Path) -> Result<(), SaveFileError> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.into()),
    }
}
