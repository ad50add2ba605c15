mod board;
mod file_io;
mod game_state;
mod save_format;
mod types;
mod win_detector;

pub use board::{BOARD_SIZE, Board, CELL_COUNT};
pub use file_io::{DEFAULT_SAVE_FILE_NAME, SaveFileError, delete_saved_game, load_game, save_game};
pub use game_state::GameState;
pub use save_format::{PLAYER_TURN_LABEL, SaveDataError};
pub use types::{GameStatus, InvalidMove, Mark, Player};
pub use win_detector::{WINNING_LINES, evaluate_status, has_line};
