use super::board::{Board, CELL_COUNT};
use super::save_format::{self, SaveDataError};
use super::types::{GameStatus, InvalidMove, Mark, Player};
use super::win_detector::{evaluate_status, has_line};

/// A single game: the board plus whose turn it is. Status is always derived
/// from the board, so a state can never disagree with its own cells.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GameState {
    board: Board,
    current_player: Player,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_player: Player::X,
        }
    }

    /// Rebuilds a state from a board and recorded turn, rejecting
    /// combinations that strict alternation from an empty board cannot reach.
    pub fn from_parts(board: Board, current_player: Player) -> Result<Self, SaveDataError> {
        let x_count = board.count(Mark::X);
        let o_count = board.count(Mark::O);

        if x_count < o_count || x_count > o_count + 1 {
            return Err(SaveDataError::Inconsistent(format!(
                "{} X marks and {} O marks cannot occur with alternating turns",
                x_count, o_count
            )));
        }

        if has_line(&board, Mark::X) && has_line(&board, Mark::O) {
            return Err(SaveDataError::Inconsistent(
                "both players have a completed line".to_string(),
            ));
        }

        let x_moved_last = x_count > o_count;
        let status = evaluate_status(&board);
        match status {
            GameStatus::XWins if !x_moved_last => {
                return Err(SaveDataError::Inconsistent(
                    "X has a completed line but O moved after it".to_string(),
                ));
            }
            GameStatus::OWins if x_moved_last => {
                return Err(SaveDataError::Inconsistent(
                    "O has a completed line but X moved after it".to_string(),
                ));
            }
            _ => {}
        }

        // The turn does not advance on the finishing move, so a finished game
        // records the player who made it.
        let expected = match (status, x_moved_last) {
            (GameStatus::InProgress, false) => Player::X,
            (GameStatus::InProgress, true) => Player::O,
            (_, true) => Player::X,
            (_, false) => Player::O,
        };

        if current_player != expected {
            return Err(SaveDataError::Inconsistent(format!(
                "recorded turn is player {} but the board requires player {}",
                current_player.number(),
                expected.number()
            )));
        }

        Ok(Self {
            board,
            current_player,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn status(&self) -> GameStatus {
        evaluate_status(&self.board)
    }

    pub fn is_over(&self) -> bool {
        self.status().is_terminal()
    }

    pub fn legal_moves(&self) -> Vec<usize> {
        if self.is_over() {
            return Vec::new();
        }
        self.board.empty_cells()
    }

    pub fn apply_move(&mut self, index: usize) -> Result<GameStatus, InvalidMove> {
        if self.is_over() {
            return Err(InvalidMove::GameOver);
        }

        if index >= CELL_COUNT {
            return Err(InvalidMove::OutOfRange(index));
        }

        if self.board.get(index) != Some(Mark::Empty) {
            return Err(InvalidMove::Occupied(index));
        }

        self.board.set(index, self.current_player.mark());

        let status = self.status();
        if status == GameStatus::InProgress {
            self.current_player = self.current_player.opponent();
        }

        Ok(status)
    }

    pub fn serialize(&self) -> String {
        save_format::encode(self)
    }

    pub fn deserialize(text: &str) -> Result<Self, SaveDataError> {
        save_format::decode(text)
    }
}
