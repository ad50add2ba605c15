//! Text encoding of a [`GameState`]:
//!
//! ```text
//! X,O,X
//! -,O,-
//! X,-,-
//! Player Turn: 2
//! ```
//!
//! Empty cells are `-`. The last line holds the 1-based number of the player
//! to move (1 = X, 2 = O). Status is not stored and is derived again on load.

use super::board::{BOARD_SIZE, Board, CELL_COUNT};
use super::game_state::GameState;
use super::types::{Mark, Player};

pub const PLAYER_TURN_LABEL: &str = "Player Turn:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveDataError {
    Corrupt(String),
    Inconsistent(String),
}

impl std::fmt::Display for SaveDataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveDataError::Corrupt(detail) => write!(f, "Corrupt save data: {}", detail),
            SaveDataError::Inconsistent(detail) => {
                write!(f, "Inconsistent save data: {}", detail)
            }
        }
    }
}

impl std::error::Error for SaveDataError {}

pub fn encode(state: &GameState) -> String {
    let mut result = String::new();
    for row in state.board().rows() {
        let tokens: Vec<String> = row.iter().map(|mark| mark.to_token().to_string()).collect();
        result.push_str(&tokens.join(","));
        result.push('\n');
    }
    result.push_str(&format!(
        "{} {}\n",
        PLAYER_TURN_LABEL,
        state.current_player().number()
    ));
    result
}

pub fn decode(text: &str) -> Result<GameState, SaveDataError> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.len() != BOARD_SIZE + 1 {
        return Err(SaveDataError::Corrupt(format!(
            "expected {} board lines and a turn line, found {} lines",
            BOARD_SIZE,
            lines.len()
        )));
    }

    let mut cells = [Mark::Empty; CELL_COUNT];
    for (row, line) in lines[..BOARD_SIZE].iter().enumerate() {
        let tokens: Vec<&str> = line.split(',').map(str::trim).collect();
        if tokens.len() != BOARD_SIZE {
            return Err(SaveDataError::Corrupt(format!(
                "row {} has {} cells, expected {}",
                row + 1,
                tokens.len(),
                BOARD_SIZE
            )));
        }

        for (column, token) in tokens.iter().enumerate() {
            let mark = Mark::from_token(token).ok_or_else(|| {
                SaveDataError::Corrupt(format!(
                    "row {} has unknown cell value '{}'",
                    row + 1,
                    token
                ))
            })?;
            cells[row * BOARD_SIZE + column] = mark;
        }
    }

    let current_player = parse_turn_line(lines[BOARD_SIZE])?;

    GameState::from_parts(Board::from_cells(cells), current_player)
}

fn parse_turn_line(line: &str) -> Result<Player, SaveDataError> {
    let label_matches = line
        .get(..PLAYER_TURN_LABEL.len())
        .is_some_and(|label| label.eq_ignore_ascii_case(PLAYER_TURN_LABEL));
    if !label_matches {
        return Err(SaveDataError::Corrupt(format!(
            "turn line '{}' does not start with '{}'",
            line, PLAYER_TURN_LABEL
        )));
    }

    let value = line[PLAYER_TURN_LABEL.len()..].trim();
    value
        .parse::<u8>()
        .ok()
        .and_then(Player::from_number)
        .ok_or_else(|| SaveDataError::Corrupt(format!("player turn '{}' is not 1 or 2", value)))
}
