use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    Empty,
    X,
    O,
}

impl Mark {
    /// Token used by the save file format.
    pub fn to_token(&self) -> char {
        match self {
            Mark::Empty => '-',
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }

    pub fn from_token(token: &str) -> Option<Mark> {
        match token {
            "-" => Some(Mark::Empty),
            "X" => Some(Mark::X),
            "O" => Some(Mark::O),
            _ => None,
        }
    }

    /// Swaps X and O, leaving empty cells alone.
    pub fn relabeled(&self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
            Mark::Empty => Mark::Empty,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    pub fn mark(&self) -> Mark {
        match self {
            Player::X => Mark::X,
            Player::O => Mark::O,
        }
    }

    pub fn opponent(&self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// 1-based player number: 1 moves first with X, 2 plays O.
    pub fn number(&self) -> u8 {
        match self {
            Player::X => 1,
            Player::O => 2,
        }
    }

    pub fn from_number(number: u8) -> Option<Player> {
        match number {
            1 => Some(Player::X),
            2 => Some(Player::O),
            _ => None,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    XWins,
    OWins,
    Draw,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        *self != GameStatus::InProgress
    }

    pub fn winner(&self) -> Option<Player> {
        match self {
            GameStatus::XWins => Some(Player::X),
            GameStatus::OWins => Some(Player::O),
            GameStatus::InProgress | GameStatus::Draw => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidMove {
    GameOver,
    OutOfRange(usize),
    Occupied(usize),
}

impl std::fmt::Display for InvalidMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidMove::GameOver => write!(f, "Game is already over"),
            InvalidMove::OutOfRange(index) => {
                write!(f, "Position {} out of range, expected 0-8", index)
            }
            InvalidMove::Occupied(index) => write!(f, "Cell {} is already taken", index),
        }
    }
}

impl std::error::Error for InvalidMove {}
