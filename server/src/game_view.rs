use common::GameId;
use common::games::tictactoe::{CELL_COUNT, GameState, GameStatus, Mark, Player};
use serde::Serialize;

/// JSON body returned by every game endpoint.
#[derive(Debug, Serialize)]
pub struct GameView {
    pub game_id: GameId,
    pub board: [Mark; CELL_COUNT],
    pub current_player: Player,
    pub status: GameStatus,
    pub winner: Option<Player>,
    pub is_draw: bool,
    pub game_over: bool,
}

impl GameView {
    pub fn new(game_id: GameId, state: &GameState) -> Self {
        let status = state.status();
        Self {
            game_id,
            board: *state.board().cells(),
            current_player: state.current_player(),
            status,
            winner: status.winner(),
            is_draw: status == GameStatus::Draw,
            game_over: status.is_terminal(),
        }
    }
}
