use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use common::games::tictactoe::{GameState, InvalidMove};
use common::id_generator::generate_game_id;
use common::{GameId, log};
use tokio::sync::Mutex;

#[derive(Debug)]
pub enum StoreError {
    GameNotFound(GameId),
    InvalidMove(InvalidMove),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::GameNotFound(game_id) => write!(f, "Game {} not found", game_id),
            StoreError::InvalidMove(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<InvalidMove> for StoreError {
    fn from(e: InvalidMove) -> Self {
        StoreError::InvalidMove(e)
    }
}

#[derive(Debug)]
struct GameEntry {
    state: GameState,
    last_activity: Instant,
}

impl GameEntry {
    fn new() -> Self {
        Self {
            state: GameState::new(),
            last_activity: Instant::now(),
        }
    }

    fn touch(&mut self) {
        self.last_activity = Instant::now();
    }
}

/// Active games keyed by id. Every mutation happens under the one lock, so
/// two requests can never interleave moves on the same game.
#[derive(Debug, Clone, Default)]
pub struct GameStore {
    games: Arc<Mutex<HashMap<GameId, GameEntry>>>,
}

impl GameStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create_game(&self) -> (GameId, GameState) {
        let mut games = self.games.lock().await;

        let mut game_id = generate_game_id();
        while games.contains_key(&game_id) {
            game_id = generate_game_id();
        }

        let entry = GameEntry::new();
        let state = entry.state.clone();
        games.insert(game_id.clone(), entry);

        log!("Game created: {} ({} active)", game_id, games.len());
        (game_id, state)
    }

    /// Reading a game counts as activity, so a client that only polls keeps it alive.
    pub async fn get_game(&self, game_id: &GameId) -> Option<GameState> {
        let mut games = self.games.lock().await;
        games.get_mut(game_id).map(|entry| {
            entry.touch();
            entry.state.clone()
        })
    }

    pub async fn apply_move(&self, game_id: &GameId, index: usize) -> Result<GameState, StoreError> {
        let mut games = self.games.lock().await;
        let entry = games
            .get_mut(game_id)
            .ok_or_else(|| StoreError::GameNotFound(game_id.clone()))?;

        entry.touch();
        let player = entry.state.current_player();
        let status = entry.state.apply_move(index)?;
        log!("Game {}: {} played cell {}, status {:?}", game_id, player, index, status);

        Ok(entry.state.clone())
    }

    pub async fn reset_game(&self, game_id: &GameId) -> Result<GameState, StoreError> {
        let mut games = self.games.lock().await;
        let entry = games
            .get_mut(game_id)
            .ok_or_else(|| StoreError::GameNotFound(game_id.clone()))?;

        *entry = GameEntry::new();
        log!("Game reset: {}", game_id);

        Ok(entry.state.clone())
    }

    /// Drops games with no activity for at least `timeout` and returns their ids.
    pub async fn remove_inactive(&self, timeout: Duration) -> Vec<GameId> {
        let mut games = self.games.lock().await;
        let inactive: Vec<GameId> = games
            .iter()
            .filter(|(_, entry)| entry.last_activity.elapsed() >= timeout)
            .map(|(game_id, _)| game_id.clone())
            .collect();

        for game_id in &inactive {
            games.remove(game_id);
        }

        inactive
    }

    pub async fn active_count(&self) -> usize {
        self.games.lock().await.len()
    }
}
