use std::time::Duration;

use common::log;

use crate::game_store::GameStore;

pub struct CleanupTask {
    game_store: GameStore,
    check_interval: Duration,
    inactivity_timeout: Duration,
}

impl CleanupTask {
    pub fn new(game_store: GameStore, check_interval: Duration, inactivity_timeout: Duration) -> Self {
        Self {
            game_store,
            check_interval,
            inactivity_timeout,
        }
    }

    pub async fn run(&self) {
        let mut interval = tokio::time::interval(self.check_interval);

        loop {
            interval.tick().await;
            self.cleanup_inactive_games().await;
        }
    }

    async fn cleanup_inactive_games(&self) -> usize {
        let removed = self.game_store.remove_inactive(self.inactivity_timeout).await;
        for game_id in &removed {
            log!("Cleaning up inactive game: {}", game_id);
        }
        if !removed.is_empty() {
            log!("{} games still active", self.game_store.active_count().await);
        }
        removed.len()
    }
}
