use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use rpg_interface::errors::Result;
use rpg_interface::players::model::Player;
use rpg_interface::players::store::PlayerStore;

/// Player store kept in process memory, for development and tests.
///
/// Ids start at 1 and are never reused.
pub struct InMemoryPlayerStore {
    players: RwLock<BTreeMap<i64, Player>>,
    next_id: AtomicI64,
}

impl InMemoryPlayerStore {
    pub fn new() -> Self {
        Self {
            players: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryPlayerStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlayerStore for InMemoryPlayerStore {
    async fn find_all(&self) -> Result<Vec<Player>> {
        let players = self.players.read().await;
        Ok(players.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Player>> {
        let players = self.players.read().await;
        Ok(players.get(&id).cloned())
    }

    async fn save(&self, mut player: Player) -> Result<Player> {
        let id = match player.id {
            Some(id) => {
                // keep generated ids clear of ones chosen by the caller
                self.next_id.fetch_max(id + 1, Ordering::SeqCst);
                id
            }
            None => self.next_id.fetch_add(1, Ordering::SeqCst),
        };
        player.id = Some(id);

        self.players.write().await.insert(id, player.clone());

        Ok(player)
    }

    async fn delete(&self, player: &Player) -> Result<()> {
        if let Some(id) = player.id {
            self.players.write().await.remove(&id);
        }
        Ok(())
    }
}
