use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::Result;
use crate::players::model::Player;

// Persistence capability the players service is built on.
#[async_trait]
pub trait PlayerStore {
    async fn find_all(&self) -> Result<Vec<Player>>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Player>>;
    // Inserts the player when it has no id yet (assigning one), replaces it otherwise.
    async fn save(&self, player: Player) -> Result<Player>;
    async fn delete(&self, player: &Player) -> Result<()>;
}

pub type PlayerStoreHandle = Arc<dyn PlayerStore + Send + Sync>;
