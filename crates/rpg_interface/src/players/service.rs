use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::Result;
use crate::players::model::{GetPlayersQuery, Player, PlayerFilter, PlayerPatch};

#[async_trait]
pub trait PlayersService {
    // Query calls
    async fn get_players(&self, filter: &PlayerFilter) -> Result<Vec<Player>>;
    async fn list_players(&self, query: GetPlayersQuery) -> Result<Vec<Player>>;
    async fn count_players(&self, filter: &PlayerFilter) -> Result<usize>;
    async fn get_player(&self, id: i64) -> Result<Option<Player>>;
    // Mutation calls
    async fn save_player(&self, player: Player) -> Result<Player>;
    async fn create_player(&self, patch: PlayerPatch) -> Result<Player>;
    async fn update_player(&self, old_player: Player, patch: PlayerPatch) -> Result<Player>;
    async fn delete_player(&self, player: &Player) -> Result<()>;
}

pub type PlayersServiceHandle = Arc<dyn PlayersService + Send + Sync>;
