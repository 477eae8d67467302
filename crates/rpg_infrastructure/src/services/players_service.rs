use async_trait::async_trait;
use tracing::{debug, info, warn};

use rpg_interface::errors::Result;
use rpg_interface::players::model::{
    GetPlayersQuery, Player, PlayerFilter, PlayerOrder, PlayerPatch,
};
use rpg_interface::players::query::{filter_players, get_page, sort_players};
use rpg_interface::players::rules::{apply_patch, build_player};
use rpg_interface::players::service::PlayersService;
use rpg_interface::players::store::PlayerStoreHandle;

// Players service working on top of any player store.
#[derive(Clone)]
pub struct StorePlayersService {
    store: PlayerStoreHandle,
}

impl StorePlayersService {
    pub fn new(store: PlayerStoreHandle) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PlayersService for StorePlayersService {
    async fn get_players(&self, filter: &PlayerFilter) -> Result<Vec<Player>> {
        let players = self.store.find_all().await?;
        let total = players.len();

        let players = filter_players(players, filter);
        debug!("{} of {} players match {:?}", players.len(), total, filter);

        Ok(players)
    }

    async fn list_players(&self, query: GetPlayersQuery) -> Result<Vec<Player>> {
        let mut players = self.get_players(&query.filter()).await?;

        sort_players(
            &mut players,
            Some(query.order.unwrap_or(PlayerOrder::Id)),
        );

        Ok(get_page(&players, query.page_number, query.page_size).to_vec())
    }

    async fn count_players(&self, filter: &PlayerFilter) -> Result<usize> {
        self.get_players(filter).await.map(|players| players.len())
    }

    async fn get_player(&self, id: i64) -> Result<Option<Player>> {
        self.store.find_by_id(id).await
    }

    async fn save_player(&self, player: Player) -> Result<Player> {
        self.store.save(player).await
    }

    async fn create_player(&self, patch: PlayerPatch) -> Result<Player> {
        let player = build_player(patch).map_err(|e| {
            warn!("player creation rejected: {}", e);
            e
        })?;

        let player = self.store.save(player).await?;
        info!("created player {:?} '{}'", player.id, player.name);

        Ok(player)
    }

    async fn update_player(&self, mut old_player: Player, patch: PlayerPatch) -> Result<Player> {
        // On error the partially patched player is dropped here, never saved.
        if let Err(e) = apply_patch(&mut old_player, &patch) {
            warn!("update of player {:?} rejected: {}", old_player.id, e);
            return Err(e);
        }

        let player = self.store.save(old_player).await?;
        info!("updated player {:?}", player.id);

        Ok(player)
    }

    async fn delete_player(&self, player: &Player) -> Result<()> {
        self.store.delete(player).await?;
        info!("deleted player {:?}", player.id);

        Ok(())
    }
}
