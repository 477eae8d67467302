use std::sync::Arc;

use axum::extract::FromRef;

use rpg_interface::errors::Result;
use rpg_interface::players::service::PlayersServiceHandle;
use rpg_interface::players::store::PlayerStoreHandle;

pub mod players_service;

use players_service::StorePlayersService;

use crate::settings::Settings;
use crate::stores;

#[derive(FromRef, Clone)]
pub struct ServiceRegistry {
    pub players_service: PlayersServiceHandle,
}

impl ServiceRegistry {
    pub fn new(store: PlayerStoreHandle) -> Self {
        let players_service = Arc::new(StorePlayersService::new(store));

        Self { players_service }
    }

    // Opens the store selected in the settings and wires every service on it.
    pub async fn from_settings(settings: &Settings) -> Result<Self> {
        let store = stores::open_store(&settings.database).await?;

        Ok(Self::new(store))
    }
}
