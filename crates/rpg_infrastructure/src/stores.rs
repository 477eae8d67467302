use std::sync::Arc;

use rpg_interface::errors::Result;
use rpg_interface::players::store::PlayerStoreHandle;

pub mod memory_store;
pub mod mongo_store;

use memory_store::InMemoryPlayerStore;
use mongo_store::MongoPlayerStore;

use crate::database_connection::DatabaseManager;
use crate::settings::{Database, StoreBackend};

pub async fn open_store(database: &Database) -> Result<PlayerStoreHandle> {
    match database.backend {
        StoreBackend::Mongo => {
            let db =
                DatabaseManager::new_pool(database.uri.as_str(), database.name.as_str()).await?;
            tracing::info!("players stored in mongodb database '{}'", database.name);
            Ok(Arc::new(MongoPlayerStore::new(db)))
        }
        StoreBackend::Memory => {
            tracing::warn!("players stored in memory, nothing will survive a restart");
            Ok(Arc::new(InMemoryPlayerStore::new()))
        }
    }
}
