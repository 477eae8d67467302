use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, DateTime, Document};
use mongodb::options::{
    FindOneAndUpdateOptions, FindOptions, ReplaceOptions, ReturnDocument, UpdateOptions,
};
use serde::{Deserialize, Serialize};

use rpg_interface::errors::{AppError, Result};
use rpg_interface::players::model::{Player, Profession, Race};
use rpg_interface::players::store::PlayerStore;

use crate::database_connection::DatabaseConnection;

const PLAYERS_COLLECTION: &str = "players";
const COUNTERS_COLLECTION: &str = "counters";

#[derive(Clone)]
pub struct MongoPlayerStore {
    db: DatabaseConnection,
}

impl MongoPlayerStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    // Atomically allocates the next player id from the counters collection.
    async fn next_id(&self) -> Result<i64> {
        let collection = self.db.collection::<Counter>(COUNTERS_COLLECTION);

        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();

        let counter = collection
            .find_one_and_update(counter_filter(), next_id_update(), options)
            .await
            .map_err(|e| AppError::MongoError { msg: e.to_string() })?;

        counter
            .map(|c| c.seq)
            .ok_or_else(|| AppError::MongoError {
                msg: "the players id counter was not returned".to_string(),
            })
    }

    // Moves the counter past an id picked by the caller so next_id never hands it out.
    async fn reserve_id(&self, id: i64) -> Result<()> {
        let collection = self.db.collection::<Counter>(COUNTERS_COLLECTION);
        let options = UpdateOptions::builder().upsert(true).build();

        collection
            .update_one(counter_filter(), reserve_id_update(id), options)
            .await
            .map_err(|e| AppError::MongoError { msg: e.to_string() })?;

        Ok(())
    }
}

fn counter_filter() -> Document {
    doc! {"_id": PLAYERS_COLLECTION}
}

fn next_id_update() -> Document {
    doc! {"$inc": {"seq": 1_i64}}
}

fn reserve_id_update(id: i64) -> Document {
    doc! {"$max": {"seq": id}}
}

#[derive(Debug, Deserialize)]
struct Counter {
    seq: i64,
}

// The player as stored in mongo, keyed by its numeric id.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PlayerDocument {
    pub _id: i64,
    pub name: String,
    pub title: String,
    pub race: Race,
    pub profession: Profession,
    pub birthday: DateTime,
    pub banned: bool,
    pub experience: i32,
    pub level: i32,
    pub until_next_level: i32,
}

impl PlayerDocument {
    fn new(id: i64, player: &Player) -> Self {
        PlayerDocument {
            _id: id,
            name: player.name.clone(),
            title: player.title.clone(),
            race: player.race,
            profession: player.profession,
            birthday: DateTime::from_millis(player.birthday.timestamp_millis()),
            banned: player.banned,
            experience: player.experience,
            level: player.level,
            until_next_level: player.until_next_level,
        }
    }
}

impl TryFrom<PlayerDocument> for Player {
    type Error = AppError;

    fn try_from(document: PlayerDocument) -> Result<Self> {
        let millis = document.birthday.timestamp_millis();
        let birthday =
            chrono::DateTime::from_timestamp_millis(millis).ok_or_else(|| AppError::BsonError {
                msg: format!("player {} has an out of range birthday {}", document._id, millis),
            })?;

        Ok(Player {
            id: Some(document._id),
            name: document.name,
            title: document.title,
            race: document.race,
            profession: document.profession,
            birthday,
            banned: document.banned,
            experience: document.experience,
            level: document.level,
            until_next_level: document.until_next_level,
        })
    }
}

#[async_trait]
impl PlayerStore for MongoPlayerStore {
    async fn find_all(&self) -> Result<Vec<Player>> {
        let collection = self.db.collection::<PlayerDocument>(PLAYERS_COLLECTION);

        let find_options = FindOptions::builder().sort(doc! {"_id": 1}).build();

        let documents: Vec<PlayerDocument> = collection
            .find(None, find_options)
            .await
            .map_err(|e| AppError::MongoError { msg: e.to_string() })?
            .try_collect()
            .await
            .map_err(|e| AppError::MongoError { msg: e.to_string() })?;

        documents.into_iter().map(Player::try_from).collect()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Player>> {
        let collection = self.db.collection::<PlayerDocument>(PLAYERS_COLLECTION);

        let document = collection
            .find_one(doc! {"_id": id}, None)
            .await
            .map_err(|e| AppError::MongoError { msg: e.to_string() })?;

        document.map(Player::try_from).transpose()
    }

    async fn save(&self, player: Player) -> Result<Player> {
        let collection = self.db.collection::<PlayerDocument>(PLAYERS_COLLECTION);

        let id = match player.id {
            Some(id) => {
                self.reserve_id(id).await?;

                let options = ReplaceOptions::builder().upsert(true).build();
                collection
                    .replace_one(doc! {"_id": id}, PlayerDocument::new(id, &player), options)
                    .await
                    .map_err(|e| AppError::MongoError { msg: e.to_string() })?;
                id
            }
            None => {
                // A plain insert: a clash on _id fails instead of replacing a player.
                let id = self.next_id().await?;
                collection
                    .insert_one(PlayerDocument::new(id, &player), None)
                    .await
                    .map_err(|e| AppError::MongoError { msg: e.to_string() })?;
                id
            }
        };

        Ok(Player {
            id: Some(id),
            ..player
        })
    }

    async fn delete(&self, player: &Player) -> Result<()> {
        let Some(id) = player.id else {
            return Ok(());
        };

        let collection = self.db.collection::<PlayerDocument>(PLAYERS_COLLECTION);

        collection
            .delete_one(doc! {"_id": id}, None)
            .await
            .map_err(|e| AppError::MongoError { msg: e.to_string() })?;

        Ok(())
    }
}
