use std::time::Duration;

use mongodb::bson::doc;
use mongodb::options::ClientOptions;

use rpg_interface::errors::{AppError, Result};

pub type DatabaseConnection = mongodb::Database;

const APP_NAME: &str = "rpg_players";
// Fail startup quickly when no server answers instead of the driver's 30s.
const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(5);

pub struct DatabaseManager;

impl DatabaseManager {
    pub async fn new_pool(database_uri: &str, database_name: &str) -> Result<DatabaseConnection> {
        let options = Self::client_options(database_uri).await?;

        let db = mongodb::Client::with_options(options)
            .map_err(|e| AppError::MongoError { msg: e.to_string() })?
            .database(database_name);

        db.run_command(doc! {"ping": 1}, None)
            .await
            .map_err(|e| AppError::MongoError { msg: e.to_string() })?;
        tracing::debug!("connected to mongodb database '{}'", database_name);

        Ok(db)
    }

    async fn client_options(database_uri: &str) -> Result<ClientOptions> {
        let mut options = ClientOptions::parse(database_uri)
            .await
            .map_err(|e| AppError::ParseError {
                msg: format!("invalid database uri: {e}"),
            })?;

        options.app_name = Some(APP_NAME.to_string());
        options.server_selection_timeout = Some(SERVER_SELECTION_TIMEOUT);

        Ok(options)
    }
}
