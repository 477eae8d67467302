use axum::extract::{Json, Path, Query, State};
use axum::routing::get;
use axum::Router;

use rpg_infrastructure::services::ServiceRegistry;
use rpg_interface::errors::{AppError, Result};
use rpg_interface::players::model::{GetPlayersQuery, Player, PlayerFilter, PlayerPatch};
use rpg_interface::players::service::PlayersServiceHandle;

use crate::extractors::JsonBody;

pub struct PlayersRouter;

impl PlayersRouter {
    pub fn new(service_registry: ServiceRegistry) -> Router {
        Router::new()
            .route(
                "/players",
                get(Self::get_players).post(Self::create_player),
            )
            .route("/players/count", get(Self::count_players))
            .route(
                "/players/:id",
                get(Self::get_player)
                    .post(Self::update_player)
                    .delete(Self::delete_player),
            )
            .with_state(service_registry)
    }

    /// List the players matching the filters, sorted and paginated.
    async fn get_players(
        State(players_service): State<PlayersServiceHandle>,
        Query(params): Query<GetPlayersQuery>,
    ) -> Result<Json<Vec<Player>>> {
        players_service.list_players(params).await.map(Json)
    }

    async fn count_players(
        State(players_service): State<PlayersServiceHandle>,
        Query(filter): Query<PlayerFilter>,
    ) -> Result<Json<usize>> {
        players_service.count_players(&filter).await.map(Json)
    }

    async fn create_player(
        State(players_service): State<PlayersServiceHandle>,
        JsonBody(body): JsonBody<PlayerPatch>,
    ) -> Result<Json<Player>> {
        players_service.create_player(body).await.map(Json)
    }

    async fn get_player(
        State(players_service): State<PlayersServiceHandle>,
        Path(id): Path<String>,
    ) -> Result<Json<Player>> {
        Self::find_player(&players_service, &id).await.map(Json)
    }

    async fn update_player(
        State(players_service): State<PlayersServiceHandle>,
        Path(id): Path<String>,
        JsonBody(body): JsonBody<PlayerPatch>,
    ) -> Result<Json<Player>> {
        let player = Self::find_player(&players_service, &id).await?;

        players_service.update_player(player, body).await.map(Json)
    }

    async fn delete_player(
        State(players_service): State<PlayersServiceHandle>,
        Path(id): Path<String>,
    ) -> Result<()> {
        let player = Self::find_player(&players_service, &id).await?;

        players_service.delete_player(&player).await
    }

    // Ids are positive integers, anything else is rejected before the lookup.
    async fn find_player(players_service: &PlayersServiceHandle, id: &str) -> Result<Player> {
        let id = id
            .parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .ok_or_else(|| AppError::invalid_argument(format!("'{id}' is not a valid player id")))?;

        players_service
            .get_player(id)
            .await?
            .ok_or_else(|| AppError::NotFound {
                msg: format!("No player found with id '{}'", id),
            })
    }
}
