use std::net::SocketAddr;

use axum::Router;

use rpg_infrastructure::services::ServiceRegistry;
use rpg_infrastructure::settings::Settings;
use tower_http::trace::TraceLayer;

use crate::endpoints::players_endpoints::PlayersRouter;
use crate::logger;

pub struct ApplicationController;

impl ApplicationController {
    pub fn router(service_registry: ServiceRegistry) -> Router {
        Router::new()
            .nest(
                "/rest",
                Router::new().merge(PlayersRouter::new(service_registry)),
            )
            // logging so we can see whats going on
            .layer(TraceLayer::new_for_http())
    }

    pub async fn run(settings: Settings, service_registry: ServiceRegistry) {
        logger::setup(&settings.logger.level);

        let router = Self::router(service_registry);

        let listener =
            tokio::net::TcpListener::bind(&format!("127.0.0.1:{}", settings.server.port))
                .await
                .expect("Could not start the TCP listener");

        tracing::info!(
            "{} server listening on {}",
            settings.environment,
            settings.server
        );

        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .expect("Failed to start the server");
    }
}
