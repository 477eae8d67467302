use rpg_infrastructure::{services::ServiceRegistry, settings::Settings};

use rpg_routing::router::ApplicationController;

#[tokio::main]
async fn main() {
    let settings = Settings::new().expect("Could not parse settings");

    let services = ServiceRegistry::from_settings(&settings)
        .await
        .expect("Could not initialize the player store");

    ApplicationController::run(settings, services).await;
}
