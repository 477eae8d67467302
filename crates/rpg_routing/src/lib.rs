pub mod endpoints {
    pub mod players_endpoints;
}
pub mod extractors;
pub mod logger;
pub mod router;
