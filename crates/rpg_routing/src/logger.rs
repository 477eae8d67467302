// This module setup the logger level.

use tracing_subscriber::EnvFilter;

// RUST_LOG wins over the configured level when it is set.
pub fn setup(logger_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(logger_level)));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn default_directives(logger_level: &str) -> String {
    format!(
        "rpg_app={logger_level},rpg_infrastructure={logger_level},rpg_routing={logger_level},tower_http={logger_level}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_cover_every_crate() {
        let directives = default_directives("debug");

        assert!(directives.contains("rpg_infrastructure=debug"));
        assert!(directives.contains("tower_http=debug"));
        assert!(EnvFilter::try_new(directives).is_ok());
    }
}
