//! Startup configuration: metrics source and the repository to plot first.

use bevy::prelude::*;

use metrics::config::{MetricsConfig, DEFAULT_REPOSITORY};

/// Repository plotted once the scene is ready.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct InitialRepository(pub String);

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub metrics: MetricsConfig,
    pub repository: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            metrics: MetricsConfig::default(),
            repository: DEFAULT_REPOSITORY.to_string(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use clap::Parser;

    use super::AppConfig;
    use metrics::config::{DEFAULT_ASSETS_ROOT, DEFAULT_REPOSITORY};

    #[derive(Parser, Debug)]
    #[command(name = "codecity", about = "Explore a Go repository as a 3D city")]
    pub struct Cli {
        /// Repository to plot at startup, e.g. github.com/spf13/cobra
        #[arg(default_value = DEFAULT_REPOSITORY)]
        pub repository: String,

        /// Metrics API endpoint [default: $CODECITY_API_URL, then http://localhost:4000/api]
        #[arg(long)]
        pub api_url: Option<String>,

        /// Directory holding static example metrics
        #[arg(long, default_value = DEFAULT_ASSETS_ROOT)]
        pub assets: String,
    }

    impl Cli {
        pub fn into_config(self) -> AppConfig {
            let mut config = AppConfig::default();
            if let Some(url) = self.api_url.filter(|u| !u.trim().is_empty()) {
                config.metrics.api_endpoint = url;
            }
            config.metrics.assets_root = self.assets;
            config.repository = self.repository;
            config
        }
    }

    pub fn load() -> AppConfig {
        Cli::parse().into_config()
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn defaults_plot_gocity() {
            let cli = Cli::try_parse_from(["codecity"]).unwrap();
            assert_eq!(cli.repository, DEFAULT_REPOSITORY);
            assert_eq!(cli.assets, DEFAULT_ASSETS_ROOT);
            assert_eq!(cli.api_url, None);
        }

        #[test]
        fn flags_override_config() {
            let cli = Cli::try_parse_from([
                "codecity",
                "github.com/spf13/cobra",
                "--api-url",
                "http://metrics.internal/api",
                "--assets",
                "/srv/codecity",
            ])
            .unwrap();
            let config = cli.into_config();
            assert_eq!(config.repository, "github.com/spf13/cobra");
            assert_eq!(config.metrics.api_endpoint, "http://metrics.internal/api");
            assert_eq!(config.metrics.assets_root, "/srv/codecity");
        }

        #[test]
        fn blank_api_url_is_ignored() {
            let cli = Cli::try_parse_from(["codecity", "--api-url", " "]).unwrap();
            let config = cli.into_config();
            assert_eq!(config.metrics, metrics::config::MetricsConfig::default());
        }
    }
}

/// Parse the command line.
#[cfg(not(target_arch = "wasm32"))]
pub fn load() -> AppConfig {
    cli::load()
}

/// In the browser the route hash picks the repository; the API and assets
/// are served next to the page.
#[cfg(target_arch = "wasm32")]
pub fn load() -> AppConfig {
    let mut config = AppConfig::default();
    if let Some(repository) = crate::web_route::initial_repository() {
        config.repository = repository.to_string();
    }
    config
}
