//! Feed configuration

use std::path::PathBuf;

use clap::{Args, Parser};

use crate::brand::Brand;

/// Log output format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    #[default]
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Storefront settings shared by every feed run.
#[derive(Debug, Clone, Args)]
pub struct FeedSettings {
    /// Storefront base URL used for channel and product links
    #[arg(
        long,
        env = "STOREFRONT_BASE_URL",
        default_value = "https://electromatt.co.ke"
    )]
    pub base_url: String,

    /// Brand the feed is published under
    #[arg(long, env = "STOREFRONT_BRAND", value_enum, default_value_t = Brand::Electromatt)]
    pub brand: Brand,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            base_url: "https://electromatt.co.ke".to_string(),
            brand: Brand::default(),
        }
    }
}

/// `catalog-feed` configuration
#[derive(Debug, Parser)]
#[command(
    name = "catalog-feed",
    about = "Generate the shopping feed for a product fixture set",
    long_about = None
)]
pub struct CatalogFeedConfig {
    /// Fixture base directory
    #[arg(long, default_value = "./fixtures")]
    pub fixtures: PathBuf,

    /// Product fixture set name
    #[arg(short, long, default_value = "storefront")]
    pub set: String,

    /// Write the feed to this file instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Storefront settings
    #[command(flatten)]
    pub feed: FeedSettings,

    /// Logging settings
    #[command(flatten)]
    pub logging: LoggingConfig,
}

impl CatalogFeedConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}
