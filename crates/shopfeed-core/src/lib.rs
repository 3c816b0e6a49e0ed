pub mod app_config;
pub mod catalog;
pub mod channels;
pub mod config;
pub mod feed;

pub use app_config::{AppConfig, BaseConfig, Environment};
pub use catalog::{ChannelPricing, Product, ProductImage, ProductTranslation, Variant};
pub use channels::{load_channels, Channel, ChannelsFile, Locale};
pub use config::{load_app_config_from_env, load_base_config};
pub use feed::{Availability, Condition, ConditionParseError, FeedItem, Price};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read channel catalog {path}: {source}")]
    CatalogFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse channel catalog: {0}")]
    CatalogFileParse(#[from] serde_yaml::Error),

    #[error("channel catalog validation failed: {0}")]
    Validation(String),
}
