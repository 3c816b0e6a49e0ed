use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// A sales context (storefront) with its own currency and pricing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Channel {
    pub code: String,
    /// ISO 4217 code prices in this channel are expressed in.
    #[serde(default)]
    pub base_currency: Option<String>,
    #[serde(default)]
    pub hostname: Option<String>,
    /// Locale codes enabled for this channel.
    #[serde(default)]
    pub locales: Vec<String>,
}

impl Channel {
    /// Returns `true` if `locale_code` is enabled for this channel. A channel
    /// with no locales listed accepts every locale.
    #[must_use]
    pub fn supports_locale(&self, locale_code: &str) -> bool {
        self.locales.is_empty() || self.locales.iter().any(|l| l == locale_code)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locale {
    #[serde(default)]
    pub code: Option<String>,
}

impl Locale {
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChannelsFile {
    pub channels: Vec<Channel>,
}

impl ChannelsFile {
    /// Looks up a channel by its exact code.
    #[must_use]
    pub fn channel(&self, code: &str) -> Option<&Channel> {
        self.channels.iter().find(|c| c.code == code)
    }
}

/// Load and validate the channel catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_channels(path: &Path) -> Result<ChannelsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_channels(&content)
}

fn parse_channels(content: &str) -> Result<ChannelsFile, ConfigError> {
    let channels_file: ChannelsFile = serde_yaml::from_str(content)?;
    validate_channels(&channels_file)?;
    Ok(channels_file)
}

fn validate_channels(channels_file: &ChannelsFile) -> Result<(), ConfigError> {
    let mut seen_codes = HashSet::new();

    for channel in &channels_file.channels {
        if channel.code.trim().is_empty() {
            return Err(ConfigError::Validation(
                "channel code must be non-empty".to_string(),
            ));
        }

        if !seen_codes.insert(channel.code.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate channel code: '{}'",
                channel.code
            )));
        }

        if let Some(currency) = &channel.base_currency {
            if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_uppercase()) {
                return Err(ConfigError::Validation(format!(
                    "channel '{}' has invalid base currency '{currency}'; expected ISO 4217 code like USD",
                    channel.code
                )));
            }
        }

        if channel.locales.iter().any(|l| l.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "channel '{}' lists an empty locale code",
                channel.code
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "channels_test.rs"]
mod tests;
