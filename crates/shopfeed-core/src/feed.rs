//! Google Shopping feed item model.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One feed record, describing a single purchasable variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItem {
    /// Variant code.
    pub id: String,
    /// Parent product code; groups the variants of one product.
    pub item_group_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Absolute URL of the product page in the requested locale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Absolute URL of the product's primary image thumbnail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_link: Option<String>,
    pub availability: Availability,
    /// Regular price. Holds the pre-discount price while a sale is active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    /// Discounted price; only set when an original price exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<Price>,
    pub condition: Condition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gtin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mpn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    #[serde(rename = "in stock")]
    InStock,
    #[serde(rename = "out of stock")]
    OutOfStock,
    #[serde(rename = "preorder")]
    Preorder,
}

impl Availability {
    #[must_use]
    pub fn from_stock(available: bool) -> Self {
        if available {
            Availability::InStock
        } else {
            Availability::OutOfStock
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Availability::InStock => "in stock",
            Availability::OutOfStock => "out of stock",
            Availability::Preorder => "preorder",
        }
    }
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decoded through [`FromStr`], so unknown labels surface as
/// [`ConditionParseError`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Condition {
    #[default]
    New,
    Refurbished,
    Used,
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Condition::New => write!(f, "new"),
            Condition::Refurbished => write!(f, "refurbished"),
            Condition::Used => write!(f, "used"),
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown condition \"{0}\"; expected new, refurbished or used")]
pub struct ConditionParseError(pub String);

impl FromStr for Condition {
    type Err = ConditionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Condition::New),
            "refurbished" => Ok(Condition::Refurbished),
            "used" => Ok(Condition::Used),
            other => Err(ConditionParseError(other.to_string())),
        }
    }
}

impl TryFrom<String> for Condition {
    type Error = ConditionParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A money amount in integer minor units plus an ISO 4217 currency code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    pub amount: i64,
    pub currency: String,
}

impl Price {
    #[must_use]
    pub fn new(amount: i64, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
        }
    }

    /// The amount in major units with two decimal places, e.g. `1000` → `10.00`.
    #[must_use]
    pub fn major_units(&self) -> Decimal {
        Decimal::new(self.amount, 2)
    }
}

/// Renders the feed text form, e.g. `"10.00 USD"`.
impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.major_units(), self.currency)
    }
}
