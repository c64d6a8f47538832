//! Wish domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CURRENCY, DEFAULT_OWNER};

/// Domain model representing a stored wishlist entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Wish {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub price: Option<f64>,
    pub currency: String,
    pub image: String,
    pub link: String,
    pub owner: String,
    pub bought: bool,
    pub created_at: Option<NaiveDateTime>,
}

/// A price as sent by a client: forms send text, JSON clients send numbers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PriceInput {
    Number(f64),
    Text(String),
}

/// A boolean flag as sent by a client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FlagInput {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl FlagInput {
    /// Loose truthiness used for the `bought` flag.
    pub fn is_truthy(&self) -> bool {
        match self {
            FlagInput::Bool(b) => *b,
            FlagInput::Number(n) => *n != 0.0 && !n.is_nan(),
            FlagInput::Text(s) => {
                let s = s.trim();
                !(s.is_empty()
                    || s == "0"
                    || s.eq_ignore_ascii_case("false")
                    || s.eq_ignore_ascii_case("off")
                    || s.eq_ignore_ascii_case("no"))
            }
        }
    }
}

/// Raw, untrusted field set for create and update requests
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WishInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<PriceInput>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub bought: Option<FlagInput>,
}

/// Normalized record ready for insertion
#[derive(Debug, Clone, PartialEq)]
pub struct NewWish {
    pub title: String,
    pub description: String,
    pub price: Option<f64>,
    pub currency: String,
    pub image: String,
    pub link: String,
    pub owner: String,
    pub bought: bool,
    /// `None` stamps the row with the current time.
    pub created_at: Option<NaiveDateTime>,
}

/// Normalized partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WishPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub image: Option<String>,
    pub link: Option<String>,
    pub owner: Option<String>,
    pub bought: Option<bool>,
}

impl WishPatch {
    pub fn is_empty(&self) -> bool {
        self == &WishPatch::default()
    }
}

/// Values applied to fields a creation payload leaves blank
#[derive(Debug, Clone, PartialEq)]
pub struct WishDefaults {
    pub currency: String,
    pub owner: String,
}

impl WishDefaults {
    /// Builds defaults from the household member list; the first member owns
    /// wishes created without an owner.
    pub fn new(currency: impl Into<String>, owners: &[String]) -> Self {
        let owner = owners
            .iter()
            .map(|o| o.trim())
            .find(|o| !o.is_empty())
            .unwrap_or(DEFAULT_OWNER)
            .to_string();
        let currency = currency.into();
        let currency = if currency.trim().is_empty() {
            DEFAULT_CURRENCY.to_string()
        } else {
            currency.trim().to_string()
        };
        Self { currency, owner }
    }
}

impl Default for WishDefaults {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            owner: DEFAULT_OWNER.to_string(),
        }
    }
}
