use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use wishlist_core::wishes::{self as core_wishes, FlagInput, PriceInput, WishInput};

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
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

impl From<core_wishes::Wish> for Wish {
    fn from(w: core_wishes::Wish) -> Self {
        Self {
            id: w.id,
            title: w.title,
            description: w.description,
            price: w.price,
            currency: w.currency,
            image: w.image,
            link: w.link,
            owner: w.owner,
            bought: w.bought,
            created_at: w.created_at,
        }
    }
}

/// JSON body for create and update. Every field is optional; on update an
/// absent field keeps its stored value.
#[derive(Deserialize, ToSchema, Debug, Default)]
pub struct WishPayload {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Number or numeric string; `""` means no price.
    #[serde(default)]
    #[schema(value_type = Option<String>)]
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
    #[schema(value_type = Option<bool>)]
    pub bought: Option<FlagInput>,
}

impl From<WishPayload> for WishInput {
    fn from(p: WishPayload) -> Self {
        Self {
            title: p.title,
            description: p.description,
            price: p.price,
            currency: p.currency,
            image: p.image,
            link: p.link,
            owner: p.owner,
            bought: p.bought,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct DeleteResponse {
    pub deleted: bool,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct UploadResponse {
    pub url: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct RestoreResponse {
    pub ok: bool,
    pub added: usize,
}
