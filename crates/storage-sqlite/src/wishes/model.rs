//! Database models for wishes.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use wishlist_core::constants::{DEFAULT_CURRENCY, DEFAULT_OWNER};
use wishlist_core::wishes::{NewWish, Wish, WishPatch};

/// Database model for wishes.
///
/// Every column except `id` and `title` is nullable so that databases created
/// before owners and the bought flag existed still load.
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::wishes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct WishDB {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub image: Option<String>,
    pub link: Option<String>,
    pub owner: Option<String>,
    pub bought: Option<bool>,
    pub created_at: Option<NaiveDateTime>,
}

/// Database model for creating a new wish
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::wishes)]
pub struct NewWishDB {
    pub title: String,
    pub description: String,
    pub price: Option<f64>,
    pub currency: String,
    pub image: String,
    pub link: String,
    pub owner: String,
    pub bought: bool,
    pub created_at: NaiveDateTime,
}

/// Coalescing changeset: `None` fields are left out of the UPDATE.
#[derive(AsChangeset, Debug, Clone, Default)]
#[diesel(table_name = crate::schema::wishes)]
pub struct WishChangesetDB {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub image: Option<String>,
    pub link: Option<String>,
    pub owner: Option<String>,
    pub bought: Option<bool>,
}

fn or_default(value: Option<String>, default: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => default.to_string(),
    }
}

impl From<WishDB> for Wish {
    fn from(db: WishDB) -> Self {
        Self {
            id: db.id,
            title: db.title,
            description: db.description.unwrap_or_default(),
            price: db.price,
            currency: or_default(db.currency, DEFAULT_CURRENCY),
            image: db.image.unwrap_or_default(),
            link: db.link.unwrap_or_default(),
            owner: or_default(db.owner, DEFAULT_OWNER),
            bought: db.bought.unwrap_or(false),
            created_at: db.created_at,
        }
    }
}

impl From<NewWish> for NewWishDB {
    fn from(domain: NewWish) -> Self {
        Self {
            title: domain.title,
            description: domain.description,
            price: domain.price,
            currency: domain.currency,
            image: domain.image,
            link: domain.link,
            owner: domain.owner,
            bought: domain.bought,
            created_at: domain
                .created_at
                .unwrap_or_else(|| chrono::Utc::now().naive_utc()),
        }
    }
}

impl From<WishPatch> for WishChangesetDB {
    fn from(patch: WishPatch) -> Self {
        Self {
            title: patch.title,
            description: patch.description,
            price: patch.price,
            currency: patch.currency,
            image: patch.image,
            link: patch.link,
            owner: patch.owner,
            bought: patch.bought,
        }
    }
}
