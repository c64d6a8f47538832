use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use wishlist_core::errors::Error;
use wishlist_core::wishes::{NewWish, Wish, WishPatch, WishRepositoryTrait};
use wishlist_core::Result;

use super::model::{NewWishDB, WishChangesetDB, WishDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::wishes;
use crate::schema::wishes::dsl::*;

pub struct WishRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl WishRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        WishRepository { pool, writer }
    }
}

fn not_found(wish_id: i32) -> Error {
    Error::NotFound(format!("Wish {} not found", wish_id))
}

fn find_wish(conn: &mut SqliteConnection, wish_id: i32) -> Result<Wish> {
    wishes
        .find(wish_id)
        .select(WishDB::as_select())
        .first::<WishDB>(conn)
        .optional()
        .map_err(StorageError::from)?
        .map(Wish::from)
        .ok_or_else(|| not_found(wish_id))
}

fn insert_wish(conn: &mut SqliteConnection, new_wish: NewWish) -> Result<Wish> {
    let new_wish_db: NewWishDB = new_wish.into();
    let inserted = diesel::insert_into(wishes::table)
        .values(&new_wish_db)
        .returning(WishDB::as_returning())
        .get_result(conn)
        .map_err(StorageError::from)?;
    Ok(Wish::from(inserted))
}

#[async_trait]
impl WishRepositoryTrait for WishRepository {
    fn list(&self) -> Result<Vec<Wish>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = wishes
            .select(WishDB::as_select())
            .order((created_at.desc(), id.desc()))
            .load::<WishDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Wish::from).collect())
    }

    fn get_by_id(&self, wish_id: i32) -> Result<Wish> {
        let mut conn = get_connection(&self.pool)?;
        find_wish(&mut conn, wish_id)
    }

    async fn insert(&self, new_wish: NewWish) -> Result<Wish> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Wish> {
                insert_wish(conn, new_wish)
            })
            .await
    }

    async fn update(&self, wish_id: i32, patch: WishPatch) -> Result<Wish> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Wish> {
                // Diesel rejects an UPDATE with no columns
                if patch.is_empty() {
                    return find_wish(conn, wish_id);
                }
                let changes: WishChangesetDB = patch.into();
                let affected = diesel::update(wishes.find(wish_id))
                    .set(&changes)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if affected == 0 {
                    return Err(not_found(wish_id));
                }
                find_wish(conn, wish_id)
            })
            .await
    }

    async fn delete(&self, wish_id: i32) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(wishes.find(wish_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    async fn insert_many(&self, new_wishes: Vec<NewWish>) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let mut inserted = 0;
                for new_wish in new_wishes {
                    let new_wish_db: NewWishDB = new_wish.into();
                    inserted += diesel::insert_into(wishes::table)
                        .values(&new_wish_db)
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }
                Ok(inserted)
            })
            .await
    }
}
