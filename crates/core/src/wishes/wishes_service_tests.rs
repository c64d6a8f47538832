//! Tests for the wish service against an in-memory repository.

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::sync::{Arc, Mutex};

use crate::errors::{Error, Result};
use crate::wishes::{
    FlagInput, NewWish, PriceInput, Wish, WishDefaults, WishInput, WishPatch,
    WishRepositoryTrait, WishService, WishServiceTrait,
};

// --- Mock WishRepository ---
#[derive(Clone, Default)]
pub(crate) struct MockWishRepository {
    rows: Arc<Mutex<Vec<Wish>>>,
    writes: Arc<Mutex<usize>>,
}

impl MockWishRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn write_count(&self) -> usize {
        *self.writes.lock().unwrap()
    }

    fn clock(tick: usize) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            + Duration::seconds(tick as i64)
    }

    fn store(rows: &mut Vec<Wish>, new_wish: NewWish) -> Wish {
        let id = rows.iter().map(|w| w.id).max().unwrap_or(0) + 1;
        let wish = Wish {
            id,
            title: new_wish.title,
            description: new_wish.description,
            price: new_wish.price,
            currency: new_wish.currency,
            image: new_wish.image,
            link: new_wish.link,
            owner: new_wish.owner,
            bought: new_wish.bought,
            created_at: Some(new_wish.created_at.unwrap_or_else(|| Self::clock(id as usize))),
        };
        rows.push(wish.clone());
        wish
    }
}

#[async_trait]
impl WishRepositoryTrait for MockWishRepository {
    fn list(&self) -> Result<Vec<Wish>> {
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    fn get_by_id(&self, wish_id: i32) -> Result<Wish> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|w| w.id == wish_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Wish {} not found", wish_id)))
    }

    async fn insert(&self, new_wish: NewWish) -> Result<Wish> {
        *self.writes.lock().unwrap() += 1;
        Ok(Self::store(&mut self.rows.lock().unwrap(), new_wish))
    }

    async fn update(&self, wish_id: i32, patch: WishPatch) -> Result<Wish> {
        *self.writes.lock().unwrap() += 1;
        let mut rows = self.rows.lock().unwrap();
        let wish = rows
            .iter_mut()
            .find(|w| w.id == wish_id)
            .ok_or_else(|| Error::NotFound(format!("Wish {} not found", wish_id)))?;
        if let Some(v) = patch.title {
            wish.title = v;
        }
        if let Some(v) = patch.description {
            wish.description = v;
        }
        if let Some(v) = patch.price {
            wish.price = Some(v);
        }
        if let Some(v) = patch.currency {
            wish.currency = v;
        }
        if let Some(v) = patch.image {
            wish.image = v;
        }
        if let Some(v) = patch.link {
            wish.link = v;
        }
        if let Some(v) = patch.owner {
            wish.owner = v;
        }
        if let Some(v) = patch.bought {
            wish.bought = v;
        }
        Ok(wish.clone())
    }

    async fn delete(&self, wish_id: i32) -> Result<usize> {
        *self.writes.lock().unwrap() += 1;
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|w| w.id != wish_id);
        Ok(before - rows.len())
    }

    async fn insert_many(&self, new_wishes: Vec<NewWish>) -> Result<usize> {
        *self.writes.lock().unwrap() += 1;
        let mut rows = self.rows.lock().unwrap();
        let count = new_wishes.len();
        for new_wish in new_wishes {
            Self::store(&mut rows, new_wish);
        }
        Ok(count)
    }
}

fn service() -> (WishService, MockWishRepository) {
    let repo = MockWishRepository::new();
    let service = WishService::new(Arc::new(repo.clone()), WishDefaults::default());
    (service, repo)
}

fn titled(title: &str) -> WishInput {
    WishInput {
        title: Some(title.to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_create_assigns_unique_ids() {
    let (service, _) = service();
    let a = service.create_wish(titled("Lego")).await.unwrap();
    let b = service.create_wish(titled("Book")).await.unwrap();
    assert_ne!(a.id, b.id);
    assert_eq!(a.owner, "Munhu");
    assert_eq!(a.currency, "MNT");
}

#[tokio::test]
async fn test_create_rejects_missing_title_without_writing() {
    let (service, repo) = service();
    let err = service.create_wish(WishInput::default()).await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(repo.write_count(), 0);
}

#[tokio::test]
async fn test_update_keeps_created_at() {
    let (service, _) = service();
    let created = service.create_wish(titled("Lego")).await.unwrap();

    let updated = service
        .update_wish(
            created.id,
            WishInput {
                title: Some("Lego Technic".into()),
                bought: Some(FlagInput::Bool(true)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.title, "Lego Technic");
    assert!(updated.bought);
    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(updated.id, created.id);
}

#[tokio::test]
async fn test_empty_patch_is_a_no_op() {
    let (service, repo) = service();
    let created = service
        .create_wish(WishInput {
            title: Some("Camera".into()),
            price: Some(PriceInput::Number(250.5)),
            link: Some("https://example.com/camera".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    let writes = repo.write_count();

    let same = service
        .update_wish(created.id, WishInput::default())
        .await
        .unwrap();
    assert_eq!(same, created);
    assert_eq!(repo.write_count(), writes);
}

#[tokio::test]
async fn test_update_unknown_id_is_not_found() {
    let (service, _) = service();
    let err = service
        .update_wish(42, titled("Nothing"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    let err = service
        .update_wish(42, WishInput::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn test_update_validates_before_lookup() {
    let (service, _) = service();
    let created = service.create_wish(titled("Lego")).await.unwrap();
    let err = service
        .update_wish(
            created.id,
            WishInput {
                price: Some(PriceInput::Text("twelve".into())),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "price must be numeric");
    assert_eq!(service.get_wish(created.id).unwrap().price, None);
}

#[tokio::test]
async fn test_delete_missing_is_zero() {
    let (service, _) = service();
    assert_eq!(service.delete_wish(7).await.unwrap(), 0);

    let created = service.create_wish(titled("Lego")).await.unwrap();
    assert_eq!(service.delete_wish(created.id).await.unwrap(), 1);
    assert!(service.list_wishes().unwrap().is_empty());
}

#[tokio::test]
async fn test_list_is_newest_first() {
    let (service, _) = service();
    let first = service.create_wish(titled("First")).await.unwrap();
    let second = service.create_wish(titled("Second")).await.unwrap();
    let third = service.create_wish(titled("Third")).await.unwrap();

    let ids: Vec<i32> = service
        .list_wishes()
        .unwrap()
        .into_iter()
        .map(|w| w.id)
        .collect();
    assert_eq!(ids, vec![third.id, second.id, first.id]);
}
