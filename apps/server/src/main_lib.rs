use std::sync::Arc;

use crate::{config::Config, uploads::UploadStore};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};
use wishlist_core::{
    access::PinGuard,
    interchange::{InterchangeService, InterchangeServiceTrait},
    wishes::{WishDefaults, WishService, WishServiceTrait},
};
use wishlist_storage_sqlite::{db, legacy, wishes::WishRepository};

pub struct AppState {
    pub wish_service: Arc<dyn WishServiceTrait>,
    pub interchange_service: Arc<dyn InterchangeServiceTrait>,
    pub pin_guard: PinGuard,
    pub pin_header: String,
    pub pin_header_aliases: Vec<String>,
    pub uploads: UploadStore,
    pub db_path: String,
}

pub fn init_tracing() {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;

    let imported = legacy::import_legacy_wishlist(&pool)?;
    if imported > 0 {
        tracing::info!("Imported {} wish(es) from the legacy wishlist table", imported);
    }

    let writer = db::spawn_writer((*pool).clone())?;
    let wish_repository = Arc::new(WishRepository::new(pool.clone(), writer));

    let defaults = WishDefaults::new(config.default_currency.clone(), &config.owners);
    tracing::info!(
        "New wishes default to owner '{}' and currency '{}'",
        defaults.owner,
        defaults.currency
    );
    let wish_service = Arc::new(WishService::new(wish_repository.clone(), defaults.clone()));
    let interchange_service = Arc::new(InterchangeService::new(wish_repository, defaults));

    let uploads = UploadStore::open(&config.upload_dir).await?;
    tracing::info!("Uploads directory: {}", uploads.dir().display());

    let pin_guard = PinGuard::new(config.auth_pin.clone());
    if pin_guard.is_enabled() {
        tracing::info!("PIN protection enabled (header '{}')", config.pin_header);
    } else {
        tracing::warn!("AUTH_PIN is empty; mutating routes are open");
    }

    Ok(Arc::new(AppState {
        wish_service,
        interchange_service,
        pin_guard,
        pin_header: config.pin_header.clone(),
        pin_header_aliases: config.pin_header_aliases.clone(),
        uploads,
        db_path,
    }))
}
