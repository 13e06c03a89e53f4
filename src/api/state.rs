use crate::app_config::AppConfig;
use crate::auth::{StaticTokenValidator, TokenValidator};
use crate::domain::{Mosque, User};
use crate::repository::{InMemoryRepository, Repository};
use chrono::Utc;
use std::sync::Arc;
use tracing::warn;

/// Everything the request handlers share.
pub struct AppState {
    pub mosques: Box<dyn Repository<Mosque>>,
    pub users: Box<dyn Repository<User>>,
    pub token_validator: Box<dyn TokenValidator>,
    pub default_radius_km: f64,
}

impl AppState {
    /// Builds in-memory state seeded with `mosques` and the configured users.
    pub async fn from_config(config: &AppConfig, mosques: Vec<Mosque>) -> Arc<Self> {
        let users = InMemoryRepository::new();
        let now = Utc::now();
        for user in config.users() {
            let user = User::new(user.id().to_owned(), user.email().to_owned(), user.full_name().to_owned(), now);
            if let Err(e) = users.insert(user).await {
                warn!("⚠️ Skipping configured user: {}", e);
            }
        }

        Arc::new(AppState {
            mosques: Box::new(InMemoryRepository::with_entities(mosques)),
            users: Box::new(users),
            token_validator: Box::new(StaticTokenValidator::from_users(config.users())),
            default_radius_km: config.maps().default_radius_km(),
        })
    }
}
