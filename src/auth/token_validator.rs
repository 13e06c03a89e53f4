use crate::app_config::ConfiguredUser;
use async_trait::async_trait;
use std::collections::HashMap;

/// Resolves bearer tokens to the id of the user they were issued to.
#[async_trait]
pub trait TokenValidator: Send + Sync {
    async fn validate(&self, token: &str) -> Option<String>;
}

/// A [`TokenValidator`] backed by a fixed table of tokens.
#[derive(Debug, Default)]
pub struct StaticTokenValidator {
    tokens: HashMap<String, String>,
}

impl StaticTokenValidator {
    pub fn new(tokens: impl IntoIterator<Item = (String, String)>) -> Self {
        StaticTokenValidator {
            tokens: tokens.into_iter().collect(),
        }
    }

    pub fn from_users(users: &[ConfiguredUser]) -> Self {
        Self::new(users.iter().map(|user| (user.token().to_owned(), user.id().to_owned())))
    }
}

#[async_trait]
impl TokenValidator for StaticTokenValidator {
    async fn validate(&self, token: &str) -> Option<String> {
        self.tokens.get(token).cloned()
    }
}
