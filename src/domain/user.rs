use crate::repository::Entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub profile_picture: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub prayer_streak: u32,
    pub charity_total: f64,
    /// Free-form reading progress, keyed by whatever the client tracks (surah, juz, ...).
    pub quran_progress: BTreeMap<String, Value>,
}

impl User {
    pub fn new(id: String, email: String, full_name: String, created_at: DateTime<Utc>) -> Self {
        User {
            id,
            email,
            full_name,
            is_active: true,
            created_at,
            profile_picture: None,
            bio: None,
            location: None,
            prayer_streak: 0,
            charity_total: 0.0,
            quran_progress: BTreeMap::new(),
        }
    }
}

impl Entity for User {
    fn id(&self) -> &str {
        &self.id
    }
}

/// The profile fields a user may change about themselves. Absent fields are left untouched.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub profile_picture: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
}

impl ProfileUpdate {
    /// Checks the update on its own, before it is applied to any user.
    pub fn validated(self) -> Result<Self, ProfileUpdateError> {
        if self.full_name.as_deref().is_some_and(|name| name.trim().is_empty()) {
            return Err(ProfileUpdateError::BlankFullName);
        }
        Ok(self)
    }

    pub fn apply_to(self, user: &mut User) {
        if let Some(full_name) = self.full_name {
            user.full_name = full_name.trim().to_string();
        }
        if self.profile_picture.is_some() {
            user.profile_picture = self.profile_picture;
        }
        if self.bio.is_some() {
            user.bio = self.bio;
        }
        if self.location.is_some() {
            user.location = self.location;
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ProfileUpdateError {
    #[error("full_name must not be blank")]
    BlankFullName,
}
