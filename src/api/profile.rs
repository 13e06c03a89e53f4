use crate::api::{ApiError, AppState};
use crate::auth::CurrentUser;
use crate::domain::{ProfileUpdate, User};
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument};

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    message: &'static str,
}

pub async fn profile_handler(CurrentUser(user): CurrentUser) -> Json<User> {
    Json(user)
}

#[instrument(skip_all)]
pub async fn update_profile_handler(
    CurrentUser(user): CurrentUser,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ProfileUpdate>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(update) = payload.map_err(|e| ApiError::MalformedPayload(e.body_text()))?;

    let update = update.validated()?;
    info!(user_id = %user.id, "👤 Updating profile");
    state.users.update(&user.id, Box::new(move |stored: &mut User| update.apply_to(stored))).await?;

    Ok(Json(MessageResponse {
        message: "Profile updated successfully",
    }))
}

#[cfg(test)]
mod tests {
    use crate::api::test_server::spawn_server;
    use pretty_assertions::assert_eq;
    use reqwest::StatusCode;
    use serde_json::{Value, json};

    #[tokio::test]
    async fn profile_returns_the_authenticated_user() {
        let server = spawn_server().await;

        let response = server.get("/api/user/profile").await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.json::<Value>().await.unwrap();
        assert_eq!(body["id"], "user-1");
        assert_eq!(body["email"], "amina@example.com");
        assert_eq!(body["full_name"], "Amina");
        assert_eq!(body["is_active"], true);
        assert_eq!(body["bio"], Value::Null);
        assert_eq!(body["profile_picture"], Value::Null);
        assert_eq!(body["quran_progress"], json!({}));
        assert!(body["created_at"].is_string(), "Expected created_at to be a timestamp, but got {}", body["created_at"]);
    }

    #[tokio::test]
    async fn update_profile_changes_the_stored_user() {
        let server = spawn_server().await;

        let response = server
            .put_json("/api/user/profile", &json!({ "bio": "Volunteer at the food bank", "location": "Rotterdam" }))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.json::<Value>().await.unwrap(), json!({ "message": "Profile updated successfully" }));

        let profile = server.get("/api/user/profile").await.unwrap().json::<Value>().await.unwrap();
        assert_eq!(profile["bio"], "Volunteer at the food bank");
        assert_eq!(profile["location"], "Rotterdam");
        assert_eq!(profile["full_name"], "Amina");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_updates_of_different_fields_are_all_kept() {
        let server = spawn_server().await;

        for round in 0..50 {
            let bio = json!({ "bio": format!("bio-{round}") });
            let location = json!({ "location": format!("location-{round}") });

            let (bio_response, location_response) = tokio::join!(server.put_json("/api/user/profile", &bio), server.put_json("/api/user/profile", &location));

            assert_eq!(bio_response.unwrap().status(), StatusCode::OK);
            assert_eq!(location_response.unwrap().status(), StatusCode::OK);
            let profile = server.get("/api/user/profile").await.unwrap().json::<Value>().await.unwrap();
            assert_eq!((&profile["bio"], &profile["location"]), (&bio["bio"], &location["location"]), "lost an update in round {round}");
        }
    }

    #[tokio::test]
    async fn update_profile_rejects_fields_that_are_not_editable() {
        let server = spawn_server().await;

        let response = server.put_json("/api/user/profile", &json!({ "email": "other@example.com" })).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let profile = server.get("/api/user/profile").await.unwrap().json::<Value>().await.unwrap();
        assert_eq!(profile["email"], "amina@example.com");
    }

    #[tokio::test]
    async fn update_profile_rejects_a_blank_name() {
        let server = spawn_server().await;

        let response = server.put_json("/api/user/profile", &json!({ "full_name": "  " })).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = response.json::<Value>().await.unwrap();
        assert_eq!(body["detail"], "invalid profile: full_name must not be blank");
    }

    #[tokio::test]
    async fn profile_requires_a_valid_token() {
        let server = spawn_server().await;

        let response = server.get_anonymous("/api/user/profile").await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.json::<Value>().await.unwrap(), json!({ "detail": "could not validate credentials" }));
    }
}
