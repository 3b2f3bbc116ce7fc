//! Async effect handlers.
//!
//! Pure async functions: each performs one API round-trip and returns the
//! `UiEvent` carrying its result. The runtime wraps them in the task
//! lifecycle; no handler touches UI state.
//!
//! Protected calls read the token from the store at call time, not at
//! spawn time, so a logout between spawn and send is honored.

use std::path::PathBuf;

use quill_core::api::{ApiClient, ApiError, ImageUpload};
use quill_core::session::SessionStore;

use crate::events::{AuthUiEvent, PostsUiEvent, ProfileUiEvent, UiEvent};

const NO_TOKEN: &str = "No token found";

pub async fn login(client: ApiClient, email: String, password: String) -> UiEvent {
    let result = client.login(&email, &password).await;
    UiEvent::Auth(AuthUiEvent::LoginFinished(result))
}

pub async fn signup(
    client: ApiClient,
    username: String,
    email: String,
    password: String,
    profile_image: Option<PathBuf>,
) -> UiEvent {
    let image = match profile_image {
        Some(path) => match ImageUpload::from_path(&path).await {
            Ok(image) => Some(image),
            Err(error) => {
                return UiEvent::Auth(AuthUiEvent::SignupFinished(Err(ApiError::Validation(
                    format!("{error:#}"),
                ))));
            }
        },
        None => None,
    };
    let result = client.signup(&username, &email, &password, image).await;
    UiEvent::Auth(AuthUiEvent::SignupFinished(result))
}

pub async fn fetch_profile(client: ApiClient, session: SessionStore) -> UiEvent {
    let Some(token) = session.get() else {
        return UiEvent::Profile(ProfileUiEvent::Failed(NO_TOKEN.to_string()));
    };
    match client.fetch_profile(&token).await {
        Ok(user) => UiEvent::Profile(ProfileUiEvent::Loaded(user)),
        Err(error) => UiEvent::Profile(ProfileUiEvent::Failed(error.message().to_string())),
    }
}

pub async fn fetch_posts(client: ApiClient, session: SessionStore) -> UiEvent {
    let Some(token) = session.get() else {
        return UiEvent::Posts(PostsUiEvent::ListFailed(NO_TOKEN.to_string()));
    };
    match client.list_posts(&token).await {
        Ok(posts) => UiEvent::Posts(PostsUiEvent::Listed(posts)),
        Err(error) => UiEvent::Posts(PostsUiEvent::ListFailed(error.message().to_string())),
    }
}

pub async fn create_post(
    client: ApiClient,
    session: SessionStore,
    title: String,
    description: String,
    image: PathBuf,
) -> UiEvent {
    let Some(token) = session.get() else {
        return UiEvent::Posts(PostsUiEvent::SaveFailed(NO_TOKEN.to_string()));
    };
    let image = match ImageUpload::from_path(&image).await {
        Ok(image) => image,
        Err(error) => {
            return UiEvent::Posts(PostsUiEvent::SaveFailed(format!("{error:#}")));
        }
    };
    match client.create_post(&token, &title, &description, image).await {
        Ok(_) => UiEvent::Posts(PostsUiEvent::Saved { created: true }),
        Err(error) => UiEvent::Posts(PostsUiEvent::SaveFailed(error.message().to_string())),
    }
}

pub async fn update_post(
    client: ApiClient,
    session: SessionStore,
    id: String,
    title: String,
    description: String,
    image: Option<PathBuf>,
) -> UiEvent {
    let Some(token) = session.get() else {
        return UiEvent::Posts(PostsUiEvent::SaveFailed(NO_TOKEN.to_string()));
    };
    let image = match image {
        Some(path) => match ImageUpload::from_path(&path).await {
            Ok(image) => Some(image),
            Err(error) => {
                return UiEvent::Posts(PostsUiEvent::SaveFailed(format!("{error:#}")));
            }
        },
        None => None,
    };
    match client
        .update_post(&token, &id, &title, &description, image)
        .await
    {
        Ok(_) => UiEvent::Posts(PostsUiEvent::Saved { created: false }),
        Err(error) => UiEvent::Posts(PostsUiEvent::SaveFailed(error.message().to_string())),
    }
}

pub async fn delete_post(client: ApiClient, session: SessionStore, id: String) -> UiEvent {
    let Some(token) = session.get() else {
        return UiEvent::Posts(PostsUiEvent::DeleteFailed(NO_TOKEN.to_string()));
    };
    match client.delete_post(&token, &id).await {
        Ok(()) => UiEvent::Posts(PostsUiEvent::Deleted),
        Err(error) => UiEvent::Posts(PostsUiEvent::DeleteFailed(error.message().to_string())),
    }
}
