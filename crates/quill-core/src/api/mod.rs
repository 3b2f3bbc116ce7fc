//! HTTP client for the blog API.
//!
//! Thin wrapper over reqwest: attaches the bearer token the caller passes
//! in, encodes mutations as multipart (text fields plus an optional image
//! file), and maps responses onto the `ApiError` taxonomy. The client never
//! reads or writes the session store; callers decide what a failure means
//! for the session.

pub mod types;

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};

pub use types::{Author, BlogPost, ErrorBody, LoginResponse, User};

/// Failure taxonomy for API calls.
///
/// Components surface `message()` verbatim in a transient notice; the
/// variants exist so callers can distinguish the cases that matter (an
/// expired token vs. a validation rejection vs. the network being down).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The server rejected or no longer accepts the token (401/403).
    Unauthorized(String),
    /// The target resource does not exist (404).
    NotFound(String),
    /// The server rejected the request contents (other 4xx).
    Validation(String),
    /// The server failed outright (5xx).
    Server(String),
    /// Transport-level failure; message comes from the underlying client.
    Network(String),
    /// The response decoded to something other than the expected shape.
    Malformed(String),
}

impl ApiError {
    /// The user-facing message for this failure.
    pub fn message(&self) -> &str {
        match self {
            ApiError::Unauthorized(m)
            | ApiError::NotFound(m)
            | ApiError::Validation(m)
            | ApiError::Server(m)
            | ApiError::Network(m)
            | ApiError::Malformed(m) => m,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ApiError {}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// An image file staged for upload.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Reads the file at `path` into an upload, keeping its file name.
    pub async fn from_path(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read image {}", path.display()))?;
        let file_name = path
            .file_name()
            .map_or_else(|| "image".to_string(), |n| n.to_string_lossy().into_owned());
        Ok(Self { file_name, bytes })
    }

    fn into_part(self) -> Part {
        Part::bytes(self.bytes).file_name(self.file_name)
    }
}

/// Client for the blog API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client for the given base URL.
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The configured base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Resolves a server-relative image path against the base URL.
    pub fn resolve_image_url(&self, image_path: &str) -> String {
        format!("{}/{}", self.base_url, image_path.trim_start_matches('/'))
    }

    /// POST /users/login. Returns the bearer token.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<String> {
        let response = self
            .http
            .post(self.url("/users/login"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(network_error)?;

        let response: LoginResponse = decode(response).await?;
        if response.token.is_empty() {
            return Err(ApiError::Malformed(
                "Invalid login response from server".to_string(),
            ));
        }
        Ok(response.token)
    }

    /// POST /users/signup. Multipart; the profile image is optional.
    pub async fn signup(
        &self,
        username: &str,
        email: &str,
        password: &str,
        profile_image: Option<ImageUpload>,
    ) -> ApiResult<()> {
        let mut form = Form::new()
            .text("username", username.to_string())
            .text("email", email.to_string())
            .text("password", password.to_string());
        if let Some(image) = profile_image {
            form = form.part("profileImage", image.into_part());
        }

        let response = self
            .http
            .post(self.url("/users/signup"))
            .multipart(form)
            .send()
            .await
            .map_err(network_error)?;

        check_status(response).await.map(|_| ())
    }

    /// GET /users/profile for the token's owner.
    pub async fn fetch_profile(&self, token: &str) -> ApiResult<User> {
        let response = self
            .http
            .get(self.url("/users/profile"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(network_error)?;

        decode(response).await
    }

    /// GET /blogs. The returned order is the server's; callers keep it.
    pub async fn list_posts(&self, token: &str) -> ApiResult<Vec<BlogPost>> {
        let response = self
            .http
            .get(self.url("/blogs"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(network_error)?;

        decode(response).await
    }

    /// POST /blogs. Multipart; the image is required by the server.
    pub async fn create_post(
        &self,
        token: &str,
        title: &str,
        description: &str,
        image: ImageUpload,
    ) -> ApiResult<BlogPost> {
        let form = Form::new()
            .text("title", title.to_string())
            .text("description", description.to_string())
            .part("image", image.into_part());

        let response = self
            .http
            .post(self.url("/blogs"))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await
            .map_err(network_error)?;

        decode(response).await
    }

    /// PUT /blogs/:id. Omitting the image means "keep the existing one":
    /// no image part is sent at all.
    pub async fn update_post(
        &self,
        token: &str,
        id: &str,
        title: &str,
        description: &str,
        image: Option<ImageUpload>,
    ) -> ApiResult<BlogPost> {
        let mut form = Form::new()
            .text("title", title.to_string())
            .text("description", description.to_string());
        if let Some(image) = image {
            form = form.part("image", image.into_part());
        }

        let response = self
            .http
            .put(self.url(&format!("/blogs/{id}")))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await
            .map_err(network_error)?;

        decode(response).await
    }

    /// DELETE /blogs/:id.
    pub async fn delete_post(&self, token: &str, id: &str) -> ApiResult<()> {
        let response = self
            .http
            .delete(self.url(&format!("/blogs/{id}")))
            .bearer_auth(token)
            .send()
            .await
            .map_err(network_error)?;

        check_status(response).await.map(|_| ())
    }
}

fn network_error(e: reqwest::Error) -> ApiError {
    ApiError::Network(e.to_string())
}

/// Maps a non-success status to an `ApiError`, pulling the server's
/// `{"message": ...}` body through verbatim when present.
async fn check_status(response: reqwest::Response) -> ApiResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| format!("Request failed (HTTP {status})"));

    Err(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthorized(message),
        StatusCode::NOT_FOUND => ApiError::NotFound(message),
        s if s.is_client_error() => ApiError::Validation(message),
        _ => ApiError::Server(message),
    })
}

async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
    let response = check_status(response).await?;
    let body = response.text().await.map_err(network_error)?;
    serde_json::from_str(&body).map_err(|e| {
        tracing::error!(error = %e, "undecodable server response");
        ApiError::Malformed("Unexpected response from server".to_string())
    })
}

/// File size in bytes, for display next to a picked image.
pub fn image_file_size(path: &Path) -> Option<u64> {
    std::fs::metadata(path).ok().map(|m| m.len())
}

/// Checks that a selected image path points at a readable file.
pub fn validate_image_path(path: &Path) -> std::result::Result<PathBuf, String> {
    if path.as_os_str().is_empty() {
        return Err("Please upload an image".to_string());
    }
    if !path.is_file() {
        return Err(format!("No such file: {}", path.display()));
    }
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_image_url_joins_relative_paths() {
        let client = ApiClient::new("http://localhost:3000/");
        assert_eq!(
            client.resolve_image_url("uploads/a.png"),
            "http://localhost:3000/uploads/a.png"
        );
        assert_eq!(
            client.resolve_image_url("/uploads/a.png"),
            "http://localhost:3000/uploads/a.png"
        );
    }

    #[test]
    fn api_error_displays_its_message() {
        let err = ApiError::Validation("Title is required".to_string());
        assert_eq!(err.to_string(), "Title is required");
        assert_eq!(err.message(), "Title is required");
    }
}
