//! Wire types for the blog API.
//!
//! The server speaks Mongo-flavored JSON: `_id` identifiers and camelCase
//! field names. Unknown fields are ignored so server-side additions don't
//! break decoding.

use serde::Deserialize;

/// The authenticated user's own record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub email: String,
    /// Relative path to the profile image, if one was uploaded at signup.
    #[serde(default)]
    pub profile_image: Option<String>,
}

/// Post author as embedded in a `BlogPost`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub profile_image: Option<String>,
}

/// A blog post as returned by the server.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    /// Relative path to the post image; resolve against the API base for display.
    pub image_url: String,
    #[serde(default)]
    pub author: Option<Author>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Response body of POST /users/login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Error body the server sends alongside non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_post_with_author() {
        let json = r#"{
            "_id": "65a1",
            "title": "Hello",
            "description": "World",
            "imageUrl": "uploads/hello.png",
            "author": { "_id": "u1", "username": "ada", "profileImage": "/uploads/ada.png" },
            "createdAt": "2024-01-15T10:30:00.000Z",
            "__v": 0
        }"#;
        let post: BlogPost = serde_json::from_str(json).unwrap();
        assert_eq!(post.id, "65a1");
        assert_eq!(post.image_url, "uploads/hello.png");
        assert_eq!(post.author.unwrap().username, "ada");
    }

    #[test]
    fn decodes_user_without_profile_image() {
        let json = r#"{ "_id": "u1", "username": "ada", "email": "ada@example.com" }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.profile_image, None);
    }
}
