//! Integration tests for the blog API client against a mock server.

use quill_core::api::{ApiClient, ApiError, ImageUpload};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

fn post_json(id: &str, title: &str, description: &str) -> serde_json::Value {
    serde_json::json!({
        "_id": id,
        "title": title,
        "description": description,
        "imageUrl": format!("uploads/{id}.png"),
        "author": { "_id": "u1", "username": "ada", "profileImage": "/uploads/ada.png" },
        "createdAt": "2024-01-15T10:30:00.000Z"
    })
}

fn body_str(request: &Request) -> String {
    String::from_utf8_lossy(&request.body).into_owned()
}

#[tokio::test]
async fn login_returns_token_on_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token": "abc"
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri());
    let token = client.login("a@b.com", "x").await.unwrap();
    assert_eq!(token, "abc");

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["email"], "a@b.com");
    assert_eq!(body["password"], "x");
}

#[tokio::test]
async fn login_with_wrong_credentials_surfaces_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "message": "Invalid email or password"
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri());
    let err = client.login("a@b.com", "wrong").await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Unauthorized("Invalid email or password".to_string())
    );
}

#[tokio::test]
async fn list_posts_sends_bearer_header_and_keeps_server_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/blogs"))
        .and(header("authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            post_json("p2", "Second", "newer"),
            post_json("p1", "First", "older"),
        ])))
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri());
    let posts = client.list_posts("abc").await.unwrap();
    let ids: Vec<&str> = posts.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["p2", "p1"]);
}

#[tokio::test]
async fn list_posts_maps_401_to_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/blogs"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "message": "Token expired"
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri());
    let err = client.list_posts("stale").await.unwrap_err();
    assert_eq!(err, ApiError::Unauthorized("Token expired".to_string()));
}

#[tokio::test]
async fn create_post_sends_multipart_fields_and_image() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/blogs"))
        .and(header("authorization", "Bearer abc"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(post_json("p1", "Hello", "World")),
        )
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri());
    let image = ImageUpload {
        file_name: "hello.png".to_string(),
        bytes: PNG_BYTES.to_vec(),
    };
    let post = client
        .create_post("abc", "Hello", "World", image)
        .await
        .unwrap();
    assert_eq!(post.title, "Hello");

    let requests = server.received_requests().await.unwrap();
    let content_type = requests[0]
        .headers
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.starts_with("multipart/form-data"));
    let body = body_str(&requests[0]);
    assert!(body.contains("name=\"title\""));
    assert!(body.contains("name=\"description\""));
    assert!(body.contains("name=\"image\""));
    assert!(body.contains("filename=\"hello.png\""));
}

#[tokio::test]
async fn update_post_without_image_sends_no_image_part() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/blogs/p1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(post_json("p1", "Hello", "Edited")),
        )
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri());
    client
        .update_post("abc", "p1", "Hello", "Edited", None)
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body = body_str(&requests[0]);
    assert!(body.contains("name=\"title\""));
    assert!(!body.contains("name=\"image\""));
}

#[tokio::test]
async fn update_missing_post_maps_404_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/blogs/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "message": "Blog not found"
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri());
    let err = client
        .update_post("abc", "gone", "T", "D", None)
        .await
        .unwrap_err();
    assert_eq!(err, ApiError::NotFound("Blog not found".to_string()));
}

#[tokio::test]
async fn delete_post_hits_the_id_path() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/blogs/p1"))
        .and(header("authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "Blog deleted successfully"
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri());
    client.delete_post("abc", "p1").await.unwrap();
}

#[tokio::test]
async fn signup_without_image_omits_the_part() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/signup"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "_id": "u1", "username": "ada", "email": "ada@example.com"
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri());
    client
        .signup("ada", "ada@example.com", "pw", None)
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body = body_str(&requests[0]);
    assert!(body.contains("name=\"username\""));
    assert!(!body.contains("name=\"profileImage\""));
}

#[tokio::test]
async fn malformed_response_is_reported_as_such() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri());
    let err = client.fetch_profile("abc").await.unwrap_err();
    assert!(matches!(err, ApiError::Malformed(_)));
}

#[tokio::test]
async fn validation_error_carries_server_message_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/blogs"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "message": "Title is required"
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri());
    let image = ImageUpload {
        file_name: "a.png".to_string(),
        bytes: PNG_BYTES.to_vec(),
    };
    let err = client.create_post("abc", "", "d", image).await.unwrap_err();
    assert_eq!(err, ApiError::Validation("Title is required".to_string()));
}
