use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use agrilume_client::config::ClientOptions;
use agrilume_client::error::Error;
use agrilume_client::storage::{KeyValueStore, MemoryStore};
use agrilume_client::Agrilume;

fn client_with_store(uri: &str) -> (Agrilume, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let client =
        Agrilume::new_with_store(uri, ClientOptions::default(), store.clone()).unwrap();
    (client, store)
}

fn complete_user() -> serde_json::Value {
    json!({
        "id": 1,
        "full_name": "Nimal Perera",
        "email": "nimal@example.com",
        "phone_number": "0771234567",
        "address": "12 Lake Road, Kandy",
        "gender": "Male",
        "is_seller": false
    })
}

#[tokio::test]
async fn login_success_caches_the_user() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Login successful!",
            "user": complete_user()
        })))
        .mount(&mock_server)
        .await;

    let (client, store) = client_with_store(&mock_server.uri());

    let response = client
        .auth()
        .login("nimal@example.com", "password123")
        .await
        .unwrap();

    assert_eq!(response.message, "Login successful!");
    assert_eq!(response.user.full_name, "Nimal Perera");

    // the fresh user is mirrored into the display cache
    let cached = client.auth().cached_user().unwrap();
    assert_eq!(cached.id, 1);
    assert!(store.get("user").is_some());
}

#[tokio::test]
async fn login_failure_surfaces_the_backend_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Invalid email or password. Please try again."
        })))
        .mount(&mock_server)
        .await;

    let (client, store) = client_with_store(&mock_server.uri());

    let err = client
        .auth()
        .login("nimal@example.com", "wrong")
        .await
        .unwrap_err();

    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Invalid email or password. Please try again.");
        }
        other => panic!("expected Api error, got {:?}", other),
    }

    // a failed login never touches the cache
    assert_eq!(store.get("user"), None);
}

#[tokio::test]
async fn google_login_caches_the_placeholder_profile() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/google-login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Google login successful!",
            "user": {
                "id": 7,
                "full_name": "Kamala Silva",
                "email": "kamala@example.com",
                "phone_number": "0000000000",
                "address": "Not Provided",
                "gender": "Not Provided",
                "is_seller": false
            }
        })))
        .mount(&mock_server)
        .await;

    let (client, _store) = client_with_store(&mock_server.uri());

    let response = client.auth().google_login("google-id-token").await.unwrap();

    // freshly created Google accounts carry placeholders only
    assert!(response.user.needs_completion());

    let cached = client.auth().cached_user().unwrap();
    assert_eq!(cached.email, "kamala@example.com");
}

#[tokio::test]
async fn check_session_reports_the_signed_in_user() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/check_session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "logged_in": true,
            "user": complete_user()
        })))
        .mount(&mock_server)
        .await;

    let (client, _store) = client_with_store(&mock_server.uri());

    let session = client.auth().check_session().await;

    assert!(session.logged_in);
    assert_eq!(session.user.unwrap().full_name, "Nimal Perera");
}

#[tokio::test]
async fn check_session_reports_anonymous() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/check_session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "logged_in": false
        })))
        .mount(&mock_server)
        .await;

    let (client, _store) = client_with_store(&mock_server.uri());

    let session = client.auth().check_session().await;

    assert!(!session.logged_in);
    assert_eq!(session.user, None);
    assert!(!session.is_seller());
}

#[tokio::test]
async fn probe_transport_failure_reads_as_anonymous() {
    // nothing is listening here
    let (client, _store) = client_with_store("http://127.0.0.1:9");

    let session = client.auth().check_session().await;

    assert!(!session.logged_in);
    assert_eq!(session.user, None);
}

#[tokio::test]
async fn probe_malformed_body_reads_as_anonymous() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/check_session"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&mock_server)
        .await;

    let (client, _store) = client_with_store(&mock_server.uri());

    let session = client.auth().check_session().await;

    assert!(!session.logged_in);
}

#[tokio::test]
async fn logout_clears_both_client_side_slots() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/logout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "You have been logged out."
        })))
        .mount(&mock_server)
        .await;

    let (client, store) = client_with_store(&mock_server.uri());
    store.set("user", &complete_user().to_string());
    client.pending().set("7", "3");

    client.auth().logout().await.unwrap();

    assert_eq!(store.get("user"), None);
    assert_eq!(store.get("pendingRequest"), None);
}

#[tokio::test]
async fn update_profile_persists_the_returned_user() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/update-profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Profile updated.",
            "user": {
                "id": 7,
                "full_name": "Kamala Silva",
                "email": "kamala@example.com",
                "phone_number": "0712345678",
                "address": "5 Temple Street, Galle",
                "gender": "Not Provided",
                "is_seller": false
            }
        })))
        .mount(&mock_server)
        .await;

    let (client, _store) = client_with_store(&mock_server.uri());

    let user = client
        .auth()
        .update_profile("0712345678", "5 Temple Street, Galle")
        .await
        .unwrap();

    assert!(!user.needs_completion());

    let cached = client.auth().cached_user().unwrap();
    assert_eq!(cached.phone_number.as_deref(), Some("0712345678"));
}

#[tokio::test]
async fn update_profile_rejects_a_bad_phone_number() {
    let (client, _store) = client_with_store("http://127.0.0.1:9");

    let err = client
        .auth()
        .update_profile("07712", "5 Temple Street")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Validation(_)));
}

#[tokio::test]
async fn update_profile_rejects_an_empty_address() {
    let (client, _store) = client_with_store("http://127.0.0.1:9");

    let err = client
        .auth()
        .update_profile("0712345678", "   ")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Validation(_)));
}

#[tokio::test]
async fn register_returns_the_acknowledgement() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/register"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "message": "Registration successful! You can now log in."
        })))
        .mount(&mock_server)
        .await;

    let (client, store) = client_with_store(&mock_server.uri());

    let ack = client
        .auth()
        .register(&agrilume_client::auth::NewUser {
            full_name: "Nimal Perera".to_string(),
            email: "nimal@example.com".to_string(),
            phone_number: "0771234567".to_string(),
            address: "12 Lake Road, Kandy".to_string(),
            gender: "Male".to_string(),
            password: "password123".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(ack.message, "Registration successful! You can now log in.");

    // registration does not sign the user in
    assert_eq!(store.get("user"), None);
}
