//! Wire-level tests for the REST identity and store clients.

use reqwest::Client;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gymdesk::config::ClientOptions;
use gymdesk::error::Error;
use gymdesk::identity::{IdentityProvider, RestIdentityClient};
use gymdesk::store::{Direction, DocumentStore, Query, RestStoreClient};
use gymdesk::GymClient;

fn identity_client(server: &MockServer) -> RestIdentityClient {
    RestIdentityClient::new(
        &server.uri(),
        "test_anon_key",
        Client::new(),
        ClientOptions::default(),
    )
}

fn store_client(server: &MockServer) -> RestStoreClient {
    RestStoreClient::new(
        &server.uri(),
        "test_anon_key",
        Client::new(),
        ClientOptions::default(),
    )
}

#[tokio::test]
async fn sign_in_returns_identity_and_feeds_auth_state() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "tok-1",
            "user": { "id": "u1", "email": "a@x.com" }
        })))
        .mount(&server)
        .await;

    let client = identity_client(&server);
    let mut state = client.on_auth_state_change();
    assert!(state.borrow().is_none());

    let identity = client.sign_in("a@x.com", "secret1").await.unwrap();
    assert_eq!(identity.uid, "u1");
    assert_eq!(identity.email, "a@x.com");
    assert_eq!(client.current_identity(), Some(identity.clone()));

    state.changed().await.unwrap();
    assert_eq!(state.borrow().as_ref(), Some(&identity));
}

#[tokio::test]
async fn bad_credentials_map_to_an_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "invalid_grant"})),
        )
        .mount(&server)
        .await;

    let err = identity_client(&server)
        .sign_in("a@x.com", "wrong")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Auth(_)));
}

#[tokio::test]
async fn sign_up_then_sign_out_clears_the_provider_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/signup"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "tok-2",
            "user": { "id": "u2", "email": "b@x.com" }
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/logout"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = identity_client(&server);
    client.sign_up("b@x.com", "secret1").await.unwrap();
    assert!(client.current_identity().is_some());

    client.sign_out().await.unwrap();
    assert!(client.current_identity().is_none());
    assert!(client.on_auth_state_change().borrow().is_none());
}

#[tokio::test]
async fn sign_out_without_a_session_is_an_auth_error() {
    let server = MockServer::start().await;
    let err = identity_client(&server).sign_out().await.unwrap_err();
    assert!(matches!(err, Error::Auth(_)));
}

#[tokio::test]
async fn store_get_maps_404_to_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/store/v1/members/m1"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let doc = store_client(&server).get("members", "m1").await.unwrap();
    assert!(doc.is_none());
}

#[tokio::test]
async fn store_get_returns_the_document() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/store/v1/users/u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "u1",
            "fields": { "role": "admin" }
        })))
        .mount(&server)
        .await;

    let doc = store_client(&server).get("users", "u1").await.unwrap().unwrap();
    assert_eq!(doc.id, "u1");
    assert_eq!(doc.fields["role"], "admin");
}

#[tokio::test]
async fn store_add_returns_the_new_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/store/v1/bills"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "b7"})))
        .mount(&server)
        .await;

    let id = store_client(&server)
        .add("bills", &json!({"amount": "100.00"}))
        .await
        .unwrap();
    assert_eq!(id, "b7");
}

#[tokio::test]
async fn store_query_encodes_filters_order_and_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/store/v1/bills"))
        .and(query_param("paid", "eq.false"))
        .and(query_param("order", "created_at.desc"))
        .and(query_param("limit", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "b1", "fields": { "amount": "100.00", "paid": false } }
        ])))
        .mount(&server)
        .await;

    let docs = store_client(&server)
        .query(
            "bills",
            &Query::new()
                .eq("paid", false)
                .order("created_at", Direction::Descending)
                .limit(100),
        )
        .await
        .unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].id, "b1");
}

#[tokio::test]
async fn store_failures_map_to_a_store_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/store/v1/members"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let err = store_client(&server)
        .query("members", &Query::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Store(_)));
}

#[tokio::test]
async fn gym_client_wires_a_controller() {
    let server = MockServer::start().await;
    let client = GymClient::new(&server.uri(), "test_anon_key").unwrap();
    let controller = client.controller();
    assert_eq!(controller.role(), gymdesk::session::Role::Guest);
    assert!(client.auth().current_identity().is_none());
}
