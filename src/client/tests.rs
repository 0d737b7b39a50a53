//! Tests for request dispatch

use super::ApiClient;
use crate::auth::SigningContext;
use crate::config::Configuration;
use crate::types::{RawResponse, RequestDescriptor};
use crate::ApiError;
use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue, Method, StatusCode};
use mockito::{Matcher, Server};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

const USER_ID: u64 = 140366;
const KEY: &str = "dvZsZdp+CLyi6RqBJuJER88CrrROHLz3VNuAkZI5U6s=";
const SPACE_ID: u64 = 82470;

fn config(base_path: &str) -> Configuration {
    Configuration::builder(USER_ID, KEY)
        .with_base_path(base_path)
        .build()
        .unwrap()
}

fn client(base_path: &str) -> ApiClient {
    ApiClient::new(config(base_path)).unwrap()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionCreate {
    currency: String,
    line_items: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize, PartialEq)]
struct Session {
    id: u64,
    state: String,
}

fn session_request() -> RequestDescriptor {
    RequestDescriptor::post(
        "ExpressCheckoutService.PostExpressCheckoutCreateSession",
        "/express-checkout/create-session",
    )
    .content_types(["application/json"])
    .space(SPACE_ID)
    .json_body(&SessionCreate {
        currency: "EUR".to_string(),
        line_items: vec![json!({"name": "Shirt", "quantity": 1})],
    })
    .unwrap()
}

fn roles_request() -> RequestDescriptor {
    RequestDescriptor::get(
        "HumanUsersRolesService.GetHumanUsersUserIdAccountRoles",
        "/human-users/{userId}/account-roles",
    )
    .path_param("userId", 1234)
    .account(999)
}

#[test]
fn test_client_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiClient>();
}

#[test]
fn test_prepare_post_with_body() {
    let client = client("https://gateway.example.com/api/v2.0");
    let prepared = client.prepare(&session_request()).unwrap();

    assert_eq!(prepared.method, Method::POST);
    assert_eq!(
        prepared.url.as_str(),
        "https://gateway.example.com/api/v2.0/express-checkout/create-session"
    );
    assert_eq!(prepared.headers.get("Space").unwrap(), "82470");
    assert_eq!(prepared.headers.get(CONTENT_TYPE).unwrap(), "application/json");
    assert_eq!(prepared.headers.get(ACCEPT).unwrap(), "application/json");
    assert!(prepared
        .headers
        .get(AUTHORIZATION)
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("Bearer "));

    let body: serde_json::Value = serde_json::from_slice(prepared.body.as_ref().unwrap()).unwrap();
    assert_eq!(
        body,
        json!({"currency": "EUR", "lineItems": [{"name": "Shirt", "quantity": 1}]})
    );
}

#[test]
fn test_prepare_get_without_body() {
    let client = client("https://gateway.example.com/api/v2.0/");
    let prepared = client.prepare(&roles_request()).unwrap();

    assert_eq!(prepared.path_and_query(), "/api/v2.0/human-users/1234/account-roles");
    assert_eq!(prepared.headers.get("Account").unwrap(), "999");
    assert!(prepared.headers.get(CONTENT_TYPE).is_none());
    assert!(prepared.body.is_none());
    assert_eq!(prepared.timeout, client.configuration().timeout());
}

#[test]
fn test_prepare_body_without_declared_types_has_no_content_type() {
    let client = client("https://gateway.example.com");
    let request = RequestDescriptor::post("Op", "/things")
        .json_body(&Option::<u32>::None)
        .unwrap();
    let prepared = client.prepare(&request).unwrap();

    assert!(prepared.headers.get(CONTENT_TYPE).is_none());
    assert_eq!(prepared.body.as_deref(), Some(b"null".as_slice()));
}

#[test]
fn test_prepare_rejects_dot_segment_path_value() {
    let client = client("https://h/api/v2.0");
    let request = RequestDescriptor::delete("Op", "/payment/web-apps/processors/{externalId}")
        .path_param("externalId", "..");
    let err = client.prepare(&request).unwrap_err();
    assert!(matches!(err, ApiError::Validation { .. }));
}

#[test]
fn test_prepare_encodes_multi_query_in_order() {
    let client = client("https://gateway.example.com");
    let request = RequestDescriptor::get("Op", "/subscriptions/charges")
        .multi_query_param("expand", ["a", "b"])
        .query_param("limit", 5)
        .optional_query_param("after", None::<u64>);
    let prepared = client.prepare(&request).unwrap();
    assert_eq!(prepared.url.query(), Some("expand=a&expand=b&limit=5"));
}

#[test]
fn test_prepare_rejects_unresolved_placeholder() {
    let client = client("https://gateway.example.com");
    let request = RequestDescriptor::get("Op", "/human-users/{userId}/account-roles");
    let err = client.prepare(&request).unwrap_err();
    assert!(matches!(err, ApiError::Validation { .. }));
    assert!(err.is_client_side());
}

#[test]
fn test_prepare_rejects_invalid_header_value() {
    let client = client("https://gateway.example.com");
    let request = RequestDescriptor::get("Op", "/x").header_param("X-Note", "line\nbreak");
    assert!(matches!(
        client.prepare(&request),
        Err(ApiError::Validation { .. })
    ));
}

#[test]
fn test_default_headers_are_sent_and_overridable() {
    let config = Configuration::builder(USER_ID, KEY)
        .with_base_path("https://gateway.example.com")
        .with_default_header("Accept", "text/plain")
        .with_default_header("x-meta-sdk-language", "rust")
        .build()
        .unwrap();
    let client = ApiClient::new(config).unwrap();
    let prepared = client.prepare(&roles_request()).unwrap();
    assert_eq!(prepared.headers.get("x-meta-sdk-language").unwrap(), "rust");
    assert_eq!(prepared.headers.get(ACCEPT).unwrap(), "application/json");
}

#[test]
fn test_per_call_timeout_override() {
    let client = client("https://gateway.example.com");
    let request = roles_request().with_timeout(std::time::Duration::from_secs(3));
    let prepared = client.prepare(&request).unwrap();
    assert_eq!(prepared.timeout, std::time::Duration::from_secs(3));
}

#[test]
fn test_signer_receives_full_request_context() {
    let seen: Arc<Mutex<Vec<(String, String, Option<Vec<u8>>)>>> = Arc::default();
    let recorder = seen.clone();
    let client = ApiClient::builder(config("https://gateway.example.com/api"))
        .signer_fn(move |ctx: &SigningContext<'_>| {
            recorder.lock().unwrap().push((
                ctx.method.to_string(),
                ctx.path.to_string(),
                ctx.body.map(<[u8]>::to_vec),
            ));
            let mut headers = HeaderMap::new();
            headers.insert("x-mac-userid", HeaderValue::from(ctx.application_user_id));
            Ok(headers)
        })
        .build()
        .unwrap();

    let request = RequestDescriptor::post("Op", "/things/{id}")
        .path_param("id", 7)
        .query_param("roleId", 3)
        .json_body(&json!({"a": 1}))
        .unwrap();
    let prepared = client.prepare(&request).unwrap();

    assert_eq!(prepared.headers.get("x-mac-userid").unwrap(), "140366");
    assert!(prepared.headers.get(AUTHORIZATION).is_none());

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0, "POST");
    assert_eq!(seen[0].1, "/api/things/7?roleId=3");
    assert_eq!(seen[0].2.as_deref(), Some(br#"{"a":1}"#.as_slice()));
}

#[test]
fn test_signing_failure_surfaces() {
    let config = Configuration::new(USER_ID, "%%% not base64 %%%").unwrap();
    let client = ApiClient::new(config).unwrap();
    assert!(matches!(
        client.prepare(&roles_request()),
        Err(ApiError::Signing(_))
    ));
}

#[test]
fn test_second_classifier_is_rejected() {
    let builder = ApiClient::builder(config("https://gateway.example.com"))
        .error_classifier(crate::classifier::StatusClassifier)
        .unwrap();
    let err = builder
        .error_classifier_fn(|_: &str, _: &RawResponse| None)
        .unwrap_err();
    assert!(matches!(err, ApiError::Config(_)));
}

#[tokio::test]
async fn test_express_checkout_scenario() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/express-checkout/create-session")
        .match_header("Space", "82470")
        .match_header("content-type", "application/json")
        .match_header("accept", "application/json")
        .match_header("authorization", Matcher::Regex(r"^Bearer .+\..+\..+$".to_string()))
        .match_body(Matcher::Json(json!({
            "currency": "EUR",
            "lineItems": [{"name": "Shirt", "quantity": 1}]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"id": 42, "state": "PENDING"}).to_string())
        .expect(1)
        .create_async()
        .await;

    let client = client(&server.url());
    let response = client.execute::<Session>(session_request()).await.unwrap();

    assert_eq!(response.status_code(), 200);
    assert_eq!(
        response.data(),
        &Session {
            id: 42,
            state: "PENDING".to_string()
        }
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn test_account_roles_scenario() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/human-users/1234/account-roles")
        .match_header("Account", "999")
        .match_header("content-type", Matcher::Missing)
        .with_status(200)
        .with_body(json!({"data": [], "limit": 100}).to_string())
        .create_async()
        .await;

    let client = client(&server.url());
    let body: serde_json::Value = client.execute_data(roles_request()).await.unwrap();

    assert_eq!(body["limit"], 100);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_not_found_scenario() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/human-users/1234/account-roles")
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"not found"}"#)
        .create_async()
        .await;

    let client = client(&server.url());
    let err = client.execute::<Session>(roles_request()).await.unwrap_err();

    match err {
        ApiError::Api {
            operation,
            status,
            message,
            ..
        } => {
            assert_eq!(status, 404);
            assert_eq!(message, "not found");
            assert_eq!(
                operation,
                "HumanUsersRolesService.GetHumanUsersUserIdAccountRoles"
            );
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unresolved_placeholder_makes_no_call() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .with_status(200)
        .expect(0)
        .create_async()
        .await;

    let client = client(&server.url());
    let request = RequestDescriptor::get("Op", "/human-users/{userId}/account-roles").account(999);
    let err = client.execute::<serde_json::Value>(request).await.unwrap_err();

    assert!(matches!(err, ApiError::Validation { .. }));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_multi_query_on_the_wire() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/subscriptions/charges")
        .match_query(Matcher::Exact("expand=a&expand=b".to_string()))
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let client = client(&server.url());
    let request = RequestDescriptor::get("Op", "/subscriptions/charges")
        .space(SPACE_ID)
        .multi_query_param("expand", ["a", "b"]);
    let items: Vec<serde_json::Value> = client.execute_data(request).await.unwrap();

    assert!(items.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_empty_success_body_for_unit_result() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("DELETE", "/human-users/1234/account-roles")
        .match_query(Matcher::UrlEncoded("roleId".to_string(), "5".to_string()))
        .with_status(204)
        .create_async()
        .await;

    let client = client(&server.url());
    let request = RequestDescriptor::delete("Op", "/human-users/{userId}/account-roles")
        .path_param("userId", 1234)
        .query_param("roleId", 5)
        .account(999);
    let response = client.execute::<()>(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_deserialization_error_is_distinct() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/human-users/1234/account-roles")
        .with_status(200)
        .with_body(r#"{"unexpected": true}"#)
        .create_async()
        .await;

    let client = client(&server.url());
    let err = client.execute::<Session>(roles_request()).await.unwrap_err();
    assert!(matches!(err, ApiError::Deserialization { status: 200, .. }));
}

#[tokio::test]
async fn test_custom_classifier_gets_first_refusal() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/human-users/1234/account-roles")
        .with_status(200)
        .with_body(r#"{"id": 1, "state": "FAILED"}"#)
        .create_async()
        .await;

    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let client = ApiClient::builder(config(&server.url()))
        .error_classifier_fn(move |operation: &str, response: &RawResponse| {
            counter.fetch_add(1, Ordering::SeqCst);
            let failed = response.text().contains("FAILED");
            failed.then(|| ApiError::api(operation, response.status().as_u16(), "charge failed"))
        })
        .unwrap()
        .build()
        .unwrap();

    let err = client.execute::<Session>(roles_request()).await.unwrap_err();
    assert!(matches!(err, ApiError::Api { status: 200, ref message, .. } if message == "charge failed"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_envelope_only_for_success_status() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/human-users/1234/account-roles")
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    // A classifier that lets everything through still cannot turn a 500 into a response
    let client = ApiClient::builder(config(&server.url()))
        .error_classifier_fn(|_: &str, _: &RawResponse| None)
        .unwrap()
        .build()
        .unwrap();

    let err = client
        .execute::<serde_json::Value>(roles_request())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Api { status: 500, ref message, .. } if message == "boom"));
}

#[tokio::test]
async fn test_transport_error_when_unreachable() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let client = client(&format!("http://127.0.0.1:{}", port));
    let err = client
        .execute::<serde_json::Value>(roles_request())
        .await
        .unwrap_err();

    assert!(err.is_transport());
    assert!(!err.is_client_side());
    assert_eq!(
        err.operation(),
        Some("HumanUsersRolesService.GetHumanUsersUserIdAccountRoles")
    );
}

#[tokio::test]
async fn test_concurrent_calls_share_one_client() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/human-users/1234/account-roles")
        .with_status(200)
        .with_body("{}")
        .expect(4)
        .create_async()
        .await;

    let client = Arc::new(client(&server.url()));
    let handles: Vec<_> = (0..4)
        .map(|index| {
            let client = client.clone();
            tokio::spawn(async move {
                client
                    .execute_data::<serde_json::Value>(roles_request().with_operation_index(index))
                    .await
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap().is_ok());
    }
    mock.assert_async().await;
}
