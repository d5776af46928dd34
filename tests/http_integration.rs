// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the HTTP transport and repositories using wiremock.

use std::time::Duration;

use priceheat_lib::document::{Button, Plug, Room};
use priceheat_lib::error::{LastFailure, RepositoryError, TransportError};
use priceheat_lib::protocol::{Method, RetryPolicy, RetryingTransport};
use priceheat_lib::types::{Period, PriceLevel};
use priceheat_lib::{Client, ClientConfig, FromForm, Intent, Listing, RawFields};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Default retry budget with delays short enough for tests.
fn fast_policy() -> RetryPolicy {
    RetryPolicy::default()
        .with_initial_delay(Duration::from_millis(1))
        .with_max_delay(Duration::from_millis(5))
}

fn transport(server: &MockServer) -> RetryingTransport {
    RetryingTransport::new(reqwest::Client::new(), server.uri(), fast_policy())
}

/// Response delay well beyond the timeout of [`impatient_transport`].
const SLOW_RESPONSE: Duration = Duration::from_millis(500);

/// Transport whose per-attempt timeout is shorter than [`SLOW_RESPONSE`].
fn impatient_transport(server: &MockServer) -> RetryingTransport {
    ClientConfig::new(server.uri())
        .with_timeout(Duration::from_millis(50))
        .with_retry_policy(fast_policy())
        .into_client()
        .unwrap()
        .transport()
        .clone()
}

fn client(server: &MockServer) -> Client {
    ClientConfig::new(server.uri())
        .with_retry_policy(fast_policy())
        .into_client()
        .unwrap()
}

// ============================================================================
// RetryingTransport Tests
// ============================================================================

mod transport {
    use super::*;

    #[tokio::test]
    async fn recovers_after_three_server_errors() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rooms/"))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(3)
            .expect(3)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/rooms/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let response = transport(&mock_server)
            .execute(Method::Get, "rooms/", None)
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(response.body(), "[]");
    }

    #[tokio::test]
    async fn gives_up_after_six_attempts() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rooms/"))
            .respond_with(ResponseTemplate::new(500))
            .expect(6)
            .mount(&mock_server)
            .await;

        let err = transport(&mock_server)
            .execute(Method::Get, "rooms/", None)
            .await
            .unwrap_err();

        match err {
            TransportError::RetriesExhausted { attempts, last } => {
                assert_eq!(attempts, 6);
                assert!(matches!(last, LastFailure::Status(500)));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn custom_budget_is_respected() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .expect(3)
            .mount(&mock_server)
            .await;

        let transport = RetryingTransport::new(
            reqwest::Client::new(),
            mock_server.uri(),
            fast_policy().with_max_retries(2),
        );
        let err = transport
            .execute(Method::Get, "plugs/", None)
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "request failed after 3 attempts: HTTP 503"
        );
    }

    #[tokio::test]
    async fn client_error_is_not_retried() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rooms/"))
            .respond_with(ResponseTemplate::new(404).set_body_string("no such collection"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let err = transport(&mock_server)
            .execute(Method::Get, "rooms/", None)
            .await
            .unwrap_err();

        match err {
            TransportError::Status {
                status,
                reason,
                body,
            } => {
                assert_eq!(status, 404);
                assert_eq!(reason, "Not Found");
                assert_eq!(body, "no such collection");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn sets_json_content_type() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rooms/"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::json!({"name": "Hall"})))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&mock_server)
            .await;

        let body = serde_json::json!({"name": "Hall"});
        let response = transport(&mock_server)
            .execute(Method::Post, "rooms/", Some(&body))
            .await
            .unwrap();
        assert_eq!(response.status(), 201);
    }

    #[tokio::test]
    async fn delete_sends_no_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/rooms/r1"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let body = serde_json::json!({"ignored": true});
        transport(&mock_server)
            .execute(Method::Delete, "rooms/r1", Some(&body))
            .await
            .unwrap();

        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].body.is_empty());
    }

    #[tokio::test]
    async fn unreachable_service_uses_full_budget() {
        let transport = RetryingTransport::new(
            reqwest::Client::new(),
            "http://127.0.0.1:1",
            fast_policy(),
        );

        let err = transport
            .execute(Method::Get, "rooms/", None)
            .await
            .unwrap_err();

        match err {
            TransportError::RetriesExhausted { attempts, last } => {
                assert_eq!(attempts, 6);
                assert!(last.transport_error().is_some_and(reqwest::Error::is_connect));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn timeouts_are_retried() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rooms/"))
            .respond_with(ResponseTemplate::new(200).set_delay(SLOW_RESPONSE))
            .mount(&mock_server)
            .await;

        let err = impatient_transport(&mock_server)
            .execute(Method::Get, "rooms/", None)
            .await
            .unwrap_err();

        match err {
            TransportError::RetriesExhausted { attempts, last } => {
                assert_eq!(attempts, 6);
                assert!(matches!(last, LastFailure::Transport(_)));
                assert!(last.is_timeout());
            }
            other => panic!("unexpected error: {other:?}"),
        }
        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 6);
    }

    #[tokio::test]
    async fn server_errors_and_timeouts_share_one_budget() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rooms/"))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(3)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/rooms/"))
            .respond_with(ResponseTemplate::new(200).set_delay(SLOW_RESPONSE))
            .mount(&mock_server)
            .await;

        let err = impatient_transport(&mock_server)
            .execute(Method::Get, "rooms/", None)
            .await
            .unwrap_err();

        match err {
            TransportError::RetriesExhausted { attempts, last } => {
                assert_eq!(attempts, 6);
                assert!(last.is_timeout());
            }
            other => panic!("unexpected error: {other:?}"),
        }
        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 6);
    }
}

// ============================================================================
// ResourceRepository Tests
// ============================================================================

mod repository {
    use super::*;

    #[tokio::test]
    async fn list_parses_documents() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/plugs/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": "p1", "name": "Radiator", "ip": "192.168.0.20", "room_id": "r1"},
                {"id": "p2", "name": "Floor", "ip": "192.168.0.21", "room_id": "r2", "scheduled": true}
            ])))
            .mount(&mock_server)
            .await;

        let plugs: Vec<Plug> = client(&mock_server).plugs().list().await.unwrap();

        assert_eq!(plugs.len(), 2);
        assert_eq!(plugs[0].id.as_deref(), Some("p1"));
        assert!(!plugs[0].scheduled);
        assert!(plugs[1].scheduled);
    }

    #[tokio::test]
    async fn list_fails_with_fetch_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/buttons"))
            .respond_with(ResponseTemplate::new(403))
            .expect(1)
            .mount(&mock_server)
            .await;

        let err = client(&mock_server).buttons().list().await.unwrap_err();

        match err {
            RepositoryError::Fetch { path, source } => {
                assert_eq!(path, "buttons");
                assert_eq!(source.status(), Some(403));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn list_rejects_unexpected_shape() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rooms/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"rooms\": 3}"))
            .mount(&mock_server)
            .await;

        let err = client(&mock_server).rooms().list().await.unwrap_err();
        assert!(matches!(err, RepositoryError::Decode { .. }));
    }

    #[tokio::test]
    async fn list_or_error_degrades_to_sentinel() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rooms/"))
            .respond_with(ResponseTemplate::new(500))
            .expect(6)
            .mount(&mock_server)
            .await;

        let listing = client(&mock_server).rooms().list_or_error().await;

        assert_eq!(listing, Listing::Unavailable);
        assert_eq!(serde_json::to_value(&listing).unwrap(), "ERROR");
    }

    #[tokio::test]
    async fn list_or_error_returns_items() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rooms/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([{"id": "r1", "name": "Hall"}])),
            )
            .mount(&mock_server)
            .await;

        let listing = client(&mock_server).rooms().list_or_error().await;
        assert_eq!(listing.items().map(<[Room]>::len), Some(1));
    }

    #[tokio::test]
    async fn create_posts_without_id() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/buttons"))
            .and(body_json(serde_json::json!({
                "name": "Door",
                "ip": "10.0.0.5",
                "plug_ids": ["p1", "p2"]
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let raw = RawFields::from_urlencoded("name=Door&ip=10.0.0.5&plug_ids=p1&plug_ids=p2")
            .unwrap();
        let button = Button::from_form(&raw).unwrap();

        client(&mock_server).buttons().create(&button).await.unwrap();
    }

    #[tokio::test]
    async fn create_surfaces_rejection_text() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rooms/"))
            .respond_with(ResponseTemplate::new(400).set_body_string("Room name already exists"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let room = Room {
            id: None,
            name: "Hall".to_string(),
        };
        let err = client(&mock_server).rooms().create(&room).await.unwrap_err();

        match err {
            RepositoryError::Rejected { path, body } => {
                assert_eq!(path, "rooms/");
                assert_eq!(body, "Room name already exists");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_wraps_other_failures() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rooms/"))
            .respond_with(ResponseTemplate::new(409))
            .expect(1)
            .mount(&mock_server)
            .await;

        let room = Room {
            id: None,
            name: "Hall".to_string(),
        };
        let err = client(&mock_server).rooms().create(&room).await.unwrap_err();

        assert!(matches!(
            err,
            RepositoryError::Mutation {
                intent: Intent::Create,
                ..
            }
        ));
        assert_eq!(err.to_string(), "failed to create rooms/: HTTP 409 - Conflict");
    }

    #[tokio::test]
    async fn update_posts_to_document_path() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rooms/r1"))
            .and(body_json(serde_json::json!({"name": "Living room"})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let room = Room {
            id: Some("r1".to_string()),
            name: "Living room".to_string(),
        };
        client(&mock_server).rooms().update(&room).await.unwrap();
    }

    #[tokio::test]
    async fn update_joins_collection_without_trailing_slash() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/buttons/b1"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let button = Button {
            id: Some("b1".to_string()),
            name: "Door".to_string(),
            ip: "10.0.0.5".parse().unwrap(),
            plug_ids: vec!["p1".to_string()],
        };
        client(&mock_server).buttons().update(&button).await.unwrap();
    }

    #[tokio::test]
    async fn update_requires_id() {
        let mock_server = MockServer::start().await;

        let room = Room {
            id: None,
            name: "Hall".to_string(),
        };
        let err = client(&mock_server).rooms().update(&room).await.unwrap_err();

        assert!(matches!(err, RepositoryError::MissingId { .. }));
        assert!(mock_server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_targets_document() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/temp_sensors/s1"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        client(&mock_server)
            .temp_sensors()
            .delete("s1")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn delete_retries_server_errors() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/schedules/s1"))
            .respond_with(ResponseTemplate::new(502))
            .up_to_n_times(1)
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("DELETE"))
            .and(path("/schedules/s1"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        client(&mock_server)
            .schedules()
            .delete("s1")
            .await
            .unwrap();
    }
}

// ============================================================================
// ReadOnlyResources Tests
// ============================================================================

mod read_only {
    use super::*;

    #[tokio::test]
    async fn current_price() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/prices/current"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "level": "VeryCheap",
                "price": 0.42,
                "starts_at": "2024-01-15T10:00:00+01:00"
            })))
            .mount(&mock_server)
            .await;

        let price = client(&mock_server)
            .read_only()
            .current_price()
            .await
            .unwrap();

        assert_eq!(price.level, PriceLevel::VeryCheap);
        assert!((price.price - 0.42).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn temperature_logs_for_room_and_period() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/temperature_logs/r1/week"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"time": "2024-01-15T10:00:00Z", "temperature": 21.5},
                {"time": "2024-01-15T11:00:00Z", "temperature": 21.0}
            ])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let logs = client(&mock_server)
            .read_only()
            .temperature_logs("r1", Period::Week)
            .await
            .unwrap();

        assert_eq!(logs.len(), 2);
        assert!((logs[0].temperature - 21.5).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn read_failure_reports_path() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/prices/current"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let err = client(&mock_server)
            .read_only()
            .current_price()
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "failed to fetch prices/current: HTTP 401 - Unauthorized"
        );
    }
}
