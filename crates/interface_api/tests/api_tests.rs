//! Router tests
//!
//! Drive the full router (routing, extractors, cookies, error bodies) with
//! `tower::ServiceExt::oneshot` against the in-memory `MockConcertPort`
//! seeded with the `test_utils` fixtures.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use domain_concert::{ConcertPort, MockConcertPort};
use interface_api::{config::ApiConfig, create_router};
use serde_json::{json, Value};
use test_utils::{seeded_mock_port, UserFixtures};
use tower::ServiceExt;

const BASE: &str = "/concert-service";

fn router(port: MockConcertPort) -> Router {
    let port: Arc<dyn ConcertPort> = Arc::new(port);
    create_router(port, ApiConfig::default())
}

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

fn get(path: &str) -> Request<Body> {
    Request::builder()
        .uri(format!("{BASE}{path}"))
        .body(Body::empty())
        .unwrap()
}

fn get_with_cookie(path: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(format!("{BASE}{path}"))
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

fn post_json(path: &str, body: Value, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(format!("{BASE}{path}"))
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Returns the `name=value` part of the response's Set-Cookie header
fn set_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

async fn login(app: &Router, username: &str, password: &str) -> Response {
    send(
        app.clone(),
        post_json("/login", json!({"username": username, "password": password}), None),
    )
    .await
}

mod concerts {
    use super::*;
    use core_kernel::ConcertId;
    use domain_concert::Concert;

    #[tokio::test]
    async fn test_retrieve_concert() {
        let app = router(seeded_mock_port().await);

        let response = send(app, get("/concerts/1")).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["id"], 1);
        assert_eq!(body["name"], "Jazz Night");
        assert_eq!(body["imageName"], "jazz_night.jpg");
        assert_eq!(body["dates"].as_array().unwrap().len(), 2);
        assert_eq!(body["performers"][0]["genre"], "RhythmAndBlues");
    }

    #[tokio::test]
    async fn test_missing_concert_is_404_with_error_body() {
        let app = router(seeded_mock_port().await);

        let response = send(app, get("/concerts/2000")).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = json_body(response).await;
        assert_eq!(body["error"], "not_found");
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_400_with_error_body() {
        let app = router(seeded_mock_port().await);

        let response = send(app, get("/concerts/abc")).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"], "bad_request");
        assert!(body["message"].as_str().unwrap().contains("abc"));
    }

    #[tokio::test]
    async fn test_list_concerts_matches_store_size() {
        let port = seeded_mock_port().await;
        let expected = port.list_concerts().await.unwrap().len();

        let response = send(router(port), get("/concerts")).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await.as_array().unwrap().len(), expected);
    }

    #[tokio::test]
    async fn test_list_summaries_is_reduced_projection() {
        let app = router(seeded_mock_port().await);

        let response = send(app, get("/concerts/summaries")).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(
            body[0],
            json!({"id": 1, "name": "Jazz Night", "imageName": "jazz_night.jpg"})
        );
        assert_eq!(body[1]["imageName"], Value::Null);
    }

    #[tokio::test]
    async fn test_single_seeded_concert() {
        let port = MockConcertPort::new();
        port.insert_concert(Concert::new(ConcertId::new(1), "Jazz Night")).await;
        let app = router(port);

        let found = send(app.clone(), get("/concerts/1")).await;
        assert_eq!(found.status(), StatusCode::OK);
        let body = json_body(found).await;
        assert_eq!(body["id"], 1);
        assert_eq!(body["name"], "Jazz Night");

        let missing = send(app, get("/concerts/2")).await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_empty_store_lists_nothing() {
        let app = router(MockConcertPort::new());

        let response = send(app, get("/concerts")).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!([]));
    }
}

mod performers {
    use super::*;
    use domain_concert::Genre;
    use test_utils::TestPerformerBuilder;

    #[tokio::test]
    async fn test_retrieve_performer() {
        let app = router(seeded_mock_port().await);

        let response = send(app, get("/performers/2")).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["name"], "Iron Echo");
        assert_eq!(body["genre"], "Metal");
    }

    #[tokio::test]
    async fn test_retrieve_inserted_performer() {
        let port = MockConcertPort::new();
        let performer = TestPerformerBuilder::new(10).with_genre(Genre::HipHop).build();
        port.insert_performer(performer.clone()).await;

        let response = send(router(port), get("/performers/10")).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["name"], performer.name.as_str());
        assert_eq!(body["genre"], "HipHop");
    }

    #[tokio::test]
    async fn test_non_numeric_performer_id_is_400() {
        let app = router(seeded_mock_port().await);

        let response = send(app, get("/performers/two")).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "bad_request");
    }

    #[tokio::test]
    async fn test_missing_performer_is_404() {
        let app = router(seeded_mock_port().await);

        let response = send(app, get("/performers/77")).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_performers() {
        let app = router(seeded_mock_port().await);

        let response = send(app, get("/performers")).await;

        assert_eq!(json_body(response).await.as_array().unwrap().len(), 3);
    }
}

mod login {
    use super::*;

    #[tokio::test]
    async fn test_login_sets_cookie_and_returns_user() {
        let app = router(seeded_mock_port().await);

        let response = login(&app, "testuser", UserFixtures::PASSWORD).await;

        assert_eq!(response.status(), StatusCode::OK);
        let cookie = set_cookie(&response).unwrap();
        assert!(cookie.starts_with("auth="));
        assert!(cookie.len() > "auth=".len());
        assert_eq!(json_body(response).await, json!({"id": 1, "username": "testuser"}));
    }

    #[tokio::test]
    async fn test_each_login_issues_a_new_token() {
        let app = router(seeded_mock_port().await);

        let first = set_cookie(&login(&app, "testuser", UserFixtures::PASSWORD).await).unwrap();
        let second = set_cookie(&login(&app, "testuser", UserFixtures::PASSWORD).await).unwrap();

        assert_ne!(first, second);

        // Only the latest token is honoured
        let stale = send(app.clone(), get_with_cookie("/bookings", &first)).await;
        assert_eq!(stale.status(), StatusCode::UNAUTHORIZED);
        let current = send(app, get_with_cookie("/bookings", &second)).await;
        assert_eq!(current.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_wrong_password_is_401() {
        let app = router(seeded_mock_port().await);

        let response = login(&app, "testuser", "not-the-password").await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(set_cookie(&response).is_none());
    }

    #[tokio::test]
    async fn test_login_without_password_is_400_with_error_body() {
        let app = router(seeded_mock_port().await);

        let response = send(app, post_json("/login", json!({"username": "testuser"}), None)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(set_cookie(&response).is_none());
        let body = json_body(response).await;
        assert_eq!(body["error"], "bad_request");
        assert!(body["message"].as_str().unwrap().contains("password"));
    }

    #[tokio::test]
    async fn test_login_with_malformed_json_is_400() {
        let app = router(seeded_mock_port().await);
        let request = Request::builder()
            .method("POST")
            .uri(format!("{BASE}/login"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"username\": "))
            .unwrap();

        let response = send(app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "bad_request");
    }

    #[tokio::test]
    async fn test_unknown_username_is_401() {
        let app = router(seeded_mock_port().await);

        let response = login(&app, "nobody", "whatever").await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(response).await["error"], "unauthorized");
    }
}

mod bookings {
    use super::*;
    use test_utils::{DateFixtures, TestBookingBuilder};

    async fn logged_in() -> (Router, MockConcertPort, String) {
        let port = seeded_mock_port().await;
        let app = router(port.clone());
        let cookie = set_cookie(&login(&app, "testuser", UserFixtures::PASSWORD).await).unwrap();
        (app, port, cookie)
    }

    #[tokio::test]
    async fn test_post_without_cookie_is_401() {
        let app = router(seeded_mock_port().await);

        let response = send(app, post_json("/bookings", json!({}), None)).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_post_with_unknown_token_is_401() {
        let app = router(seeded_mock_port().await);

        let response = send(app, post_json("/bookings", json!({}), Some("auth=forged"))).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_post_returns_existing_bookings_without_creating_one() {
        let (app, port, cookie) = logged_in().await;
        let before = port.booking_count().await;

        let request = json!({
            "concertId": 1,
            "date": "2024-03-02T20:00:00",
            "seatLabels": ["A4"]
        });
        let response = send(app, post_json("/bookings", request, Some(&cookie))).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(set_cookie(&response).as_deref(), Some(cookie.as_str()));
        let body = json_body(response).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["id"], 1);
        assert_eq!(body[0]["concertId"], 1);
        assert_eq!(body[0]["seats"][0], json!({"label": "A1", "price": "85.50"}));
        assert_eq!(port.booking_count().await, before);
    }

    #[tokio::test]
    async fn test_post_without_body_lists_bookings() {
        let (app, _port, cookie) = logged_in().await;
        let request = Request::builder()
            .method("POST")
            .uri(format!("{BASE}/bookings"))
            .header(header::COOKIE, &cookie)
            .body(Body::empty())
            .unwrap();

        let response = send(app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_lists_every_booking_of_the_caller() {
        let (app, port, cookie) = logged_in().await;
        port.insert_booking(
            TestBookingBuilder::new(3, 1)
                .for_concert(2, DateFixtures::closing_night())
                .with_seats(&["B1", "B2"])
                .build(),
        )
        .await;

        let response = send(app, get_with_cookie("/bookings", &cookie)).await;

        let body = json_body(response).await;
        assert_eq!(body.as_array().unwrap().len(), 2);
        assert_eq!(body[1]["id"], 3);
        assert_eq!(body[1]["concertId"], 2);
        assert_eq!(body[1]["seats"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_non_numeric_booking_id_is_400() {
        let (app, _port, cookie) = logged_in().await;

        let response = send(app, get_with_cookie("/bookings/latest", &cookie)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_bookings_reissues_cookie() {
        let (app, _port, cookie) = logged_in().await;

        let response = send(app, get_with_cookie("/bookings", &cookie)).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(set_cookie(&response).as_deref(), Some(cookie.as_str()));
    }

    #[tokio::test]
    async fn test_get_own_booking() {
        let (app, _port, cookie) = logged_in().await;

        let response = send(app, get_with_cookie("/bookings/1", &cookie)).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["seats"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_get_other_users_booking_is_403() {
        let (app, _port, cookie) = logged_in().await;

        let response = send(app, get_with_cookie("/bookings/2", &cookie)).await;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(json_body(response).await["error"], "forbidden");
    }

    #[tokio::test]
    async fn test_get_missing_booking_is_404() {
        let (app, _port, cookie) = logged_in().await;

        let response = send(app, get_with_cookie("/bookings/99", &cookie)).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_get_booking_without_session_is_401() {
        let app = router(seeded_mock_port().await);

        let response = send(app, get("/bookings/1")).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

mod seats {
    use super::*;

    #[tokio::test]
    async fn test_list_all_seats_for_date() {
        let app = router(seeded_mock_port().await);

        let response = send(app, get("/seats/2024-03-02T20:00:00")).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await.as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_filter_unbooked_seats() {
        let app = router(seeded_mock_port().await);

        let response = send(app, get("/seats/2024-03-02T20:00:00?status=Unbooked")).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            json!([{"label": "A4", "price": "85.50"}])
        );
    }

    #[tokio::test]
    async fn test_bad_date_is_400() {
        let app = router(seeded_mock_port().await);

        let response = send(app, get("/seats/next-friday")).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "bad_request");
    }

    #[tokio::test]
    async fn test_bad_status_is_400() {
        let app = router(seeded_mock_port().await);

        let response = send(app, get("/seats/2024-03-02T20:00:00?status=Reserved")).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

mod health {
    use super::*;

    #[tokio::test]
    async fn test_health_and_readiness() {
        let app = router(MockConcertPort::new());

        let health = send(app.clone(), get("/health")).await;
        assert_eq!(health.status(), StatusCode::OK);

        let ready = send(app, get("/health/ready")).await;
        assert_eq!(ready.status(), StatusCode::OK);
        assert_eq!(json_body(ready).await["status"], "ready");
    }

    #[tokio::test]
    async fn test_routes_require_base_path() {
        let app = router(MockConcertPort::new());

        let request = Request::builder().uri("/concerts").body(Body::empty()).unwrap();
        let response = send(app, request).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_empty_base_path_mounts_at_root() {
        let config = ApiConfig {
            base_path: String::new(),
            ..ApiConfig::default()
        };
        let app = create_router(Arc::new(MockConcertPort::new()), config);

        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = send(app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
    }
}

mod properties {
    use super::*;
    use std::collections::BTreeMap;

    use domain_concert::Concert;
    use proptest::prelude::*;
    use test_utils::{concert_strategy, performer_strategy, seat_status_strategy, seat_strategy};

    fn block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(future)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_every_stored_concert_is_served(
            concerts in prop::collection::vec(concert_strategy(), 0..6)
        ) {
            // Later concerts replace earlier ones with the same id, as in the port
            let stored: BTreeMap<_, Concert> =
                concerts.iter().cloned().map(|c| (c.id, c)).collect();

            block_on(async {
                let port = MockConcertPort::new();
                for concert in concerts {
                    port.insert_concert(concert).await;
                }
                let app = router(port);

                let listed = json_body(send(app.clone(), get("/concerts")).await).await;
                prop_assert_eq!(listed.as_array().unwrap().len(), stored.len());

                for concert in stored.values() {
                    let response = send(app.clone(), get(&format!("/concerts/{}", concert.id))).await;
                    prop_assert_eq!(response.status(), StatusCode::OK);

                    let body = json_body(response).await;
                    prop_assert_eq!(&body["id"], &json!(concert.id.value()));
                    prop_assert_eq!(&body["name"], &json!(concert.name));
                    prop_assert_eq!(body["dates"].as_array().unwrap().len(), concert.dates.len());
                    prop_assert_eq!(
                        body["performers"].as_array().unwrap().len(),
                        concert.performers.len()
                    );
                }
                Ok(())
            })?;
        }

        #[test]
        fn prop_stored_performer_is_served(performer in performer_strategy()) {
            block_on(async {
                let port = MockConcertPort::new();
                port.insert_performer(performer.clone()).await;

                let response = send(router(port), get(&format!("/performers/{}", performer.id))).await;
                prop_assert_eq!(response.status(), StatusCode::OK);

                let body = json_body(response).await;
                prop_assert_eq!(&body["name"], &json!(performer.name));
                prop_assert_eq!(&body["genre"], &serde_json::to_value(performer.genre).unwrap());
                Ok(())
            })?;
        }

        #[test]
        fn prop_seat_listing_matches_filter(
            seats in prop::collection::vec(seat_strategy(), 1..8),
            status in seat_status_strategy(),
        ) {
            let date = seats[0].date;
            let expected = seats
                .iter()
                .filter(|seat| seat.date == date && status.matches(seat))
                .count();

            block_on(async {
                let port = MockConcertPort::new();
                for seat in seats {
                    port.insert_seat(seat).await;
                }

                let path = format!("/seats/{}?status={:?}", date.format("%Y-%m-%dT%H:%M:%S"), status);
                let response = send(router(port), get(&path)).await;
                prop_assert_eq!(response.status(), StatusCode::OK);
                prop_assert_eq!(json_body(response).await.as_array().unwrap().len(), expected);
                Ok(())
            })?;
        }
    }
}
