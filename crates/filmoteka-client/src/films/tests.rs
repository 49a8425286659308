use super::*;
use crate::error::ClientError;
use crate::notify::{RecordingNavigator, RecordingNotifier};
use axum::extract::{Path, RawQuery, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use filmoteka_models::{Film, FilmsResponse, Person, Postava};
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
struct Recorded {
    tokens: Vec<Option<String>>,
    queries: Vec<Option<String>>,
    saved: Vec<serde_json::Value>,
}

type Shared = Arc<Mutex<Recorded>>;

fn record_token(state: &Shared, headers: &HeaderMap) -> Option<String> {
    let token = headers
        .get("X-Auth-Token")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());
    state.lock().unwrap().tokens.push(token.clone());
    token
}

fn sample_film(id: u64) -> Film {
    let welles = Person::new("Orson", "Welles").with_id(3);
    Film {
        id: Some(id),
        nazov: "Citizen Kane".to_string(),
        rok: 1941,
        slovensky_nazov: "Občan Kane".to_string(),
        imdb_id: "tt0033467".to_string(),
        reziser: vec![welles.clone()],
        postava: vec![Postava::new("Charles Foster Kane", "hlavná postava", welles)],
        poradie_v_rebricku: [("AFI 1998".to_string(), 1)].into_iter().collect(),
    }
}

async fn film_handler(
    State(state): State<Shared>,
    Path(id): Path<u64>,
    headers: HeaderMap,
) -> Response {
    if record_token(&state, &headers).as_deref() == Some("expired") {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    match id {
        2 => "definitely not json".into_response(),
        3 => Json(json!({
            "id": 3, "nazov": "M", "rok": 1931, "slovenskyNazov": null, "imdbID": "tt0022100",
            "reziser": [{"id": 5, "krstneMeno": "Fritz", "stredneMeno": null, "priezvisko": "Lang"}],
            "postava": [], "poradieVRebricku": {}
        }))
        .into_response(),
        400 => (StatusCode::BAD_REQUEST, Json(json!({"errorMessage": "Bad film id"}))).into_response(),
        404 => (StatusCode::NOT_FOUND, "no such film").into_response(),
        500 => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
        _ => Json(sample_film(id)).into_response(),
    }
}

async fn save_handler(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(mut body): Json<serde_json::Value>,
) -> Response {
    record_token(&state, &headers);
    state.lock().unwrap().saved.push(body.clone());

    if body["nazov"] == "reject me" {
        return (StatusCode::BAD_REQUEST, Json(json!({"errorMessage": "Title not allowed"})))
            .into_response();
    }
    if body.get("id").is_none() {
        body["id"] = json!(99);
    }
    Json(body).into_response()
}

async fn list_handler(
    State(state): State<Shared>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Response {
    record_token(&state, &headers);
    state.lock().unwrap().queries.push(query);
    Json(FilmsResponse {
        items: vec![sample_film(1), sample_film(2)],
        total_count: 42,
    })
    .into_response()
}

async fn spawn_server(state: Shared) -> String {
    let app = Router::new()
        .route("/films", get(list_handler))
        .route("/films/", post(save_handler))
        .route("/films/{id}", get(film_handler))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

struct Harness {
    service: FilmsService,
    state: Shared,
    notifier: Arc<RecordingNotifier>,
    navigator: Arc<RecordingNavigator>,
}

async fn harness(token: Option<&str>) -> Harness {
    let state = Shared::default();
    let base_url = spawn_server(state.clone()).await;
    let notifier = Arc::new(RecordingNotifier::new());
    let navigator = Arc::new(RecordingNavigator::new());
    let service = FilmsService::new(
        &base_url,
        token.map(|t| t.to_string()),
        Duration::from_secs(5),
        notifier.clone(),
        navigator.clone(),
    )
    .unwrap();
    Harness { service, state, notifier, navigator }
}

#[tokio::test]
async fn test_get_film_sends_token_and_decodes() {
    let h = harness(Some("secret")).await;

    let film = h.service.get_film(7).await.unwrap();
    assert_eq!(film, sample_film(7));
    assert_eq!(h.state.lock().unwrap().tokens, vec![Some("secret".to_string())]);
    assert!(h.notifier.errors().is_empty());
}

#[tokio::test]
async fn test_no_token_means_no_header() {
    let h = harness(None).await;

    h.service.get_film(1).await.unwrap();
    assert_eq!(h.state.lock().unwrap().tokens, vec![None]);
}

#[tokio::test]
async fn test_error_statuses_are_classified_and_reported() {
    let h = harness(Some("secret")).await;

    let err = h.service.get_film(404).await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound(ref url) if url.ends_with("/films/404")));

    let err = h.service.get_film(400).await.unwrap_err();
    assert_eq!(
        err,
        ClientError::Rejected { status: 400, message: "Bad film id".to_string() }
    );

    let err = h.service.get_film(500).await.unwrap_err();
    assert_eq!(err, ClientError::Server { status: 500, message: "boom".to_string() });

    let errors = h.notifier.errors();
    assert_eq!(errors.len(), 3);
    assert_eq!(errors[1], "Request rejected (400): Bad film id");
}

#[tokio::test]
async fn test_unauthorized() {
    let h = harness(Some("expired")).await;

    let err = h.service.get_film(1).await.unwrap_err();
    assert_eq!(err, ClientError::Unauthorized);
    assert_eq!(h.notifier.errors().len(), 1);
}

#[tokio::test]
async fn test_null_text_fields_load() {
    let h = harness(None).await;

    let film = h.service.get_film(3).await.unwrap();
    assert_eq!(film.slovensky_nazov, "");
    assert_eq!(film.reziser[0].full_name(), "Fritz Lang");
    assert!(h.notifier.errors().is_empty());
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let h = harness(None).await;

    let err = h.service.get_film(2).await.unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)));
}

#[tokio::test]
async fn test_save_new_film_posts_whole_record() {
    let h = harness(Some("secret")).await;
    let film = Film {
        id: None,
        ..sample_film(0)
    };

    let saved = h.service.save_film(&film).await.unwrap();
    assert_eq!(saved.id, Some(99));
    assert_eq!(saved.nazov, "Citizen Kane");

    let state = h.state.lock().unwrap();
    let body = &state.saved[0];
    assert!(body.get("id").is_none());
    assert_eq!(body["imdbID"], "tt0033467");
    assert_eq!(body["slovenskyNazov"], "Občan Kane");
    assert_eq!(body["postava"][0]["herec"]["priezvisko"], "Welles");
    assert_eq!(body["poradieVRebricku"], json!({"AFI 1998": 1}));
    assert_eq!(state.tokens, vec![Some("secret".to_string())]);
    drop(state);

    assert_eq!(h.notifier.successes(), vec!["Film Citizen Kane saved"]);
    assert_eq!(h.navigator.take(), Some(FILMS_ROUTE.to_string()));
}

#[tokio::test]
async fn test_failed_save_does_not_navigate() {
    let h = harness(None).await;
    let film = Film {
        nazov: "reject me".to_string(),
        ..sample_film(5)
    };

    let err = h.service.save_film(&film).await.unwrap_err();
    assert_eq!(
        err,
        ClientError::Rejected { status: 400, message: "Title not allowed".to_string() }
    );
    assert!(h.notifier.successes().is_empty());
    assert_eq!(h.notifier.errors(), vec!["Request rejected (400): Title not allowed"]);
    assert_eq!(h.navigator.take(), None);
}

#[tokio::test]
async fn test_get_films_query_string() {
    let h = harness(None).await;

    let page = h.service.get_films(&FilmsQuery::new()).await.unwrap();
    assert_eq!(page.total_count, 42);
    assert_eq!(page.items.len(), 2);

    let query = FilmsQuery::page(2, 10).order_by("rok").descending(true).search("kane");
    h.service.get_films(&query).await.unwrap();

    let queries = h.state.lock().unwrap().queries.clone();
    assert_eq!(queries[0], None);
    assert_eq!(
        queries[1].as_deref(),
        Some("orderBy=rok&descending=true&indexFrom=20&indexTo=30&search=kane")
    );
}

#[tokio::test]
async fn test_unreachable_server() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let notifier = Arc::new(RecordingNotifier::new());
    let service = FilmsService::new(
        &format!("http://{}/", addr),
        None,
        Duration::from_secs(2),
        notifier.clone(),
        Arc::new(RecordingNavigator::new()),
    )
    .unwrap();

    let err = service.get_film(1).await.unwrap_err();
    assert!(matches!(err, ClientError::Unreachable(_)));
    assert_eq!(notifier.errors().len(), 1);
}
