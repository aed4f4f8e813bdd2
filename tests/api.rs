use serde_json::{json, Value};
use tempfile::TempDir;
use warp::http::StatusCode;

use quiz_server::{routes, Store};

fn setup() -> (TempDir, Store) {
    let dir = TempDir::with_prefix("quiz-api").unwrap();
    let store = Store::new(dir.path());
    (dir, store)
}

fn body(response: &warp::http::Response<warp::hyper::body::Bytes>) -> Value {
    serde_json::from_slice(response.body()).unwrap()
}

fn quiz_one() -> Value {
    json!({
        "id": "t1",
        "title": "Quiz 1",
        "questions": [{
            "type": "single",
            "prompt": "Best number?",
            "options": [
                { "id": "a", "text": "ten", "points": 10, "is_correct": true },
                { "id": "b", "text": "minus one", "points": -1, "is_correct": false }
            ]
        }]
    })
}

async fn post(store: &Store, payload: &Value) -> warp::http::Response<warp::hyper::body::Bytes> {
    warp::test::request()
        .method("POST")
        .path("/api/tests")
        .json(payload)
        .reply(&routes(store.clone()))
        .await
}

async fn get(store: &Store, path: &str) -> warp::http::Response<warp::hyper::body::Bytes> {
    warp::test::request()
        .method("GET")
        .path(path)
        .reply(&routes(store.clone()))
        .await
}

#[tokio::test]
async fn saved_quiz_is_served_with_its_golden_number() {
    let (dir, store) = setup();

    let response = post(&store, &quiz_one()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let saved = dir.path().join("t1.json");
    assert_eq!(
        body(&response),
        json!({ "ok": true, "saved": saved.display().to_string() })
    );

    let response = get(&store, "/api/quiz/t1").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body(&response),
        json!({
            "id": "t1",
            "title": "Quiz 1",
            "questions": quiz_one()["questions"],
            "golden": 10
        })
    );
}

#[tokio::test]
async fn stored_file_holds_only_title_and_questions() {
    let (dir, store) = setup();
    let mut payload = quiz_one();
    payload["title"] = json!("  Quiz 1  ");
    payload["owner"] = json!("someone");
    assert_eq!(post(&store, &payload).await.status(), StatusCode::OK);

    let stored: Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("t1.json")).unwrap()).unwrap();
    assert_eq!(
        stored,
        json!({ "title": "Quiz 1", "questions": quiz_one()["questions"] })
    );
}

#[tokio::test]
async fn listing_shows_every_stored_quiz() {
    let (dir, store) = setup();
    assert_eq!(post(&store, &quiz_one()).await.status(), StatusCode::OK);
    std::fs::write(dir.path().join("broken.json"), "not json at all").unwrap();

    let response = get(&store, "/api/tests").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body(&response),
        json!([
            { "id": "broken", "title": "broken (invalid json)", "num_questions": 0 },
            { "id": "t1", "title": "Quiz 1", "num_questions": 1 }
        ])
    );
}

#[tokio::test]
async fn resubmitting_a_quiz_changes_nothing() {
    let (dir, store) = setup();
    assert_eq!(post(&store, &quiz_one()).await.status(), StatusCode::OK);
    let first = std::fs::read(dir.path().join("t1.json")).unwrap();
    let listed = body(&get(&store, "/api/tests").await);
    let served = body(&get(&store, "/api/quiz/t1").await);

    assert_eq!(post(&store, &quiz_one()).await.status(), StatusCode::OK);
    assert_eq!(std::fs::read(dir.path().join("t1.json")).unwrap(), first);
    assert_eq!(body(&get(&store, "/api/tests").await), listed);
    assert_eq!(body(&get(&store, "/api/quiz/t1").await), served);
}

#[tokio::test]
async fn unknown_quiz_is_not_found() {
    let (_dir, store) = setup();
    let response = get(&store, "/api/quiz/missing").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body(&response),
        json!({ "error": "test not found", "id": "missing" })
    );

    let response = get(&store, "/api/quiz/..").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_quiz_fetch_is_a_server_error() {
    let (dir, store) = setup();
    std::fs::write(dir.path().join("bad.json"), "{").unwrap();
    let response = get(&store, "/api/quiz/bad").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body(&response);
    assert_eq!(body["id"], json!("bad"));
    assert!(body["error"].as_str().unwrap().starts_with("test is malformed"));
}

#[tokio::test]
async fn invalid_quizzes_are_rejected_with_a_reason() {
    let (dir, store) = setup();

    let mut zero_points = quiz_one();
    zero_points["questions"][0]["options"][1]["points"] = json!(0);
    let mut no_correct = quiz_one();
    no_correct["questions"][0]["options"][0]["is_correct"] = json!(false);
    let mut no_title = quiz_one();
    no_title["title"] = json!("");
    let mut no_questions = quiz_one();
    no_questions["questions"] = json!([]);

    let cases = [
        (zero_points, "Question 1 option b: 'points' must be non-zero number"),
        (no_correct, "Question 1: at least one option must be marked is_correct"),
        (no_title, "Missing 'title'"),
        (no_questions, "Questions must be a non-empty list"),
    ];
    for (payload, reason) in cases {
        let response = post(&store, &payload).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body(&response), json!({ "error": reason }));
    }
    assert!(!dir.path().join("t1.json").exists());
}

#[tokio::test]
async fn non_json_body_reports_the_missing_id() {
    let (_dir, store) = setup();
    let response = warp::test::request()
        .method("POST")
        .path("/api/tests")
        .body("title=Quiz")
        .reply(&routes(store))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body(&response),
        json!({ "error": "Missing 'id' (filename without .json)" })
    );
}

#[tokio::test]
async fn non_object_body_is_a_bad_request() {
    let (_dir, store) = setup();
    let response = post(&store, &json!([{ "id": "t1", "title": "T" }])).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body(&response);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid quiz payload"));
}

#[tokio::test]
async fn save_failure_is_a_server_error() {
    let dir = TempDir::with_prefix("quiz-api").unwrap();
    let store = Store::new(dir.path().join("gone"));
    let response = post(&store, &quiz_one()).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body(&response)["error"]
        .as_str()
        .unwrap()
        .starts_with("Failed to save: "));
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (_dir, store) = setup();
    let response = get(&store, "/api/nothing").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body(&response), json!({ "error": "route not found" }));
}

#[tokio::test]
async fn ids_with_spaces_and_accents_round_trip() {
    let (_dir, store) = setup();
    for (id, path) in [("my quiz", "/api/quiz/my%20quiz"), ("größe", "/api/quiz/gr%C3%B6%C3%9Fe")] {
        let mut payload = quiz_one();
        payload["id"] = json!(id);
        assert_eq!(post(&store, &payload).await.status(), StatusCode::OK);

        let response = get(&store, path).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body(&response)["id"], json!(id));
        assert_eq!(body(&response)["golden"], json!(10));
    }

    let response = get(&store, "/api/quiz/%FF").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let response = get(&store, "/api/quiz/..%2Fsecret").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_string_type_follows_the_rule_order() {
    let (_dir, store) = setup();
    let response = post(
        &store,
        &json!({ "id": "t", "title": "", "questions": [{ "type": 5, "options": [] }] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body(&response), json!({ "error": "Missing 'title'" }));

    let response = post(
        &store,
        &json!({ "id": "t", "title": "T", "questions": [{ "type": 5, "options": [] }] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body(&response),
        json!({ "error": "Question 1: 'type' must be 'single' or 'multi'" })
    );
}

#[tokio::test]
async fn hand_edited_file_without_types_is_listed_and_served() {
    let (dir, store) = setup();
    std::fs::write(
        dir.path().join("hand.json"),
        r#"{"title":"Hand","questions":[{"options":[{"id":"a","points":4,"is_correct":true}]}]}"#,
    )
    .unwrap();

    assert_eq!(
        body(&get(&store, "/api/tests").await),
        json!([{ "id": "hand", "title": "Hand", "num_questions": 1 }])
    );
    let response = get(&store, "/api/quiz/hand").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body(&response),
        json!({
            "id": "hand",
            "title": "Hand",
            "questions": [{ "options": [{ "id": "a", "points": 4, "is_correct": true }] }],
            "golden": 4
        })
    );
}

#[tokio::test]
async fn post_without_content_length_is_refused() {
    let (_dir, store) = setup();
    let response = warp::test::request()
        .method("POST")
        .path("/api/tests")
        .reply(&routes(store))
        .await;
    assert_eq!(response.status(), StatusCode::LENGTH_REQUIRED);
    assert!(body(&response)["error"].is_string());
}
