#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use assesify_core::time::fixed_clock;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{Value, json};
use services::{ApiConfig, AppServices};
use storage::repository::Storage;

pub const STUDENT_TOKEN: &str = "student-token";
pub const TEACHER_TOKEN: &str = "teacher-token";
pub const EXPIRED_QUIZ: &str = "401";
pub const MALFORMED_TOKEN_QUIZ: &str = "422";

/// What the fake API saw.
#[derive(Clone, Default)]
pub struct Recorded {
    pub submissions: Arc<Mutex<Vec<(String, Value)>>>,
    pub bearer: Arc<Mutex<Vec<Option<String>>>>,
    pub joined_codes: Arc<Mutex<Vec<String>>>,
}

impl Recorded {
    fn saw(&self, headers: &HeaderMap) -> Option<String> {
        let token = headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::to_string);
        self.bearer.lock().unwrap().push(token.clone());
        token
    }

    pub fn last_bearer(&self) -> Option<String> {
        self.bearer.lock().unwrap().last().cloned().flatten()
    }
}

/// Serve a fake Assesify API on a random port.
/// Returns the base URL (e.g. "http://127.0.0.1:12345/api").
pub async fn spawn_api() -> (String, Recorded) {
    let recorded = Recorded::default();

    let app = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/auth/profile", get(profile))
        .route("/api/auth/update-profile", put(update_profile))
        .route("/api/classes/", get(list_classes).post(create_class))
        .route("/api/classes/join", post(join_class))
        .route("/api/teacher/invite", post(invite))
        .route("/api/quizzes/recent", get(recent_quizzes))
        .route("/api/quizzes/{id}", get(quiz))
        .route("/api/quizzes/{id}/submit", post(submit))
        .with_state(recorded.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://127.0.0.1:{port}/api"), recorded)
}

/// Services wired to a fresh fake API and an in-memory cache.
pub async fn spawn_services() -> (AppServices, Storage, Recorded) {
    let (base_url, recorded) = spawn_api().await;
    let config = ApiConfig::new(&base_url).unwrap();
    let storage = Storage::in_memory();
    let services = AppServices::new(&config, storage.clone(), fixed_clock())
        .await
        .unwrap();
    (services, storage, recorded)
}

fn error(status: StatusCode, key: &str, message: &str) -> Response {
    (status, Json(json!({ key: message }))).into_response()
}

async fn login(Json(body): Json<Value>) -> Response {
    match (body["email"].as_str(), body["password"].as_str()) {
        (Some("monica@friends.com"), Some("secret")) => Json(json!({
            "access_token": STUDENT_TOKEN,
            "user_id": 3,
            "is_teacher": false,
            "full_name": "Monica Geller",
        }))
        .into_response(),
        (Some("ross@friends.com"), Some("secret")) => Json(json!({
            "access_token": TEACHER_TOKEN,
            "user_id": 4,
            "is_teacher": true,
            "full_name": "Ross Geller",
        }))
        .into_response(),
        _ => error(StatusCode::UNAUTHORIZED, "msg", "Invalid credentials"),
    }
}

async fn register(Json(body): Json<Value>) -> Response {
    if body["email"] == "monica@friends.com" {
        return error(StatusCode::BAD_REQUEST, "msg", "User already exists");
    }
    (
        StatusCode::CREATED,
        Json(json!({ "msg": "User created successfully" })),
    )
        .into_response()
}

async fn profile(State(recorded): State<Recorded>, headers: HeaderMap) -> Response {
    match recorded.saw(&headers).as_deref() {
        Some(STUDENT_TOKEN) => Json(json!({
            "id": 3,
            "full_name": "Monica Geller",
            "email": "monica@friends.com",
            "is_teacher": false,
        }))
        .into_response(),
        _ => error(StatusCode::UNAUTHORIZED, "msg", "Missing Authorization Header"),
    }
}

async fn update_profile(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if recorded.saw(&headers).is_none() {
        return error(StatusCode::UNAUTHORIZED, "msg", "Missing Authorization Header");
    }
    Json(json!({
        "msg": "Profile updated",
        "user": {
            "id": 3,
            "full_name": body["full_name"],
            "email": "monica@friends.com",
            "is_teacher": false,
        },
    }))
    .into_response()
}

async fn list_classes(State(recorded): State<Recorded>, headers: HeaderMap) -> Response {
    recorded.saw(&headers);
    Json(json!([
        {
            "id": 1,
            "name": "Biology",
            "section": "A",
            "teacher": "Ross Geller",
            "code": "BIO123",
            "progress": 40,
            "color": "bg-green-500",
        },
        { "id": 2, "name": "Cooking" },
    ]))
    .into_response()
}

async fn join_class(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    recorded.saw(&headers);
    let code = body["code"].as_str().unwrap_or_default().to_string();
    recorded.joined_codes.lock().unwrap().push(code.clone());
    if code != "BIO123" {
        return error(StatusCode::NOT_FOUND, "msg", "Invalid class code");
    }
    Json(json!({
        "msg": "Joined class successfully",
        "class": { "id": 1, "name": "Biology", "section": "A", "teacher": "Ross Geller" },
    }))
    .into_response()
}

async fn create_class(State(recorded): State<Recorded>, headers: HeaderMap) -> Response {
    recorded.saw(&headers);
    (
        StatusCode::CREATED,
        Json(json!({ "msg": "Class created", "code": "XYZ789", "id": 9 })),
    )
        .into_response()
}

async fn invite(State(recorded): State<Recorded>, headers: HeaderMap) -> Response {
    if recorded.saw(&headers).as_deref() != Some(TEACHER_TOKEN) {
        return error(StatusCode::FORBIDDEN, "msg", "Teachers only");
    }
    (
        StatusCode::CREATED,
        Json(json!({ "msg": "Invitation sent" })),
    )
        .into_response()
}

async fn recent_quizzes(State(recorded): State<Recorded>, headers: HeaderMap) -> Response {
    recorded.saw(&headers);
    Json(json!([
        {
            "id": 1,
            "title": "Cell basics",
            "topic": "Biology",
            "questions_count": 3,
            "created_at": "2024-01-01T00:00:00",
        },
    ]))
    .into_response()
}

async fn quiz(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    recorded.saw(&headers);
    match id.as_str() {
        "1" => Json(json!({
            "questions": [
                {
                    "question": "What is the powerhouse of the cell?",
                    "answer": "Mitochondria produce ATP.",
                    "options": ["Nucleus", "Mitochondria", "Ribosome"],
                    "correct_answer": "Mitochondria",
                },
                {
                    "question": "Plants make food by photosynthesis.",
                    "answer": "Chlorophyll captures light.",
                    "correct_answer": "True",
                    "hint": "Think of leaves.",
                },
                {
                    "question": "Which carries genetic code?",
                    "answer": "DNA stores genetic information.",
                    "options": ["DNA", "ATP"],
                    "correct_answer": "DNA",
                },
            ],
        }))
        .into_response(),
        "999" => Json(json!({ "questions": [] })).into_response(),
        EXPIRED_QUIZ => error(StatusCode::UNAUTHORIZED, "msg", "Token has expired"),
        MALFORMED_TOKEN_QUIZ => error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "msg",
            "Signature verification failed",
        ),
        _ => error(StatusCode::NOT_FOUND, "message", "Quiz not found"),
    }
}

async fn submit(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    recorded.saw(&headers);
    recorded.submissions.lock().unwrap().push((id, body));
    Json(json!({
        "message": "Quiz submitted",
        "attempt_id": 11,
        "score": 66.7,
        "health": 5,
        "streak": 2,
        "diamonds_earned": 4,
    }))
    .into_response()
}
