// tests/common/mod.rs
#![allow(dead_code)]

use aula::{
    db::{SchoolRepository, SqliteRepository},
    services::user_service,
    state::AppState,
    web::routes::build_app,
};
use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use std::sync::Arc;
use tower::ServiceExt;
use tower_sessions::{cookie::Key, MemoryStore};

pub const TEST_BCRYPT_COST: u32 = 4;

pub struct TestApp {
    pub router: Router,
    pub repo: Arc<SqliteRepository>,
}

/// App completa sobre SQLite em memória, já com os utilizadores iniciais.
pub async fn spawn_app() -> TestApp {
    let repo = Arc::new(SqliteRepository::in_memory().await.unwrap());
    user_service::seed_default_users(repo.as_ref(), TEST_BCRYPT_COST)
        .await
        .unwrap();

    let state = AppState::new(repo.clone(), TEST_BCRYPT_COST);
    let router = build_app(state, MemoryStore::default(), Key::from(&[7u8; 64]));
    TestApp { router, repo }
}

impl TestApp {
    pub async fn get(&self, path: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method("GET").uri(path);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.router
            .clone()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    pub async fn post_form(&self, path: &str, body: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.router
            .clone()
            .oneshot(builder.body(Body::from(body.to_string())).unwrap())
            .await
            .unwrap()
    }

    /// Faz login e devolve o cookie de sessão ("nome=valor").
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .post_form("/login", &format!("usuario={}&clave={}", username, password), None)
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), Some("/"));
        session_cookie(&response).expect("login sem cookie de sessão")
    }

    pub async fn user_id(&self, username: &str) -> i64 {
        self.repo
            .find_user_by_username(username)
            .await
            .unwrap()
            .unwrap()
            .id
    }

    pub async fn repo_attendance_is_empty(&self, user_id: i64) -> bool {
        self.repo.list_attendance(user_id).await.unwrap().is_empty()
    }

    pub async fn teacher_id(&self, username: &str) -> i64 {
        self.repo
            .list_teachers()
            .await
            .unwrap()
            .into_iter()
            .find(|t| t.username == username)
            .unwrap()
            .id
    }
}

pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

pub fn location(response: &Response<Body>) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
