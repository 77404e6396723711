#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode, header},
};
use http_body_util::BodyExt;
use lectern::config::Config;
use lectern::db::{Store, User};
use lectern::domain::Price;
use lectern::models::course::{Course, Lesson, NewCourse, NewLesson, NewModule};
use lectern::web::{AppState, create_app_state_from_config, router};
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;

pub const PASSWORD: &str = "correct-horse-battery";

pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
    cookie: Option<String>,
    db_path: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        std::fs::remove_file(&self.db_path).ok();
    }
}

pub fn test_config(db_path: &std::path::Path) -> Config {
    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());
    config.server.secure_cookies = false;
    config.security.argon2_memory_cost_kib = 1024;
    config.security.argon2_time_cost = 1;
    config
}

pub async fn spawn_app() -> TestApp {
    let db_path =
        std::env::temp_dir().join(format!("lectern-test-{}.db", uuid::Uuid::new_v4()));
    let config = test_config(&db_path);

    let state = create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");

    TestApp {
        router: router(state.clone()),
        state,
        cookie: None,
        db_path,
    }
}

impl TestApp {
    pub fn store(&self) -> &Store {
        self.state.store()
    }

    /// Sends a request carrying the session cookie and keeps any refreshed one.
    pub async fn send(&mut self, request: Request<Body>) -> Response<Body> {
        let mut request = request;
        if let Some(cookie) = &self.cookie {
            request
                .headers_mut()
                .insert(header::COOKIE, cookie.parse().unwrap());
        }

        let response = self.router.clone().oneshot(request).await.unwrap();

        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let pair = set_cookie.to_str().unwrap().split(';').next().unwrap();
            self.cookie = Some(pair.to_string());
        }

        response
    }

    pub async fn get(&mut self, uri: &str) -> Response<Body> {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post(&mut self, uri: &str) -> Response<Body> {
        self.post_form(uri, "").await
    }

    pub async fn post_form(&mut self, uri: &str, form: &str) -> Response<Body> {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, mime::APPLICATION_WWW_FORM_URLENCODED.as_ref())
                .body(Body::from(form.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn login(&mut self, username: &str) {
        let form = format!("username={username}&password={PASSWORD}&next=%2F");
        let response = self.post_form("/accounts/login/", &form).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/");
    }

    pub async fn create_user(&self, username: &str) -> User {
        self.store()
            .create_user(username, PASSWORD, false, "", &self.state.config().security)
            .await
            .unwrap()
    }
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("missing Location header")
        .to_str()
        .unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// A published course with modules inserted out of order:
/// module 1 = [Welcome (preview), Syntax, Types], module 2 = [Ownership].
pub struct Seed {
    pub course: Course,
    pub hidden: Course,
    /// Lessons in course order.
    pub lessons: Vec<Lesson>,
}

impl Seed {
    pub fn preview(&self) -> &Lesson {
        &self.lessons[0]
    }

    pub fn locked(&self) -> &Lesson {
        &self.lessons[1]
    }
}

async fn lesson(store: &Store, module_id: i32, title: &str, order: u32, preview: bool) -> Lesson {
    store
        .create_lesson(NewLesson {
            module_id,
            title: title.to_string(),
            slug: String::new(),
            content: format!("Body of {title}"),
            video_url: None,
            order,
            is_free_preview: preview,
        })
        .await
        .unwrap()
}

pub async fn seed(app: &TestApp) -> Seed {
    let store = app.store();
    let instructor = store
        .create_user("teacher", PASSWORD, true, "Writes courses", &app.state.config().security)
        .await
        .unwrap();

    let course = store
        .create_course(NewCourse {
            title: "Rust 101".to_string(),
            slug: String::new(),
            description: "Learn Rust".to_string(),
            instructor_id: instructor.id,
            price: Price::from_cents(1999).unwrap(),
            is_published: true,
            image: None,
        })
        .await
        .unwrap();

    let hidden = store
        .create_course(NewCourse {
            title: "Draft Course".to_string(),
            slug: "draft-course".to_string(),
            description: "Not ready".to_string(),
            instructor_id: instructor.id,
            price: Price::FREE,
            is_published: false,
            image: None,
        })
        .await
        .unwrap();

    let second = store
        .create_module(NewModule {
            course_id: course.id,
            title: "Advanced".to_string(),
            order: 2,
            description: String::new(),
        })
        .await
        .unwrap();
    let first = store
        .create_module(NewModule {
            course_id: course.id,
            title: "Basics".to_string(),
            order: 1,
            description: String::new(),
        })
        .await
        .unwrap();

    let ownership = lesson(store, second.id, "Ownership", 1, false).await;
    let types = lesson(store, first.id, "Types", 3, false).await;
    let welcome = lesson(store, first.id, "Welcome", 1, true).await;
    let syntax = lesson(store, first.id, "Syntax", 2, false).await;

    Seed {
        course,
        hidden,
        lessons: vec![welcome, syntax, types, ownership],
    }
}
