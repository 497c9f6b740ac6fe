//! An in-process stand-in for the student backend, served on an ephemeral port.

use crate::{api::StudentApi, data::student::Student};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    time::Duration,
};
use tokio::net::TcpListener;

#[derive(Default)]
struct Store {
    students: Vec<Student>,
    next_id: i64,
}

#[derive(Clone, Default)]
pub struct FakeBackend {
    store: Arc<Mutex<Store>>,
    requests: Arc<AtomicUsize>,
    broken: Arc<AtomicBool>,
    declines_deletes: Arc<AtomicBool>,
    pub last_query: Arc<Mutex<Option<String>>>,
}

impl FakeBackend {
    pub fn with_students(names: &[&str]) -> Self {
        let backend = Self::default();
        for name in names {
            backend.insert(Student {
                name: (*name).to_string(),
                gender: Some("男".into()),
                phone: Some("13800000000".into()),
                age: Some(20),
                major: Some("1".into()),
                ..Student::default()
            });
        }
        backend
    }

    pub fn insert(&self, mut student: Student) -> Student {
        let mut store = self.store.lock().unwrap();
        store.next_id += 1;
        student.id = Some(store.next_id);
        store.students.push(student.clone());
        student
    }

    pub fn students(&self) -> Vec<Student> {
        self.store.lock().unwrap().students.clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Makes every subsequent request fail with a 500.
    pub fn break_down(&self) {
        self.broken.store(true, Ordering::SeqCst);
    }

    pub fn decline_deletes(&self) {
        self.declines_deletes.store(true, Ordering::SeqCst);
    }

    /// Serves the fake on `127.0.0.1:0`, returning its `/api/students` base url.
    pub async fn spawn(&self) -> String {
        let app = Router::new()
            .route("/api/students", get(list_all).post(create))
            .route("/api/students/page", get(list_paged))
            .route("/api/students/search", get(search))
            .route("/api/students/search/page", get(search_paged))
            .route("/api/students/by-name", get(by_name))
            .route("/api/students/by-name/page", get(by_name_paged))
            .route("/api/students/by-phone", get(by_phone))
            .route("/api/students/by-phone/page", get(by_phone_paged))
            .route(
                "/api/students/{id}",
                get(get_by_id).put(update).delete(delete),
            )
            .with_state(self.clone());

        format!("{}/api/students", serve(app).await)
    }

    pub async fn spawn_client(&self) -> StudentApi {
        StudentApi::new(self.spawn().await, Duration::from_secs(5)).unwrap()
    }

    fn begin(&self, query: Option<&str>) -> Option<Response> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = query.map(ToString::to_string);
        self.broken.load(Ordering::SeqCst).then(|| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"success": false, "message": "database on fire", "data": null})),
            )
                .into_response()
        })
    }

    fn matching(&self, pred: impl Fn(&Student) -> bool) -> Vec<Student> {
        let mut found: Vec<_> = self
            .store
            .lock()
            .unwrap()
            .students
            .iter()
            .filter(|s| pred(s))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        found
    }
}

/// Serves `app` on an ephemeral port, returning `http://addr`.
pub async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn ok(data: impl serde::Serialize) -> Response {
    Json(json!({"success": true, "message": "ok", "data": data})).into_response()
}

fn not_found(id: i64) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"success": false, "message": format!("Student not found with ID: {id}"), "data": null})),
    )
        .into_response()
}

fn contains(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|h| h.to_lowercase().contains(&needle.to_lowercase()))
}

fn matches_term(student: &Student, term: &str) -> bool {
    term.trim().is_empty()
        || contains(Some(&student.name), term)
        || contains(student.phone.as_deref(), term)
        || contains(student.email.as_deref(), term)
}

#[derive(Deserialize, Default)]
struct FilterQuery {
    #[serde(default)]
    term: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    page: u32,
    #[serde(default = "default_size")]
    size: u32,
}

const fn default_size() -> u32 {
    10
}

fn paged(items: Vec<Student>, page: u32, size: u32) -> Response {
    let total_items = items.len() as u64;
    let total_pages = total_items.div_ceil(u64::from(size.max(1))) as u32;
    let content: Vec<_> = items
        .into_iter()
        .skip((page * size) as usize)
        .take(size as usize)
        .collect();
    ok(json!({
        "empty": content.is_empty(),
        "content": content,
        "currentPage": page,
        "totalItems": total_items,
        "totalPages": total_pages,
        "size": size,
        "first": page == 0,
        "last": page + 1 >= total_pages,
    }))
}

fn raw(query: &axum::extract::RawQuery) -> Option<&str> {
    query.0.as_deref()
}

async fn list_all(State(fake): State<FakeBackend>) -> Response {
    if let Some(err) = fake.begin(None) {
        return err;
    }
    ok(fake.matching(|_| true))
}

async fn list_paged(
    State(fake): State<FakeBackend>,
    raw_query: axum::extract::RawQuery,
    Query(q): Query<FilterQuery>,
) -> Response {
    if let Some(err) = fake.begin(raw(&raw_query)) {
        return err;
    }
    paged(fake.matching(|_| true), q.page, q.size)
}

async fn search(
    State(fake): State<FakeBackend>,
    raw_query: axum::extract::RawQuery,
    Query(q): Query<FilterQuery>,
) -> Response {
    if let Some(err) = fake.begin(raw(&raw_query)) {
        return err;
    }
    ok(fake.matching(|s| matches_term(s, &q.term)))
}

async fn search_paged(
    State(fake): State<FakeBackend>,
    raw_query: axum::extract::RawQuery,
    Query(q): Query<FilterQuery>,
) -> Response {
    if let Some(err) = fake.begin(raw(&raw_query)) {
        return err;
    }
    paged(fake.matching(|s| matches_term(s, &q.term)), q.page, q.size)
}

async fn by_name(State(fake): State<FakeBackend>, Query(q): Query<FilterQuery>) -> Response {
    if let Some(err) = fake.begin(None) {
        return err;
    }
    ok(fake.matching(|s| contains(Some(&s.name), &q.name)))
}

async fn by_name_paged(
    State(fake): State<FakeBackend>,
    raw_query: axum::extract::RawQuery,
    Query(q): Query<FilterQuery>,
) -> Response {
    if let Some(err) = fake.begin(raw(&raw_query)) {
        return err;
    }
    paged(
        fake.matching(|s| contains(Some(&s.name), &q.name)),
        q.page,
        q.size,
    )
}

async fn by_phone(State(fake): State<FakeBackend>, Query(q): Query<FilterQuery>) -> Response {
    if let Some(err) = fake.begin(None) {
        return err;
    }
    ok(fake.matching(|s| contains(s.phone.as_deref(), &q.phone)))
}

async fn by_phone_paged(
    State(fake): State<FakeBackend>,
    raw_query: axum::extract::RawQuery,
    Query(q): Query<FilterQuery>,
) -> Response {
    if let Some(err) = fake.begin(raw(&raw_query)) {
        return err;
    }
    paged(
        fake.matching(|s| contains(s.phone.as_deref(), &q.phone)),
        q.page,
        q.size,
    )
}

async fn get_by_id(State(fake): State<FakeBackend>, Path(id): Path<i64>) -> Response {
    if let Some(err) = fake.begin(None) {
        return err;
    }
    fake.matching(|s| s.id == Some(id))
        .pop()
        .map_or_else(|| not_found(id), ok)
}

async fn create(State(fake): State<FakeBackend>, Json(student): Json<Student>) -> Response {
    if let Some(err) = fake.begin(None) {
        return err;
    }
    let created = fake.insert(student);
    (StatusCode::CREATED, ok(created)).into_response()
}

async fn update(
    State(fake): State<FakeBackend>,
    Path(id): Path<i64>,
    Json(mut student): Json<Student>,
) -> Response {
    if let Some(err) = fake.begin(None) {
        return err;
    }
    let mut store = fake.store.lock().unwrap();
    let Some(existing) = store.students.iter_mut().find(|s| s.id == Some(id)) else {
        return not_found(id);
    };
    student.id = Some(id);
    *existing = student.clone();
    ok(student)
}

async fn delete(State(fake): State<FakeBackend>, Path(id): Path<i64>) -> Response {
    if let Some(err) = fake.begin(None) {
        return err;
    }
    if fake.declines_deletes.load(Ordering::SeqCst) {
        return Json(json!({"success": false, "message": "not today", "data": null}))
            .into_response();
    }
    let mut store = fake.store.lock().unwrap();
    let before = store.students.len();
    store.students.retain(|s| s.id != Some(id));
    if store.students.len() == before {
        return not_found(id);
    }
    ok(Value::Null)
}
