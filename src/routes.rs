use crate::{
    error::{ParseStudentIdSnafu, RosterError, RosterResult},
    maud_conveniences::alert,
    routes::{
        student_detail::get_student,
        student_form::{get_create_student, get_edit_student, post_create_student, post_edit_student},
        students::{get_students, internal_delete_student, internal_get_students, internal_post_search},
    },
    state::RosterState,
};
use axum::{
    Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use maud::html;
use snafu::ResultExt;

pub mod student_detail;
pub mod student_form;
pub mod students;

pub const DETAILS_FAILED: &str = "Failed to load student details. Please try again later.";

pub fn router(state: RosterState) -> Router {
    Router::new()
        .route("/", get(get_students))
        .route("/students/create", get(get_create_student).post(post_create_student))
        .route("/students/edit/{id}", get(get_edit_student).post(post_edit_student))
        .route("/students/{id}", get(get_student))
        .route("/internal/students", get(internal_get_students))
        .route("/internal/students/search", post(internal_post_search))
        .route("/internal/students/{id}", delete(internal_delete_student))
        .with_state(state)
}

pub fn parse_student_id(original: String) -> RosterResult<i64> {
    original.parse().context(ParseStudentIdSnafu { original })
}

/// Full page shown when a single student couldn't be fetched.
pub fn details_failed(state: &RosterState, e: &RosterError) -> Response {
    warn!(?e, "unable to load student");

    let status = if e.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::BAD_GATEWAY
    };

    let page = state.render("", html! {
        div class="bg-gray-800 p-8 rounded shadow-md max-w-3xl mx-auto" {
            (alert(DETAILS_FAILED))
            a href="/" class="text-blue-400 hover:text-blue-200" {"Back to list"}
        }
    });

    (status, page).into_response()
}
