use crate::{
    controllers::list::StudentList,
    data::student::{Gender, Major, Student},
    error::RosterResult,
    maud_conveniences::{INPUT_CLASSES, alert, render_table, title},
    pagination::{PageLinks, PageWindow, render_pagination},
    routes::parse_student_id,
    state::RosterState,
};
use axum::{
    Form,
    extract::{Path, Query, State},
};
use maud::{Markup, html};
use serde::Deserialize;
use serde_json::json;

/// List state carried between requests in `hx-vals`.
#[derive(Deserialize, Default, Debug)]
#[serde(default)]
pub struct ListQuery {
    pub term: String,
    pub page: u32,
    pub total_pages: u32,
    pub goto: Option<i64>,
}

pub async fn get_students(
    State(state): State<RosterState>,
    Query(ListQuery { term, page, .. }): Query<ListQuery>,
) -> Markup {
    let mut list = StudentList::restore(term, page, 0, state.config().page_size());
    list.refresh(state.api()).await;

    state.render("/", html! {
        div class="bg-gray-800 p-8 rounded shadow-md w-full flex flex-col space-y-4" {
            div class="flex flex-row items-center justify-between" {
                (title("Students"))
                a href="/students/create" class="bg-blue-600 hover:bg-blue-800 font-bold py-2 px-4 rounded" {
                    "Add New Student"
                }
            }

            form method="get" action="/" hx-post="/internal/students/search" hx-target="#student_list" hx-swap="outerHTML" hx-sync="#student_list:drop" hx-indicator="#list_loading" class="flex flex-row space-x-2" {
                input type="search" name="term" value=(list.search_term) placeholder="Search by name, phone, or email..." class=(INPUT_CLASSES);
                button type="submit" class="bg-slate-600 hover:bg-slate-800 font-bold py-2 px-4 rounded" {"Search"}
            }

            div id="list_loading" class="htmx-indicator text-gray-400 text-center" {"Loading students..."}

            (render_student_list(&list))
        }
    })
}

pub async fn internal_get_students(
    State(state): State<RosterState>,
    Query(ListQuery {
        term,
        page,
        total_pages,
        goto,
    }): Query<ListQuery>,
) -> Markup {
    let mut list = StudentList::restore(term, page, total_pages, state.config().page_size());
    if let Some(goto) = goto {
        list.change_page(goto);
    }
    list.refresh(state.api()).await;

    render_student_list(&list)
}

#[derive(Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    term: String,
}

pub async fn internal_post_search(
    State(state): State<RosterState>,
    Form(SearchForm { term }): Form<SearchForm>,
) -> Markup {
    let mut list = StudentList::new(state.config().page_size());
    list.submit_search(term);
    list.refresh(state.api()).await;

    render_student_list(&list)
}

pub async fn internal_delete_student(
    State(state): State<RosterState>,
    Path(id): Path<String>,
    Query(ListQuery {
        term,
        page,
        total_pages,
        ..
    }): Query<ListQuery>,
) -> RosterResult<Markup> {
    let id = parse_student_id(id)?;

    let mut list = StudentList::restore(term, page, total_pages, state.config().page_size());
    list.delete(state.api(), id).await;

    Ok(render_student_list(&list))
}

fn list_vals(list: &StudentList) -> serde_json::Value {
    json!({
        "term": list.search_term,
        "page": list.pagination.current_page,
        "total_pages": list.pagination.total_pages,
    })
}

fn student_row(student: &Student, vals: &str) -> [Markup; 6] {
    let actions = match student.id {
        Some(id) => html! {
            div class="flex flex-row space-x-3" {
                a href={"/students/" (id)} class="text-blue-400 hover:text-blue-200" {"View"}
                a href={"/students/edit/" (id)} class="text-yellow-400 hover:text-yellow-200" {"Edit"}
                button class="text-red-400 hover:text-red-200" hx-delete={"/internal/students/" (id)} hx-confirm="Are you sure you want to delete this student?" hx-target="#student_list" hx-swap="outerHTML" hx-sync="#student_list:drop" hx-vals=(vals) {
                    "Delete"
                }
            }
        },
        None => html! {},
    };

    [
        html! { (student) },
        html! { (Gender::label_for(student.gender.as_deref())) },
        html! { (student.phone.as_deref().unwrap_or_default()) },
        html! { (Major::label_for(student.major.as_deref())) },
        html! { (student.email.as_deref().unwrap_or_default()) },
        actions,
    ]
}

/// The swappable part of the list page: errors, rows, and pagination.
pub fn render_student_list(list: &StudentList) -> Markup {
    let vals = list_vals(list);
    let row_vals = vals.to_string();
    let rows: Vec<_> = list
        .students
        .iter()
        .map(|student| student_row(student, &row_vals))
        .collect();

    let links = PageLinks {
        endpoint: "/internal/students",
        target: "#student_list",
        vals: |goto: u32| {
            let mut vals = vals.clone();
            vals["goto"] = json!(goto);
            vals.to_string()
        },
    };

    html! {
        div id="student_list" class="flex flex-col" {
            @if let Some(error) = list.error {
                (alert(error))
            }

            @if list.students.is_empty() {
                @if list.error.is_none() {
                    p class="text-center text-gray-400 py-8" {"No students found."}
                }
            } @else {
                (render_table(["Name", "Gender", "Phone", "Major", "Email", "Actions"], rows))

                @if let Some(window) = PageWindow::new(list.pagination.current_page, list.pagination.total_pages) {
                    @if let Some((from, to)) = list.showing {
                        p class="text-sm text-gray-400 mt-4" {
                            "Showing " (from) " to " (to) " of " (list.pagination.total_items) " results"
                        }
                    }
                    (render_pagination(&window, &links))
                }
            }
        }
    }
}
