use crate::{
    controllers::form::{Field, FormMode, StudentForm, StudentFormValues},
    data::student::{Gender, Major},
    error::RosterResult,
    maud_conveniences::{
        INPUT_CLASSES, alert, form_element, form_submit_button, select_form_element,
        simple_form_element, title,
    },
    routes::{details_failed, parse_student_id},
    state::RosterState,
};
use axum::{
    Form,
    extract::{Path, State},
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
};
use maud::{Markup, html};

const CREATE_PATH: &str = "/students/create";

fn is_htmx(headers: &HeaderMap) -> bool {
    headers.contains_key("HX-Request")
}

pub async fn get_create_student(State(state): State<RosterState>) -> Markup {
    state.render(CREATE_PATH, render_student_form(&StudentForm::create()))
}

pub async fn post_create_student(
    State(state): State<RosterState>,
    headers: HeaderMap,
    Form(values): Form<StudentFormValues>,
) -> Response {
    let form = StudentForm::new(FormMode::Create, values);
    submit(&state, &headers, form).await
}

pub async fn get_edit_student(
    State(state): State<RosterState>,
    Path(id): Path<String>,
) -> RosterResult<Response> {
    let id = parse_student_id(id)?;

    Ok(match state.api().get_by_id(id).await {
        Ok(student) => state
            .render("", render_student_form(&StudentForm::edit(id, &student)))
            .into_response(),
        Err(e) => details_failed(&state, &e),
    })
}

pub async fn post_edit_student(
    State(state): State<RosterState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Form(values): Form<StudentFormValues>,
) -> RosterResult<Response> {
    let id = parse_student_id(id)?;
    let form = StudentForm::new(FormMode::Edit { id }, values);
    Ok(submit(&state, &headers, form).await)
}

/// Saves and sends the browser back to the list, or redraws the form with what went wrong.
async fn submit(state: &RosterState, headers: &HeaderMap, mut form: StudentForm) -> Response {
    let htmx = is_htmx(headers);

    if form.submit(state.api()).await.is_some() {
        return if htmx {
            [("HX-Redirect", "/")].into_response()
        } else {
            Redirect::to("/").into_response()
        };
    }

    let markup = render_student_form(&form);
    if htmx {
        markup.into_response()
    } else {
        let active = if form.is_edit() { "" } else { CREATE_PATH };
        state.render(active, markup).into_response()
    }
}

pub fn render_student_form(form: &StudentForm) -> Markup {
    let (heading, action, submit_text) = match form.mode {
        FormMode::Create => ("Add New Student", CREATE_PATH.to_string(), "Create Student"),
        FormMode::Edit { id } => ("Edit Student", format!("/students/edit/{id}"), "Update Student"),
    };
    let values = &form.values;
    let error = |field| form.error_for(field);

    html! {
        div id="student_form" class="bg-gray-800 p-8 rounded shadow-md max-w-3xl mx-auto" {
            (title(heading))

            @if let Some(error) = form.error {
                (alert(error))
            }

            form method="post" action=(action) hx-post=(action) hx-target="#student_form" hx-swap="outerHTML" hx-disabled-elt="find button[type='submit']" hx-indicator="find button[type='submit']" {
                div class="grid grid-cols-1 md:grid-cols-2 gap-x-6" {
                    (simple_form_element(Field::Name.id(), "Name", true, None, &values.name, error(Field::Name)))
                    (select_form_element(
                        Field::Gender.id(),
                        "Gender",
                        "Select Gender",
                        Gender::ALL.iter().map(|g| (g.value, g.label)),
                        &values.gender,
                        error(Field::Gender),
                    ))
                    (simple_form_element(Field::Phone.id(), "Phone", true, Some("tel"), &values.phone, error(Field::Phone)))
                    (simple_form_element(Field::Age.id(), "Age", true, Some("number"), &values.age, error(Field::Age)))
                    (simple_form_element(Field::NativePlace.id(), "Native Place", false, None, &values.native_place, error(Field::NativePlace)))
                    (select_form_element(
                        Field::Major.id(),
                        "Major",
                        "Select Major",
                        Major::ALL.iter().map(|m| (m.value, m.label)),
                        &values.major,
                        error(Field::Major),
                    ))
                    (simple_form_element(Field::Email.id(), "Email", false, Some("email"), &values.email, error(Field::Email)))
                    (form_element(Field::Tag.id(), "Tags", false, error(Field::Tag), html! {
                        input type="text" id=(Field::Tag.id()) name=(Field::Tag.id()) value=(values.tag) placeholder="Comma separated tags" class=(INPUT_CLASSES);
                    }))
                }

                (form_element(Field::Remark.id(), "Remarks", false, error(Field::Remark), html! {
                    textarea id=(Field::Remark.id()) name=(Field::Remark.id()) rows="4" class=(INPUT_CLASSES) {(values.remark)}
                }))

                div class="flex flex-row justify-end items-center space-x-4" {
                    a href="/" class="bg-gray-700 hover:bg-gray-600 text-gray-300 font-bold py-2 px-4 rounded" {"Cancel"}
                    (form_submit_button(submit_text, "Saving..."))
                }
            }
        }
    }
}
