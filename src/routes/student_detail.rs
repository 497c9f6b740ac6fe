use crate::{
    data::student::{Gender, Major, Student},
    error::RosterResult,
    maud_conveniences::title,
    routes::{details_failed, parse_student_id},
    state::RosterState,
};
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, Render, html};

pub async fn get_student(
    State(state): State<RosterState>,
    Path(id): Path<String>,
) -> RosterResult<Response> {
    let id = parse_student_id(id)?;

    Ok(match state.api().get_by_id(id).await {
        Ok(student) => state.render("", render_student_detail(&student)).into_response(),
        Err(e) => details_failed(&state, &e),
    })
}

fn detail_row(label: &str, value: impl Render) -> Markup {
    html! {
        div class="mb-3" {
            p class="text-sm text-gray-400" {(label)}
            p class="text-gray-200 font-medium" {(value)}
        }
    }
}

fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("-")
}

pub fn render_student_detail(student: &Student) -> Markup {
    let tags: Vec<_> = student.tags().collect();

    html! {
        div class="bg-gray-800 p-8 rounded shadow-md max-w-3xl mx-auto" {
            div class="flex flex-row items-center justify-between" {
                (title(student))
                div class="flex flex-row space-x-4" {
                    a href="/" class="bg-gray-700 hover:bg-gray-600 text-gray-300 font-bold py-2 px-4 rounded" {"Back"}
                    @if let Some(id) = student.id {
                        a href={"/students/edit/" (id)} class="bg-blue-600 hover:bg-blue-800 font-bold py-2 px-4 rounded" {"Edit"}
                    }
                }
            }

            div class="grid grid-cols-1 md:grid-cols-2 gap-6 mt-4" {
                div {
                    h2 class="text-lg font-semibold mb-3" {"Personal Information"}
                    (detail_row("Name", &student.name))
                    (detail_row("Gender", or_dash(Some(Gender::label_for(student.gender.as_deref())))))
                    (detail_row("Age", student.age.map_or_else(|| "-".to_string(), |age| age.to_string())))
                    (detail_row("Native Place", or_dash(student.native_place.as_deref())))
                }
                div {
                    h2 class="text-lg font-semibold mb-3" {"Contact & Study"}
                    (detail_row("Phone", or_dash(student.phone.as_deref())))
                    (detail_row("Email", html! {
                        @if let Some(email) = student.email.as_deref().filter(|e| !e.is_empty()) {
                            a href={"mailto:" (email)} class="text-blue-400" {(email)}
                        } @else {
                            "-"
                        }
                    }))
                    (detail_row("Major", or_dash(Some(Major::label_for(student.major.as_deref())))))
                    (detail_row("Tags", html! {
                        @if tags.is_empty() {
                            "-"
                        } @else {
                            span class="flex flex-wrap gap-2" {
                                @for tag in &tags {
                                    span class="bg-blue-900 text-blue-200 text-xs px-2 py-1 rounded-full" {(tag)}
                                }
                            }
                        }
                    }))
                }
            }

            @if let Some(remark) = student.remark.as_deref().filter(|r| !r.is_empty()) {
                div class="mt-6" {
                    h2 class="text-lg font-semibold mb-3" {"Remarks"}
                    p class="text-gray-200 whitespace-pre-line" {(remark)}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{routes::DETAILS_FAILED, routes::tests::spawn_app, test_support::FakeBackend};

    #[test]
    fn detail_shows_labels_tags_and_remark() {
        let student = Student {
            id: Some(3),
            name: "Wang Fang".into(),
            gender: Some("女".into()),
            major: Some("6".into()),
            tag: Some("robotics, debate".into()),
            remark: Some("Scholarship".into()),
            ..Student::default()
        };

        let markup = render_student_detail(&student).into_string();
        assert!(markup.contains("Female"));
        assert!(markup.contains("Automation"));
        assert!(markup.contains(">robotics</span>"));
        assert!(markup.contains(">debate</span>"));
        assert!(markup.contains("Scholarship"));
        assert!(markup.contains(r#"href="/students/edit/3""#));
    }

    #[test]
    fn missing_optionals_render_dashes() {
        let student = Student {
            id: Some(1),
            name: "Solo".into(),
            ..Student::default()
        };
        let markup = render_student_detail(&student).into_string();
        assert!(!markup.contains("Remarks"));
        assert!(markup.contains(">-</p>"));
    }

    #[tokio::test]
    async fn detail_route_and_not_found() {
        let backend = FakeBackend::with_students(&["Amy"]);
        let (app, client) = spawn_app(&backend, 10).await;

        let found = client.get(format!("{app}/students/1")).send().await.unwrap();
        assert_eq!(found.status(), reqwest::StatusCode::OK);
        assert!(found.text().await.unwrap().contains("Amy"));

        let missing = client.get(format!("{app}/students/99")).send().await.unwrap();
        assert_eq!(missing.status(), reqwest::StatusCode::NOT_FOUND);
        assert!(missing.text().await.unwrap().contains(DETAILS_FAILED));
    }
}
