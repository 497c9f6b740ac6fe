use maud::{Markup, Render, html};

pub const INPUT_CLASSES: &str = "shadow appearance-none border rounded w-full py-2 px-3 leading-tight focus:outline-none focus:shadow-outline bg-gray-700 border-gray-600";

pub fn render_table<const N: usize>(titles: [&'static str; N], items: Vec<[Markup; N]>) -> Markup {
    html! {
        div class="overflow-x-auto" {
            table class="min-w-full bg-gray-800 rounded shadow-md" {
                thead class="bg-gray-700" {
                    tr {
                        @for title in titles {
                            th class="py-2 px-4 text-left font-semibold text-gray-300" {(title)}
                        }
                    }
                }
                tbody {
                    @for row in items {
                        tr class="hover:bg-gray-700" {
                            @for col in row {
                                td class="py-2 px-4 border-b border-gray-600 text-gray-200" {(col)}
                            }
                        }
                    }
                }
            }
        }
    }
}

pub fn title(s: impl Render) -> Markup {
    html! {
        h1 class="text-2xl font-semibold mb-4" {(s)}
    }
}

pub fn alert(message: impl Render) -> Markup {
    html! {
        div class="bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded relative mb-4" role="alert" {
            (message)
        }
    }
}

/// A labelled form control with an optional inline error underneath.
pub fn form_element(id: &str, label: &str, required: bool, error: Option<&str>, control: Markup) -> Markup {
    html! {
        div class="mb-4" {
            label for=(id) class="block text-sm font-bold mb-2 text-gray-300" {
                (label)
                @if required {
                    span class="text-red-500" {" *"}
                }
            }
            (control)
            @if let Some(error) = error {
                p class="text-red-400 text-xs italic mt-1" {(error)}
            }
        }
    }
}

pub fn simple_form_element(
    id: &str,
    label: &str,
    required: bool,
    kind: Option<&str>,
    value: &str,
    error: Option<&str>,
) -> Markup {
    form_element(id, label, required, error, html! {
        input type=(kind.unwrap_or("text")) id=(id) name=(id) value=(value) class=(INPUT_CLASSES);
    })
}

/// A `<select>` with a blank placeholder option followed by `(value, label)` options.
pub fn select_form_element<'a>(
    id: &str,
    label: &str,
    placeholder: &str,
    options: impl IntoIterator<Item = (&'a str, &'a str)>,
    selected: &str,
    error: Option<&str>,
) -> Markup {
    form_element(id, label, true, error, html! {
        select id=(id) name=(id) class=(INPUT_CLASSES) {
            option value="" {(placeholder)}
            @for (value, text) in options {
                option value=(value) selected[value == selected] {(text)}
            }
        }
    })
}

pub fn form_submit_button(text: &str, busy_text: &str) -> Markup {
    html! {
        button type="submit" class="bg-blue-500 hover:bg-blue-700 disabled:opacity-50 font-bold py-2 px-4 rounded focus:outline-none focus:shadow-outline" {
            span class="idle-label" {(text)}
            span class="htmx-indicator" {(busy_text)}
        }
    }
}

pub fn render_nav(active_path: &str) -> Markup {
    let link = |href: &str, text: &str| {
        let classes = if href == active_path {
            "border-b-2 border-white text-white px-1 pt-1 font-medium"
        } else {
            "border-b-2 border-transparent text-gray-300 hover:border-gray-300 hover:text-white px-1 pt-1 font-medium"
        };
        html! {
            a href=(href) class=(classes) {(text)}
        }
    };

    html! {
        nav class="bg-gray-800 shadow-md w-full" {
            div class="container mx-auto px-4 flex flex-row items-center justify-between h-16" {
                a href="/" class="text-xl font-bold text-white" {"Student Management"}
                div class="flex flex-row space-x-8" {
                    (link("/", "Students"))
                    (link("/students/create", "Add Student"))
                }
            }
        }
    }
}

pub fn render_footer(year: i16) -> Markup {
    html! {
        footer class="bg-gray-800 w-full mt-auto" {
            div class="container mx-auto px-4 py-6 text-center text-sm text-gray-400" {
                "© " (year) " Student Management System. All rights reserved."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nav_highlights_active_link() {
        let nav = render_nav("/students/create").into_string();
        assert!(nav.contains(r#"href="/students/create" class="border-b-2 border-white text-white"#));
        assert!(nav.contains(r#"href="/" class="border-b-2 border-transparent"#));
    }

    #[test]
    fn select_marks_chosen_option() {
        let markup = select_form_element(
            "major",
            "Major",
            "Select Major",
            [("1", "Computer Science"), ("2", "Civil Engineering")],
            "2",
            Some("Major is required"),
        )
        .into_string();
        assert!(markup.contains(r#"<option value="2" selected>Civil Engineering</option>"#));
        assert!(markup.contains(r#"<option value="1">Computer Science</option>"#));
        assert!(markup.contains("Major is required"));
    }

    #[test]
    fn form_values_are_escaped() {
        let markup = simple_form_element("name", "Name", true, None, "<b>\"x\"</b>", None).into_string();
        assert!(markup.contains("&lt;b&gt;&quot;x&quot;&lt;/b&gt;"));
    }
}
