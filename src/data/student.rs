use maud::{Markup, Render, html};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub native_place: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub major: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<i64>,
}

impl Student {
    /// Comma separated tags, trimmed, with blanks dropped.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tag
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
    }
}

impl Render for Student {
    fn render(&self) -> Markup {
        html! {
            (self.name)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Major {
    pub value: &'static str,
    pub label: &'static str,
}

impl Major {
    pub const ALL: [Self; 6] = [
        Self { value: "1", label: "Computer Science" },
        Self { value: "2", label: "Civil Engineering" },
        Self { value: "3", label: "Science" },
        Self { value: "4", label: "Business Administration" },
        Self { value: "5", label: "Electronic Information" },
        Self { value: "6", label: "Automation" },
    ];

    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|major| major.value == value)
    }

    /// Display label for a stored major, falling back to whatever the backend sent.
    pub fn label_for(value: Option<&str>) -> &str {
        match value {
            None => "",
            Some(value) => Self::from_value(value).map_or(value, |major| major.label),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gender {
    pub value: &'static str,
    pub label: &'static str,
}

impl Gender {
    pub const ALL: [Self; 3] = [
        Self { value: "男", label: "Male" },
        Self { value: "女", label: "Female" },
        Self { value: "其他", label: "Other" },
    ];

    pub fn label_for(value: Option<&str>) -> &str {
        match value {
            None => "",
            Some(value) => Self::ALL
                .into_iter()
                .find(|gender| gender.value == value)
                .map_or(value, |gender| gender.label),
        }
    }
}
