use crate::{
    api::StudentApi,
    data::student::{Major, Student},
};
use email_address::EmailAddress;
use serde::Deserialize;
use std::{collections::BTreeMap, str::FromStr};

pub const SAVE_FAILED: &str = "Failed to save student. Please try again.";

/// Raw form input, exactly as typed.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct StudentFormValues {
    pub name: String,
    pub gender: String,
    pub phone: String,
    pub age: String,
    pub native_place: String,
    pub major: String,
    pub email: String,
    pub tag: String,
    pub remark: String,
}

impl StudentFormValues {
    pub fn from_student(student: &Student) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();

        Self {
            name: student.name.clone(),
            gender: text(&student.gender),
            phone: text(&student.phone),
            age: student.age.map(|age| age.to_string()).unwrap_or_default(),
            native_place: text(&student.native_place),
            major: text(&student.major),
            email: text(&student.email),
            tag: text(&student.tag),
            remark: text(&student.remark),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Gender => &self.gender,
            Field::Phone => &self.phone,
            Field::Age => &self.age,
            Field::NativePlace => &self.native_place,
            Field::Major => &self.major,
            Field::Email => &self.email,
            Field::Tag => &self.tag,
            Field::Remark => &self.remark,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    Name,
    Gender,
    Phone,
    Age,
    NativePlace,
    Major,
    Email,
    Tag,
    Remark,
}

impl Field {
    /// The form control's `id`/`name`.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Gender => "gender",
            Self::Phone => "phone",
            Self::Age => "age",
            Self::NativePlace => "native_place",
            Self::Major => "major",
            Self::Email => "email",
            Self::Tag => "tag",
            Self::Remark => "remark",
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Rule {
    Required(&'static str),
    MaxChars(usize, &'static str),
    Matches(fn(&str) -> bool, &'static str),
    AtLeast(i64, &'static str),
    AtMost(i64, &'static str),
}

impl Rule {
    fn check(self, value: &str) -> Result<(), &'static str> {
        let ok = match self {
            Self::Required(_) => !value.is_empty(),
            Self::MaxChars(max, _) => value.chars().count() <= max,
            Self::Matches(pred, _) => pred(value),
            Self::AtLeast(min, _) => value.parse::<i64>().is_ok_and(|n| n >= min),
            Self::AtMost(max, _) => value.parse::<i64>().is_ok_and(|n| n <= max),
        };

        match self {
            _ if ok => Ok(()),
            Self::Required(msg)
            | Self::MaxChars(_, msg)
            | Self::Matches(_, msg)
            | Self::AtLeast(_, msg)
            | Self::AtMost(_, msg) => Err(msg),
        }
    }
}

fn digits_only(value: &str) -> bool {
    value.chars().all(|c| c.is_ascii_digit())
}

fn whole_number(value: &str) -> bool {
    value.parse::<i64>().is_ok()
}

fn listed_major(value: &str) -> bool {
    Major::from_value(value).is_some()
}

fn email_like(value: &str) -> bool {
    EmailAddress::from_str(value).is_ok_and(|email| email.domain().contains('.'))
}

/// Checked top to bottom per field; the first failing rule is the one reported. Optional
/// fields that are left blank skip their rules.
const RULES: [(Field, &[Rule]); 9] = [
    (Field::Name, &[
        Rule::Required("Name is required"),
        Rule::MaxChars(64, "Name must be less than 64 characters"),
    ]),
    (Field::Gender, &[Rule::Required("Gender is required")]),
    (Field::Phone, &[
        Rule::Required("Phone is required"),
        Rule::MaxChars(16, "Phone must be less than 16 characters"),
        Rule::Matches(digits_only, "Phone must contain only digits"),
    ]),
    (Field::Age, &[
        Rule::Required("Age is required"),
        Rule::Matches(whole_number, "Age must be a whole number"),
        Rule::AtLeast(0, "Age must be positive"),
        Rule::AtMost(150, "Age cannot exceed 150"),
    ]),
    (Field::NativePlace, &[Rule::MaxChars(64, "Native place must be less than 64 characters")]),
    (Field::Major, &[
        Rule::Required("Major is required"),
        Rule::Matches(listed_major, "Please choose a listed major"),
    ]),
    (Field::Email, &[
        Rule::MaxChars(32, "Email must be less than 32 characters"),
        Rule::Matches(email_like, "Invalid email format"),
    ]),
    (Field::Tag, &[Rule::MaxChars(512, "Tags must be less than 512 characters")]),
    (Field::Remark, &[Rule::MaxChars(512, "Remarks must be less than 512 characters")]),
];

pub type FieldErrors = BTreeMap<Field, &'static str>;

/// Validates trimmed input, producing the record to send on success.
pub fn validate(values: &StudentFormValues) -> Result<Student, FieldErrors> {
    let mut errors = FieldErrors::new();

    for (field, rules) in RULES {
        let value = values.get(field).trim();
        let optional = !matches!(rules.first(), Some(Rule::Required(_)));
        if optional && value.is_empty() {
            continue;
        }

        if let Some(msg) = rules.iter().find_map(|rule| rule.check(value).err()) {
            errors.insert(field, msg);
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let text = |field| {
        let value = values.get(field).trim();
        (!value.is_empty()).then(|| value.to_string())
    };

    Ok(Student {
        name: values.name.trim().to_string(),
        gender: text(Field::Gender),
        phone: text(Field::Phone),
        age: values.age.trim().parse().ok(),
        native_place: text(Field::NativePlace),
        major: text(Field::Major),
        email: text(Field::Email),
        tag: text(Field::Tag),
        remark: text(Field::Remark),
        ..Student::default()
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: i64 },
}

/// State behind the create/edit form.
#[derive(Debug, Clone)]
pub struct StudentForm {
    pub mode: FormMode,
    pub values: StudentFormValues,
    pub errors: FieldErrors,
    pub error: Option<&'static str>,
}

impl StudentForm {
    pub fn create() -> Self {
        Self::new(FormMode::Create, StudentFormValues::default())
    }

    /// Seeds the form from the record being edited.
    pub fn edit(id: i64, student: &Student) -> Self {
        Self::new(FormMode::Edit { id }, StudentFormValues::from_student(student))
    }

    pub const fn new(mode: FormMode, values: StudentFormValues) -> Self {
        Self {
            mode,
            values,
            errors: BTreeMap::new(),
            error: None,
        }
    }

    pub const fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit { .. })
    }

    pub fn error_for(&self, field: Field) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    /// Validates and saves. Returns the saved record, or `None` with the form left populated
    /// and `errors`/`error` describing what went wrong.
    pub async fn submit(&mut self, api: &StudentApi) -> Option<Student> {
        self.error = None;

        let student = match validate(&self.values) {
            Ok(student) => {
                self.errors.clear();
                student
            }
            Err(errors) => {
                debug!(?errors, "student form failed validation");
                self.errors = errors;
                return None;
            }
        };

        let saved = match self.mode {
            FormMode::Create => api.create(&student).await,
            FormMode::Edit { id } => {
                api.update(
                    id,
                    &Student {
                        id: Some(id),
                        ..student
                    },
                )
                .await
            }
        };

        match saved {
            Ok(saved) => {
                info!(id = ?saved.id, mode = ?self.mode, "saved student");
                Some(saved)
            }
            Err(e) => {
                warn!(?e, "unable to save student");
                self.error = Some(SAVE_FAILED);
                None
            }
        }
    }
}
