use serde::Deserialize;

pub mod page;
pub mod student;

/// The wrapper every backend response comes in.
#[derive(Deserialize, Debug)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}
