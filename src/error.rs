use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use maud::html;
use snafu::Snafu;

pub type RosterResult<T> = Result<T, RosterError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum RosterError {
    #[snafu(display("Unable to retrieve env var `{}`", name))]
    BadEnvVar {
        source: dotenvy::Error,
        name: &'static str,
    },
    #[snafu(display("Unable to parse env var `{}` from {:?}", name, original))]
    ParseConfigValue {
        source: std::num::ParseIntError,
        name: &'static str,
        original: String,
    },
    #[snafu(display("Page size must be greater than zero"))]
    ZeroPageSize,
    #[snafu(display("Error building HTTP client"))]
    BuildClient { source: reqwest::Error },
    #[snafu(display("Error talking to the student backend at {}", url))]
    Transport { source: reqwest::Error, url: String },
    #[snafu(display("Error decoding the student backend response from {}", url))]
    DecodeBody { source: reqwest::Error, url: String },
    #[snafu(display("Student backend returned {} for {}: {}", status, url, message))]
    UnexpectedStatus {
        status: StatusCode,
        url: String,
        message: String,
    },
    #[snafu(display("Student backend rejected the request to {}: {}", url, message))]
    Rejected { url: String, message: String },
    #[snafu(display("Student backend response from {} had no data", url))]
    MissingPayload { url: String },
    #[snafu(display("Unable to parse student id {:?}", original))]
    ParseStudentId {
        source: std::num::ParseIntError,
        original: String,
    },
}

impl RosterError {
    /// Whether the backend told us the record does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UnexpectedStatus { status, .. } if *status == StatusCode::NOT_FOUND)
    }
}

impl IntoResponse for RosterError {
    #[allow(clippy::match_same_arms)]
    fn into_response(self) -> Response {
        const ISE: StatusCode = StatusCode::INTERNAL_SERVER_ERROR; //internal server error
        const NF: StatusCode = StatusCode::NOT_FOUND; //not found
        const BG: StatusCode = StatusCode::BAD_GATEWAY; //backend broke
        const BI: StatusCode = StatusCode::BAD_REQUEST; //bad input

        let basic_error = |desc| {
            html! {
                div class="bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded relative mb-4" role="alert" {
                    strong class="font-bold" {"Roster Error "}
                    span {(desc)}
                }
            }
        };

        let status_code = match &self {
            Self::BadEnvVar { .. } | Self::ParseConfigValue { .. } | Self::ZeroPageSize => ISE,
            Self::BuildClient { .. } => ISE,
            Self::Transport { .. } | Self::DecodeBody { .. } => BG,
            Self::UnexpectedStatus { status, .. } => {
                if *status == NF {
                    NF
                } else {
                    BG
                }
            }
            Self::Rejected { .. } | Self::MissingPayload { .. } => BG,
            Self::ParseStudentId { .. } => BI,
        };

        error!(?self, "Error!");
        (status_code, Html(basic_error(self.to_string()).into_string())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_status_maps_through() {
        let err = RosterError::UnexpectedStatus {
            status: StatusCode::NOT_FOUND,
            url: "http://backend/api/students/4".into(),
            message: "Student not found with ID: 4".into(),
        };
        assert!(err.is_not_found());
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn rejected_envelope_is_a_bad_gateway() {
        let err = RosterError::Rejected {
            url: "http://backend/api/students".into(),
            message: "nope".into(),
        };
        assert!(!err.is_not_found());
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }
}
