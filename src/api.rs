//! Typed client for the `/api/students` REST backend.
//!
//! Every call unwraps the `{success, message, data}` envelope. Transport errors, non-2xx
//! statuses and `success: false` envelopes all come back as [`RosterError`]s; nothing is
//! retried or cached.

use crate::{
    config::BackendConfig,
    data::{
        ApiEnvelope,
        page::{PageParams, PaginatedResponse},
        student::Student,
    },
    error::{
        BuildClientSnafu, DecodeBodySnafu, MissingPayloadSnafu, RejectedSnafu, RosterError,
        RosterResult, TransportSnafu,
    },
};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use snafu::{OptionExt, ResultExt, ensure};
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct StudentApi {
    client: Client,
    base_url: String,
}

impl StudentApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> RosterResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context(BuildClientSnafu)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &BackendConfig) -> RosterResult<Self> {
        Self::new(config.api_url(), config.request_timeout())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub async fn list_all(&self) -> RosterResult<Vec<Student>> {
        let url = self.url("");
        self.fetch_data(self.client.get(&url), url).await
    }

    pub async fn list_paged(&self, params: &PageParams) -> RosterResult<PaginatedResponse<Student>> {
        let url = self.url("/page");
        self.fetch_data(self.client.get(&url).query(params), url)
            .await
    }

    pub async fn get_by_id(&self, id: i64) -> RosterResult<Student> {
        let url = self.url(&format!("/{id}"));
        self.fetch_data(self.client.get(&url), url).await
    }

    pub async fn create(&self, student: &Student) -> RosterResult<Student> {
        let url = self.url("");
        self.fetch_data(self.client.post(&url).json(student), url)
            .await
    }

    pub async fn update(&self, id: i64, student: &Student) -> RosterResult<Student> {
        let url = self.url(&format!("/{id}"));
        self.fetch_data(self.client.put(&url).json(student), url)
            .await
    }

    /// Deletes a student, returning the envelope's `success` flag rather than failing on a
    /// `success: false` reply.
    pub async fn delete(&self, id: i64) -> RosterResult<bool> {
        let url = self.url(&format!("/{id}"));
        let envelope: ApiEnvelope<serde_json::Value> =
            self.fetch_envelope(self.client.delete(&url), &url).await?;
        if !envelope.success {
            warn!(?url, message = ?envelope.message, "backend declined delete");
        }
        Ok(envelope.success)
    }

    /// Free-text search over name, phone and email.
    pub async fn search(&self, term: &str) -> RosterResult<Vec<Student>> {
        let url = self.url("/search");
        self.fetch_data(self.client.get(&url).query(&[("term", term)]), url)
            .await
    }

    pub async fn search_paged(
        &self,
        term: &str,
        params: &PageParams,
    ) -> RosterResult<PaginatedResponse<Student>> {
        let url = self.url("/search/page");
        self.fetch_data(
            self.client.get(&url).query(&[("term", term)]).query(params),
            url,
        )
        .await
    }

    pub async fn find_by_name(&self, name: &str) -> RosterResult<Vec<Student>> {
        let url = self.url("/by-name");
        self.fetch_data(self.client.get(&url).query(&[("name", name)]), url)
            .await
    }

    pub async fn find_by_name_paged(
        &self,
        name: &str,
        params: &PageParams,
    ) -> RosterResult<PaginatedResponse<Student>> {
        let url = self.url("/by-name/page");
        self.fetch_data(
            self.client.get(&url).query(&[("name", name)]).query(params),
            url,
        )
        .await
    }

    pub async fn find_by_phone(&self, phone: &str) -> RosterResult<Vec<Student>> {
        let url = self.url("/by-phone");
        self.fetch_data(self.client.get(&url).query(&[("phone", phone)]), url)
            .await
    }

    pub async fn find_by_phone_paged(
        &self,
        phone: &str,
        params: &PageParams,
    ) -> RosterResult<PaginatedResponse<Student>> {
        let url = self.url("/by-phone/page");
        self.fetch_data(
            self.client.get(&url).query(&[("phone", phone)]).query(params),
            url,
        )
        .await
    }

    async fn fetch_data<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: String,
    ) -> RosterResult<T> {
        let envelope: ApiEnvelope<T> = self.fetch_envelope(request, &url).await?;
        ensure!(
            envelope.success,
            RejectedSnafu {
                url: url.clone(),
                message: envelope.message,
            }
        );
        envelope.data.context(MissingPayloadSnafu { url })
    }

    #[allow(clippy::unused_self)]
    async fn fetch_envelope<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &str,
    ) -> RosterResult<ApiEnvelope<T>> {
        debug!(?url, "calling student backend");

        let response = request
            .send()
            .await
            .context(TransportSnafu { url })
            .inspect_err(|e| warn!(?e, "student backend unreachable"))?;

        let status = response.status();
        if !status.is_success() {
            // error bodies are usually envelopes too, but the status is what matters
            let message = response
                .json::<ApiEnvelope<serde_json::Value>>()
                .await
                .map(|envelope| envelope.message)
                .unwrap_or_default();
            warn!(?url, %status, ?message, "student backend returned an error status");
            return Err(RosterError::UnexpectedStatus {
                status,
                url: url.to_string(),
                message,
            });
        }

        response.json().await.context(DecodeBodySnafu { url })
    }
}
