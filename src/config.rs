use crate::error::{BadEnvVarSnafu, ParseConfigValueSnafu, RosterResult, ZeroPageSizeSnafu};
use dotenvy::var;
use snafu::{ResultExt, ensure};
use std::{sync::Arc, time::Duration};

const DEFAULT_API_URL: &str = "http://127.0.0.1:8080/api/students";
const DEFAULT_SERVER_IP: &str = "127.0.0.1:3000";
const DEFAULT_PAGE_SIZE: u32 = 10;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug)]
pub struct RuntimeConfiguration {
    backend_config: Arc<BackendConfig>,
    server_ip: String,
    page_size: u32,
}

impl RuntimeConfiguration {
    pub fn new() -> RosterResult<Self> {
        Self::from_lookup(|name| match var(name) {
            Ok(value) => Ok(Some(value)),
            Err(dotenvy::Error::EnvVar(std::env::VarError::NotPresent)) => Ok(None),
            Err(source) => Err(source).context(BadEnvVarSnafu { name }),
        })
    }

    /// Builds the configuration from any variable source, falling back to the defaults for
    /// anything that isn't set.
    pub fn from_lookup(
        lookup: impl Fn(&'static str) -> RosterResult<Option<String>>,
    ) -> RosterResult<Self> {
        let server_ip = lookup("ROSTER_SERVER_IP")?.unwrap_or_else(|| DEFAULT_SERVER_IP.to_string());

        let page_size = match lookup("ROSTER_PAGE_SIZE")? {
            Some(original) => original.trim().parse().context(ParseConfigValueSnafu {
                name: "ROSTER_PAGE_SIZE",
                original,
            })?,
            None => DEFAULT_PAGE_SIZE,
        };
        ensure!(page_size > 0, ZeroPageSizeSnafu);

        Ok(Self {
            backend_config: Arc::new(BackendConfig::new(&lookup)?),
            server_ip,
            page_size,
        })
    }

    pub fn backend_config(&self) -> Arc<BackendConfig> {
        self.backend_config.clone()
    }

    pub fn server_ip(&self) -> &str {
        &self.server_ip
    }

    pub const fn page_size(&self) -> u32 {
        self.page_size
    }
}

#[derive(Debug)]
pub struct BackendConfig {
    api_url: String,
    request_timeout: Duration,
}

impl BackendConfig {
    fn new(lookup: &impl Fn(&'static str) -> RosterResult<Option<String>>) -> RosterResult<Self> {
        let api_url = lookup("ROSTER_API_URL")?
            .map_or_else(|| DEFAULT_API_URL.to_string(), |url| url.trim_end_matches('/').to_string());

        let request_timeout = match lookup("ROSTER_REQUEST_TIMEOUT_SECS")? {
            Some(original) => Duration::from_secs(original.trim().parse().context(
                ParseConfigValueSnafu {
                    name: "ROSTER_REQUEST_TIMEOUT_SECS",
                    original,
                },
            )?),
            None => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        Ok(Self {
            api_url,
            request_timeout,
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub const fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}
