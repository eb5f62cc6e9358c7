use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use tracing::trace;

use crate::infra::http::envelope::decode_envelope;
use crate::usecase::ports::source::{SourceEnvelope, TransportError, UserSource};

/// `UserSource` over a DummyJSON-style `/users` REST API.
pub struct HttpUserSource {
    base_url: String,
    client: Client,
}

impl HttpUserSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build http client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn get(
        &self,
        path: &str,
        params: &[(&str, String)],
        limit: usize,
        offset: usize,
    ) -> Result<SourceEnvelope, TransportError> {
        let url = format!("{}{}", self.base_url, path);
        let mut query: Vec<(&str, String)> = params.to_vec();
        query.push(("limit", limit.to_string()));
        query.push(("skip", offset.to_string()));

        let request = self
            .client
            .get(&url)
            .query(&query)
            .build()
            .map_err(|err| TransportError::Network {
                url: url.clone(),
                message: err.to_string(),
            })?;
        let full_url = request.url().to_string();
        trace!(url = %full_url, "GET");

        let response = self
            .client
            .execute(request)
            .map_err(|err| TransportError::Network {
                url: full_url.clone(),
                message: err.to_string(),
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                url: full_url,
            });
        }
        let body = response.text().map_err(|err| TransportError::Network {
            url: full_url,
            message: err.to_string(),
        })?;
        Ok(decode_envelope(&body, offset, limit))
    }
}

impl UserSource for HttpUserSource {
    fn list(&self, limit: usize, offset: usize) -> Result<SourceEnvelope, TransportError> {
        self.get("/users", &[], limit, offset)
    }

    fn search(
        &self,
        query: &str,
        limit: usize,
        offset: usize,
    ) -> Result<SourceEnvelope, TransportError> {
        self.get("/users/search", &[("q", query.to_string())], limit, offset)
    }

    fn filter_by_field(
        &self,
        field: &str,
        value: &str,
        limit: usize,
        offset: usize,
    ) -> Result<SourceEnvelope, TransportError> {
        self.get(
            "/users/filter",
            &[("key", field.to_string()), ("value", value.to_string())],
            limit,
            offset,
        )
    }
}
