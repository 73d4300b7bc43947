//! HTTP implementation of [`TaskBackend`]

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::envelope::{self, Envelope};
use super::error::{ApiError, ApiResult};
use super::TaskBackend;
use crate::config::Config;
use crate::models::{Task, TaskId};

/// Talks to the task service over HTTP
///
/// No request deadline is set: every call runs until the server answers or
/// the connection fails.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base: Url,
}

impl HttpBackend {
    /// Create a backend for the given base endpoint
    pub fn new(api_url: &str) -> ApiResult<Self> {
        let base = Url::parse(api_url).map_err(|e| ApiError::InvalidUrl {
            url: api_url.to_string(),
            details: e.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl {
                url: api_url.to_string(),
                details: "URL cannot be used as a base".to_string(),
            });
        }

        let client = Client::builder()
            .user_agent(concat!("snipe/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, base })
    }

    /// Create a backend for the endpoint in `config`
    pub fn from_config(config: &Config) -> ApiResult<Self> {
        Self::new(&config.api_url)
    }

    /// `<base>/<id>/toggle`
    fn toggle_url(&self, id: TaskId) -> ApiResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl {
                url: self.base.to_string(),
                details: "URL cannot be used as a base".to_string(),
            })?
            .pop_if_empty()
            .push(&id.to_string())
            .push("toggle");
        Ok(url)
    }
}

#[async_trait]
impl TaskBackend for HttpBackend {
    async fn list_tasks(&self) -> ApiResult<Vec<Task>> {
        debug!("GET {}", self.base);
        let response = self.client.get(self.base.clone()).send().await?;
        read_envelope::<Vec<Task>>(response).await?.into_data()
    }

    async fn toggle_task(&self, id: TaskId) -> ApiResult<Option<Task>> {
        let url = self.toggle_url(id)?;
        debug!("PATCH {}", url);
        let response = self.client.patch(url).send().await?;
        let envelope = read_envelope::<serde_json::Value>(response).await?;

        // The body is informational only; an unexpected shape is not a failure
        Ok(envelope
            .data
            .and_then(|value| match serde_json::from_value::<Task>(value) {
                Ok(task) => Some(task),
                Err(e) => {
                    warn!("Ignoring unexpected toggle response body: {}", e);
                    None
                }
            }))
    }

    async fn search_and_add(&self, course_name: &str) -> ApiResult<Vec<Task>> {
        debug!("POST {}?courseName={}", self.base, course_name);
        let response = self
            .client
            .post(self.base.clone())
            .query(&[("courseName", course_name)])
            .send()
            .await?;
        read_envelope::<Vec<Task>>(response).await?.into_data()
    }

    async fn delete_course(&self, course_display_name: &str) -> ApiResult<()> {
        debug!("DELETE {}?courseDisplayName={}", self.base, course_display_name);
        let response = self
            .client
            .delete(self.base.clone())
            .query(&[("courseDisplayName", course_display_name)])
            .send()
            .await?;
        read_envelope::<serde_json::Value>(response).await?;
        Ok(())
    }
}

/// Read a response into an envelope, mapping HTTP failures to [`ApiError::Status`]
async fn read_envelope<T: DeserializeOwned>(response: Response) -> ApiResult<Envelope<T>> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(ApiError::Status {
            status,
            message: envelope::error_message(&body),
        });
    }

    if body.trim().is_empty() {
        return Ok(Envelope::empty());
    }

    Ok(serde_json::from_str(&body)?)
}
