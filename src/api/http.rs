//! HTTP client for the activities API
//!
//! On wasm32 reqwest is backed by the browser's `fetch`, so cookies and
//! origin rules are the page's.

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;

use super::{list_path, signup_path, unregister_path, ActivityApi, MutationOutcome};
use crate::config::BoardConfig;
use crate::error::ApiError;
use crate::models::{ActivityBoard, MutationReply};

#[derive(Clone)]
pub struct HttpActivityApi {
    client: Client,
    base: String,
}

impl HttpActivityApi {
    pub fn new(config: &BoardConfig) -> Self {
        Self {
            client: Client::new(),
            base: config.api_base.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Send a request and return the status plus the raw body.
    async fn send(&self, method: Method, url: &str) -> Result<(u16, String), ApiError> {
        log::debug!(target: "Api", "{} {}", method, url);

        let transport = |source| ApiError::Transport { url: url.to_string(), source };
        let response = self.client.request(method, url).send().await.map_err(transport)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport)?;

        log::debug!(target: "Api", "{} -> {}", url, status);
        Ok((status, body))
    }

    async fn mutate(&self, method: Method, path: &str) -> Result<MutationOutcome, ApiError> {
        let url = self.url(path);
        let (status, body) = self.send(method, &url).await?;
        let reply: MutationReply = decode(&url, &body)?;
        Ok(MutationOutcome::from_status(status, reply))
    }
}

fn decode<T: DeserializeOwned>(url: &str, body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|source| ApiError::Decode { url: url.to_string(), source })
}

#[async_trait(?Send)]
impl ActivityApi for HttpActivityApi {
    async fn list_activities(&self) -> Result<ActivityBoard, ApiError> {
        let url = self.url(list_path());
        let (status, body) = self.send(Method::GET, &url).await?;
        if !(200..300).contains(&status) {
            return Err(ApiError::Status { url, status });
        }
        decode(&url, &body)
    }

    async fn sign_up(&self, activity: &str, email: &str) -> Result<MutationOutcome, ApiError> {
        self.mutate(Method::POST, &signup_path(activity, email)).await
    }

    async fn unregister(&self, activity: &str, email: &str) -> Result<MutationOutcome, ApiError> {
        self.mutate(Method::DELETE, &unregister_path(activity, email)).await
    }
}
