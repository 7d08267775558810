use crate::core::error::SessionError;
use crate::models::credentials::{LoginRequest, RegisterRequest};
use crate::utils::auth::{bearer_header, mask_token};
use anyhow::{Context, Result};
use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// HTTP client for the remote authentication API
pub struct AuthApiClient {
    client: reqwest::Client,
    base_url: String,
}

/// Success body of `/login` and `/register`
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SessionResponse {
    pub session_id: String,
    pub username: String,
    pub role: String,
}

/// Success body of `/verify`; unknown fields are ignored
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyResponse {
    #[serde(default)]
    pub session_id: Option<String>,
    pub username: String,
    pub role: String,
}

/// Failure body; FastAPI-style servers may put a list in `detail`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

impl AuthApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    pub async fn login(&self, request: &LoginRequest<'_>) -> Result<SessionResponse, SessionError> {
        self.post_json("login", request, "LOGIN FAILED").await
    }

    pub async fn register(
        &self,
        request: &RegisterRequest<'_>,
    ) -> Result<SessionResponse, SessionError> {
        self.post_json("register", request, "REGISTRATION FAILED").await
    }

    pub async fn verify(&self, session_id: &str) -> Result<VerifyResponse, SessionError> {
        let url = self.endpoint("verify");
        debug!(url = %url, session = %mask_token(session_id), "Verifying session");

        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, bearer_header(session_id))
            .send()
            .await
            .map_err(|e| SessionError::Network(e.to_string()))?;

        read_json(response, "SESSION EXPIRED").await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B, fallback: &str) -> Result<T, SessionError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path);
        debug!(url = %url, "Sending auth request");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| SessionError::Network(e.to_string()))?;

        read_json(response, fallback).await
    }
}

/// Turn a response into `T`, or into an `Auth` error for non-2xx statuses
async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
    fallback: &str,
) -> Result<T, SessionError> {
    let status = response.status();
    let bytes = response
        .bytes()
        .await
        .map_err(|e| SessionError::Network(e.to_string()))?;

    if !status.is_success() {
        debug!(status = status.as_u16(), "Auth request rejected");
        return Err(SessionError::Auth(error_detail(&bytes, fallback)));
    }

    serde_json::from_slice(&bytes).map_err(|e| SessionError::MalformedResponse(e.to_string()))
}

fn error_detail(body: &[u8], fallback: &str) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.detail)
        .and_then(|detail| match detail {
            serde_json::Value::String(message) if !message.trim().is_empty() => Some(message),
            _ => None,
        })
        .unwrap_or_else(|| fallback.to_string())
}
