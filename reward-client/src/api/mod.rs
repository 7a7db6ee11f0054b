//! Typed endpoints of the reward service
//!
//! [`AdminApi`] is a thin layer over [`HttpClient`]: it knows the paths,
//! the payloads and the `{ success, message, data }` envelope, and nothing
//! about caches or toasts.

mod content;
mod media;
mod rewards;

use reqwest::StatusCode;
use shared::ApiResponse;

use crate::error::{ClientError, ClientResult};
use crate::http::{HttpClient, NetworkHttpClient};

/// Typed API client
#[derive(Debug, Clone)]
pub struct AdminApi<H: HttpClient = NetworkHttpClient> {
    http: H,
}

impl<H: HttpClient> AdminApi<H> {
    pub fn new(http: H) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &H {
        &self.http
    }
}

/// Unwrap an envelope, turning `success: false` into [`ClientError::Api`]
///
/// Returns the optional server message on success.
pub(crate) fn expect_success<T>(resp: ApiResponse<T>) -> ClientResult<(Option<T>, Option<String>)> {
    if resp.success {
        Ok((resp.data, resp.message))
    } else {
        Err(ClientError::Api {
            status: StatusCode::OK,
            message: resp.message,
        })
    }
}

/// Like [`expect_success`] but the payload is required
pub(crate) fn expect_data<T>(resp: ApiResponse<T>, what: &str) -> ClientResult<T> {
    let (data, _) = expect_success(resp)?;
    data.ok_or_else(|| ClientError::InvalidResponse(format!("Missing {what} data")))
}

/// Message returned by a mutation, if the server sent one
pub type ServerMessage = Option<String>;
