//! # Upstream HTTP Access
//!
//! Every upstream API this crate talks to is a `GET` with query parameters
//! returning JSON. [`HttpClient`] captures exactly that, so the retrieval code
//! can be driven by [`ReqwestClient`] in production and by canned responses
//! in tests.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors from a single upstream request.
///
/// `Request` and `Status` are transport failures; `Decode` means the server
/// answered but the payload did not have the expected shape.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Network, TLS, timeout or body read failure
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-success status
    #[error("{url} responded with status {status}")]
    Status { url: String, status: u16 },

    /// Body was JSON but not the expected structure
    #[error("unexpected {what} response: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Query parameters in the order they are sent.
pub type Query = Vec<(&'static str, String)>;

#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Issue a `GET` and return the parsed JSON body of a 2xx response.
    async fn get_json(&self, url: &str, query: &[(&'static str, String)])
        -> Result<Value, FetchError>;
}

/// Fetch and decode a response into `T`. `what` names the payload in errors.
pub async fn get_typed<C, T>(
    client: &C,
    what: &'static str,
    url: &str,
    query: &[(&'static str, String)],
) -> Result<T, FetchError>
where
    C: HttpClient + ?Sized,
    T: DeserializeOwned,
{
    let body = client.get_json(url, query).await?;
    serde_json::from_value(body).map_err(|source| FetchError::Decode { what, source })
}

/// [`HttpClient`] backed by a shared `reqwest` connection pool.
#[derive(Clone, Debug)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// Build a client. With `timeout = None` requests may wait indefinitely.
    pub fn new(timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(ReqwestClient {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get_json(
        &self,
        url: &str,
        query: &[(&'static str, String)],
    ) -> Result<Value, FetchError> {
        let request_error = |source| FetchError::Request {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url)
            .query(query)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.json::<Value>().await.map_err(request_error)
    }
}
