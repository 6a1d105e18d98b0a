//! XRPC HTTP client implementation.

use std::time::Duration;

use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, trace};

use scrollfeed_core::error::{Error, TransportError};
use scrollfeed_core::types::FeedUrl;

use crate::endpoints::XrpcErrorResponse;

/// Map a reqwest failure into a transport error.
pub(crate) fn transport(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        TransportError::Timeout.into()
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
        .into()
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
        .into()
    }
}

/// HTTP client for XRPC requests.
#[derive(Debug, Clone)]
pub(crate) struct XrpcClient {
    client: reqwest::Client,
    base: FeedUrl,
}

impl XrpcClient {
    /// Create a new XRPC client for the given server.
    ///
    /// The protocol has no timeout of its own; `timeout` is the caller's
    /// policy for every request made through this client.
    pub(crate) fn new(base: FeedUrl, timeout: Option<Duration>) -> Result<Self, Error> {
        let mut builder =
            reqwest::Client::builder().user_agent(concat!("scrollfeed/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(transport)?;

        Ok(Self { client, base })
    }

    /// Returns the server URL this client is configured for.
    pub(crate) fn base(&self) -> &FeedUrl {
        &self.base
    }

    /// Make an XRPC query (GET request).
    #[instrument(skip(self), fields(base = %self.base))]
    pub(crate) async fn query<Q, R>(&self, method: &str, params: &Q) -> Result<R, Error>
    where
        Q: Serialize + std::fmt::Debug,
        R: DeserializeOwned,
    {
        let url = self.base.xrpc_url(method);
        debug!(method, "XRPC query");
        trace!(?params, "query parameters");

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(transport)?;

        self.handle_response(response).await
    }

    /// Make an XRPC procedure (POST request).
    #[instrument(skip(self, body), fields(base = %self.base))]
    pub(crate) async fn procedure<B, R>(&self, method: &str, body: &B) -> Result<R, Error>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let url = self.base.xrpc_url(method);
        debug!(method, "XRPC procedure");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(transport)?;

        self.handle_response(response).await
    }

    /// Handle an XRPC response, parsing the body or error.
    async fn handle_response<R: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<R, Error> {
        let status = response.status();
        trace!(status = %status, "XRPC response");

        if status.is_success() {
            response.json::<R>().await.map_err(transport)
        } else {
            Err(self.parse_error_response(response).await)
        }
    }

    /// Parse an XRPC error response back into the error it was raised as.
    async fn parse_error_response(&self, response: reqwest::Response) -> Error {
        let status = response.status().as_u16();

        match response.json::<XrpcErrorResponse>().await {
            Ok(body) => Error::from_wire(status, body.error.as_deref(), body.message),
            Err(_) => Error::from_wire(status, None, None),
        }
    }
}
