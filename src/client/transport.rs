//! Request dispatch and response decoding
//!
//! Each call is exactly one attempt. The dispatcher never looks at the status
//! code; the calling operation decides which statuses mean success.

use super::Client;
use crate::error::{BoxError, CancelReason};
use crate::types::{ApiResponse, HttpResponse, RawResponse};
use crate::{PayPayError, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::io::Write;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Executes HTTP requests on behalf of a [`Client`]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send a request and return the response head with an unread body
    ///
    /// Any failure to obtain a response is reported as the underlying cause;
    /// the client wraps it in [`PayPayError::Transport`] unless the request
    /// context is already done.
    async fn send(&self, request: reqwest::Request) -> std::result::Result<reqwest::Response, BoxError>;
}

#[async_trait]
impl HttpTransport for reqwest::Client {
    async fn send(&self, request: reqwest::Request) -> std::result::Result<reqwest::Response, BoxError> {
        self.execute(request).await.map_err(Into::into)
    }
}

/// Cancellation token and optional deadline bounding one request
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl RequestContext {
    /// A context that is never cancelled and has no deadline
    pub fn new() -> Self {
        Self::default()
    }

    /// A context driven by an existing cancellation token
    pub fn with_token(token: CancellationToken) -> Self {
        Self {
            token,
            deadline: None,
        }
    }

    /// Give up at `deadline`
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Give up after `timeout` from now
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Cancel every request bound to this context
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// The underlying cancellation token
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Why the context is done, or `None` while it is still live
    pub fn err(&self) -> Option<CancelReason> {
        if self.token.is_cancelled() {
            return Some(CancelReason::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(CancelReason::DeadlineExceeded),
            _ => None,
        }
    }

    /// Resolve once the context is cancelled or its deadline passes
    pub async fn done(&self) -> CancelReason {
        match self.deadline {
            Some(deadline) => tokio::select! {
                _ = self.token.cancelled() => CancelReason::Cancelled,
                _ = tokio::time::sleep_until(deadline) => CancelReason::DeadlineExceeded,
            },
            None => {
                self.token.cancelled().await;
                CancelReason::Cancelled
            }
        }
    }

    fn classify(&self, err: impl Into<BoxError>) -> PayPayError {
        match self.err() {
            Some(reason) => PayPayError::Cancelled(reason),
            None => PayPayError::transport(err),
        }
    }
}

impl Client {
    async fn dispatch(&self, ctx: &RequestContext, request: reqwest::Request) -> Result<reqwest::Response> {
        if let Some(reason) = ctx.err() {
            return Err(PayPayError::Cancelled(reason));
        }

        tracing::debug!(method = %request.method(), url = %request.url(), "dispatching request");

        let result = tokio::select! {
            biased;
            reason = ctx.done() => return Err(PayPayError::Cancelled(reason)),
            result = self.transport.send(request) => result,
        };

        let response = result.map_err(|e| ctx.classify(e))?;
        tracing::debug!(status = %response.status(), "received response");
        Ok(response)
    }

    /// Dispatch `request` and decode the JSON body into `T`
    ///
    /// A body that fails to decode yields [`PayPayError::Decode`], which still
    /// carries the response status and headers.
    pub async fn execute<T>(&self, ctx: &RequestContext, request: reqwest::Request) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
    {
        let response = self.dispatch(ctx, request).await?;
        let meta = HttpResponse::from_reqwest(&response);

        let body = tokio::select! {
            biased;
            reason = ctx.done() => return Err(PayPayError::Cancelled(reason)),
            body = response.bytes() => body.map_err(|e| ctx.classify(e))?,
        };

        match serde_json::from_slice(&body) {
            Ok(data) => Ok(ApiResponse {
                data,
                response: meta,
            }),
            Err(source) => Err(PayPayError::Decode {
                source,
                response: meta,
            }),
        }
    }

    /// Dispatch `request` and copy the body verbatim into `sink`
    ///
    /// A sink write failure stops the copy and is reported in
    /// [`RawResponse::copy_error`]; the exchange itself still succeeds.
    pub async fn execute_raw<W>(
        &self,
        ctx: &RequestContext,
        request: reqwest::Request,
        sink: &mut W,
    ) -> Result<RawResponse>
    where
        W: Write + ?Sized,
    {
        let mut response = self.dispatch(ctx, request).await?;
        let meta = HttpResponse::from_reqwest(&response);

        let mut bytes_written = 0u64;
        let mut copy_error = None;
        loop {
            let chunk = tokio::select! {
                biased;
                reason = ctx.done() => return Err(PayPayError::Cancelled(reason)),
                chunk = response.chunk() => chunk.map_err(|e| ctx.classify(e))?,
            };
            let Some(chunk) = chunk else { break };

            if let Err(err) = sink.write_all(&chunk) {
                copy_error = Some(err);
                break;
            }
            bytes_written += chunk.len() as u64;
        }

        if copy_error.is_none() {
            copy_error = sink.flush().err();
        }

        Ok(RawResponse {
            response: meta,
            bytes_written,
            copy_error,
        })
    }
}
