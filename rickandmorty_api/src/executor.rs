//! Generic request execution: transport call, status validation and decoding.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::request::{HttpMethod, RequestDescriptor};
use crate::response::{ExecutionResult, ResponseMeta};
use crate::transport::{ReqwestTransport, Transport, TransportRequest, TransportResponse};
use crate::Error;

/// Per-request timeout applied unless overridden with [`NetworkExecutor::with_timeout`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Turns [`RequestDescriptor`]s into decoded values or classified errors.
///
/// The executor holds no per-call state. Cloning it shares the transport.
#[derive(Clone)]
pub struct NetworkExecutor {
    transport: Arc<dyn Transport>,
    timeout: Duration,
}

impl NetworkExecutor {
    /// Creates an executor backed by the live `reqwest` transport.
    pub fn new() -> Result<Self, Error> {
        let transport = ReqwestTransport::new()?;
        Ok(Self::with_transport(Arc::new(transport)))
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Executes one request. Never panics and never returns a raw transport
    /// or parser error: every failure is an [`Error`] in the result.
    pub async fn execute<T>(&self, descriptor: &RequestDescriptor<T>) -> ExecutionResult<T>
    where
        T: DeserializeOwned,
    {
        let request = build_request(descriptor, self.timeout);
        let response = match self.transport.send(&request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Failed to get resource {}: {}", request.url, e);
                return ExecutionResult::failure(Error::Transport(e), Some(request), None);
            }
        };

        let meta = ResponseMeta {
            status: response.status,
            headers: response.headers.clone(),
        };
        match decode_response::<T>(&response) {
            Ok(value) => ExecutionResult::success(value, Some(request), Some(meta)),
            Err(e) => {
                tracing::error!("{} {} failed: {}", request.method, request.url, e);
                ExecutionResult::failure(e, Some(request), Some(meta))
            }
        }
    }

    pub async fn get<T>(&self, url: &str) -> ExecutionResult<T>
    where
        T: DeserializeOwned,
    {
        match RequestDescriptor::get(url) {
            Ok(descriptor) => self.execute(&descriptor).await,
            Err(e) => ExecutionResult::failure(e, None, None),
        }
    }

    pub async fn delete<T>(&self, url: &str) -> ExecutionResult<T>
    where
        T: DeserializeOwned,
    {
        match RequestDescriptor::new(HttpMethod::Delete, url) {
            Ok(descriptor) => self.execute(&descriptor).await,
            Err(e) => ExecutionResult::failure(e, None, None),
        }
    }

    pub async fn post_json<T, B>(&self, url: &str, body: &B) -> ExecutionResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_json(HttpMethod::Post, url, body).await
    }

    pub async fn put_json<T, B>(&self, url: &str, body: &B) -> ExecutionResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_json(HttpMethod::Put, url, body).await
    }

    pub async fn patch_json<T, B>(&self, url: &str, body: &B) -> ExecutionResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_json(HttpMethod::Patch, url, body).await
    }

    async fn send_json<T, B>(&self, method: HttpMethod, url: &str, body: &B) -> ExecutionResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let descriptor =
            RequestDescriptor::new(method, url).and_then(|d| d.with_json_body(body));
        match descriptor {
            Ok(descriptor) => self.execute(&descriptor).await,
            Err(e) => ExecutionResult::failure(e, None, None),
        }
    }
}

pub(crate) fn build_request<T>(descriptor: &RequestDescriptor<T>, timeout: Duration) -> TransportRequest {
    let mut headers: Vec<(String, String)> = descriptor
        .headers()
        .iter()
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    if descriptor.method().sends_json()
        && descriptor.body().is_some()
        && !descriptor.has_header("content-type")
    {
        headers.push(("Content-Type".to_string(), "application/json".to_string()));
    }
    TransportRequest {
        url: descriptor.url().clone(),
        method: descriptor.method(),
        headers,
        body: descriptor.body().map(<[u8]>::to_vec),
        timeout,
    }
}

fn decode_response<T: DeserializeOwned>(response: &TransportResponse) -> Result<T, Error> {
    let status = response.status;
    if !(100..=599).contains(&status) {
        return Err(Error::InvalidResponse { status });
    }

    if !(200..=299).contains(&status) {
        let body = (!response.body.is_empty())
            .then(|| String::from_utf8_lossy(&response.body).into_owned());
        if let Some(body) = &body {
            tracing::error!("Request failed with status {}: {}", status, truncate_body(body));
        }
        return Err(Error::Http { status, body });
    }

    if response.body.is_empty() {
        // 204 satisfies targets that accept null (`()`, `Option<_>`); anything
        // else still needed a body.
        if status == 204 {
            return serde_json::from_slice(b"null").map_err(|_| Error::NoData);
        }
        return Err(Error::NoData);
    }

    serde_json::from_slice::<T>(&response.body).map_err(|e| {
        let body = String::from_utf8_lossy(&response.body);
        tracing::error!("Failed to parse resource: {} | body: {}", e, truncate_body(&body));
        Error::Decoding(e)
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
