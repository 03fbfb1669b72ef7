//! Outcome of one executed request.

use crate::transport::TransportRequest;
use crate::Error;

/// Status line and headers of the response that was received, if any.
#[derive(Debug, Clone)]
pub struct ResponseMeta {
    pub status: u16,
    pub headers: Vec<(String, String)>,
}

/// Decoded value or classified error, plus the request that produced it.
///
/// `request` is `None` only when no request could be built at all
/// (an invalid URL). `response` is `None` when nothing came back.
#[derive(Debug)]
pub struct ExecutionResult<T> {
    pub result: Result<T, Error>,
    pub request: Option<TransportRequest>,
    pub response: Option<ResponseMeta>,
}

impl<T> ExecutionResult<T> {
    pub fn success(
        value: T,
        request: Option<TransportRequest>,
        response: Option<ResponseMeta>,
    ) -> Self {
        Self {
            result: Ok(value),
            request,
            response,
        }
    }

    pub fn failure(
        error: Error,
        request: Option<TransportRequest>,
        response: Option<ResponseMeta>,
    ) -> Self {
        Self {
            result: Err(error),
            request,
            response,
        }
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn error(&self) -> Option<&Error> {
        self.result.as_ref().err()
    }

    /// Transforms the success value, keeping request and response metadata.
    pub fn map<U, F>(self, f: F) -> ExecutionResult<U>
    where
        F: FnOnce(T) -> U,
    {
        ExecutionResult {
            result: self.result.map(f),
            request: self.request,
            response: self.response,
        }
    }

    pub fn into_result(self) -> Result<T, Error> {
        self.result
    }
}
