//! Declarative request descriptions.

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use serde::Serialize;
use url::Url;

use crate::Error;

/// HTTP verbs supported by the executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }

    /// Methods that get a JSON content type when they carry a body.
    pub(crate) fn sends_json(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One outbound HTTP call plus the type its response body decodes into.
///
/// A descriptor always holds an absolute `http`/`https` URL: the constructors
/// reject anything else with [`Error::InvalidUrl`]. Builder methods consume
/// the descriptor and return a new one, so a built value never changes.
pub struct RequestDescriptor<T> {
    url: Url,
    method: HttpMethod,
    headers: BTreeMap<String, String>,
    body: Option<Vec<u8>>,
    response: PhantomData<fn() -> T>,
}

impl<T> RequestDescriptor<T> {
    /// Parses `url` and builds a descriptor without headers or body.
    pub fn new(method: HttpMethod, url: &str) -> Result<Self, Error> {
        let url = Url::parse(url).map_err(|e| {
            tracing::error!("Invalid URL '{}': {}", url, e);
            Error::from(e)
        })?;
        Self::from_url(method, url)
    }

    pub fn from_url(method: HttpMethod, url: Url) -> Result<Self, Error> {
        if !matches!(url.scheme(), "http" | "https") || url.host().is_none() {
            return Err(Error::InvalidUrl(format!(
                "'{}' is not an absolute http(s) URL",
                url
            )));
        }
        Ok(Self {
            url,
            method,
            headers: BTreeMap::new(),
            body: None,
            response: PhantomData,
        })
    }

    pub fn get(url: &str) -> Result<Self, Error> {
        Self::new(HttpMethod::Get, url)
    }

    /// Sets a header, replacing any existing one whose name differs only in case.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.retain(|key, _| !key.eq_ignore_ascii_case(name));
        self.headers.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serializes `body` as JSON. Encoding failures surface as [`Error::Decoding`]
    /// since both directions are `serde_json` failures.
    pub fn with_json_body<B: Serialize + ?Sized>(self, body: &B) -> Result<Self, Error> {
        let bytes = serde_json::to_vec(body).map_err(Error::Decoding)?;
        Ok(self.with_body(bytes))
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    pub(crate) fn has_header(&self, name: &str) -> bool {
        self.headers.keys().any(|key| key.eq_ignore_ascii_case(name))
    }
}

impl<T> Clone for RequestDescriptor<T> {
    fn clone(&self) -> Self {
        Self {
            url: self.url.clone(),
            method: self.method,
            headers: self.headers.clone(),
            body: self.body.clone(),
            response: PhantomData,
        }
    }
}

impl<T> fmt::Debug for RequestDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestDescriptor")
            .field("url", &self.url.as_str())
            .field("method", &self.method)
            .field("headers", &self.headers)
            .field("body_len", &self.body.as_ref().map(Vec::len))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_relative_url() {
        let err = RequestDescriptor::<()>::get("/character/").unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    fn rejects_garbage() {
        assert!(RequestDescriptor::<()>::get("not a url").is_err());
        assert!(RequestDescriptor::<()>::get("").is_err());
    }

    #[test]
    fn rejects_non_http_scheme() {
        let err = RequestDescriptor::<()>::get("mailto:rick@citadel.example").unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
        assert!(RequestDescriptor::<()>::get("ftp://example.com/file").is_err());
    }

    #[test]
    fn builder_keeps_parts() {
        let descriptor = RequestDescriptor::<()>::new(HttpMethod::Post, "https://example.com/a")
            .unwrap()
            .with_header("X-Trace", "abc")
            .with_body(b"{}".to_vec());
        assert_eq!(descriptor.method(), HttpMethod::Post);
        assert_eq!(descriptor.url().as_str(), "https://example.com/a");
        assert_eq!(descriptor.headers().get("X-Trace").map(String::as_str), Some("abc"));
        assert_eq!(descriptor.body(), Some(&b"{}"[..]));
        assert!(descriptor.has_header("x-trace"));
    }

    #[test]
    fn header_names_replace_case_insensitively() {
        let descriptor = RequestDescriptor::<()>::get("https://example.com/a")
            .unwrap()
            .with_header("Content-Type", "text/plain")
            .with_header("content-type", "application/json");
        assert_eq!(descriptor.headers().len(), 1);
        assert_eq!(
            descriptor.headers().get("content-type").map(String::as_str),
            Some("application/json")
        );
    }

    #[test]
    fn json_body_is_serialized() {
        #[derive(Serialize)]
        struct NewCharacter<'a> {
            name: &'a str,
        }
        let descriptor = RequestDescriptor::<()>::new(HttpMethod::Put, "https://example.com/c")
            .unwrap()
            .with_json_body(&NewCharacter { name: "Birdperson" })
            .unwrap();
        assert_eq!(descriptor.body(), Some(&br#"{"name":"Birdperson"}"#[..]));
    }
}
