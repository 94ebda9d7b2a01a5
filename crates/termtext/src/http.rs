//! Completed HTTP responses as handed to the render pipeline.
//!
//! termtext never performs network I/O. Callers build an [`HttpResponse`]
//! from whatever client they use (status, headers, and a body reader) and
//! pass it in. The body is single-use: [`HttpResponse::take_body`] reads it
//! to the end and drops the reader, which closes it.
//!
//! ```rust
//! use termtext::HttpResponse;
//!
//! let mut resp = HttpResponse::new(404)
//!     .header("Content-Type", "application/json")
//!     .body(r#"{"status":404,"message":"not found"}"#);
//!
//! assert_eq!(resp.status(), "404 Not Found");
//! let body = resp.take_body().unwrap();
//! assert_eq!(body.len(), 36);
//! assert!(resp.take_body().is_err());
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, Cursor, Read};

use log::trace;
use serde::{Deserialize, Serialize};

use crate::profile::Role;

/// Error returned when a response body cannot be produced.
#[derive(Debug, thiserror::Error)]
pub enum BodyError {
    /// The body was already read (and closed) earlier.
    #[error("body already consumed")]
    Consumed,

    /// Reading the body failed.
    #[error("{0}")]
    Read(#[source] io::Error),
}

/// A completed HTTP response with a readable body.
pub struct HttpResponse {
    status_code: u16,
    status: String,
    content_length: i64,
    transfer_encoding: Vec<String>,
    uncompressed: bool,
    headers: BTreeMap<String, Vec<String>>,
    body: Option<Box<dyn Read>>,
}

impl HttpResponse {
    /// Creates a response with an empty body and the canonical status line.
    pub fn new(status_code: u16) -> Self {
        let status = match canonical_reason(status_code) {
            Some(reason) => format!("{} {}", status_code, reason),
            None => status_code.to_string(),
        };
        Self {
            status_code,
            status,
            content_length: -1,
            transfer_encoding: Vec::new(),
            uncompressed: false,
            headers: BTreeMap::new(),
            body: Some(Box::new(io::empty())),
        }
    }

    /// Replaces the reason phrase in the status line.
    pub fn status_text(mut self, reason: impl fmt::Display) -> Self {
        self.status = format!("{} {}", self.status_code, reason);
        self
    }

    /// Appends a header value.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .entry(name.into())
            .or_default()
            .push(value.into());
        self
    }

    /// Sets an in-memory body and the matching content length.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        let body = body.into();
        self.content_length = body.len() as i64;
        self.body = Some(Box::new(Cursor::new(body)));
        self
    }

    /// Sets a streaming body. The content length is left as-is.
    pub fn reader(mut self, reader: impl Read + 'static) -> Self {
        self.body = Some(Box::new(reader));
        self
    }

    /// Sets the content length (`-1` means unknown).
    pub fn content_length(mut self, length: i64) -> Self {
        self.content_length = length;
        self
    }

    /// Sets the transfer encodings, outermost first.
    pub fn transfer_encoding<I, S>(mut self, encodings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.transfer_encoding = encodings.into_iter().map(Into::into).collect();
        self
    }

    /// Marks the body as transparently decompressed by the client.
    pub fn uncompressed(mut self, uncompressed: bool) -> Self {
        self.uncompressed = uncompressed;
        self
    }

    /// Numeric status code.
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Status line, e.g. `200 OK`.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Content length, `-1` when unknown.
    pub fn get_content_length(&self) -> i64 {
        self.content_length
    }

    /// Transfer encodings.
    pub fn get_transfer_encoding(&self) -> &[String] {
        &self.transfer_encoding
    }

    /// Whether the client decompressed the body.
    pub fn is_uncompressed(&self) -> bool {
        self.uncompressed
    }

    /// Headers, sorted by name.
    pub fn headers(&self) -> &BTreeMap<String, Vec<String>> {
        &self.headers
    }

    /// True for `204 No Content`, which never carries a body.
    pub fn is_no_content(&self) -> bool {
        self.status_code == 204
    }

    /// Reads the body to the end and closes it.
    ///
    /// Subsequent calls return [`BodyError::Consumed`].
    pub fn take_body(&mut self) -> Result<Vec<u8>, BodyError> {
        let mut reader = self.body.take().ok_or(BodyError::Consumed)?;
        let mut buf = Vec::new();
        let result = reader.read_to_end(&mut buf);
        drop(reader);
        trace!(target: "termtext::render", "consumed {} body bytes", buf.len());
        result.map(|_| buf).map_err(BodyError::Read)
    }
}

impl fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .field("content_length", &self.content_length)
            .field("transfer_encoding", &self.transfer_encoding)
            .field("uncompressed", &self.uncompressed)
            .field("headers", &self.headers)
            .field("body_consumed", &self.body.is_none())
            .finish()
    }
}

/// The `{status, message}` object many API error bodies carry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddedMessage {
    /// Status code repeated in the body.
    pub status: i64,
    /// Human-readable message.
    pub message: String,
}

impl EmbeddedMessage {
    /// Parses a body as an embedded message.
    pub fn parse(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    /// Returns the message when the body parses and the message is non-empty.
    pub fn extract(body: &[u8]) -> Option<String> {
        Self::parse(body)
            .ok()
            .map(|m| m.message)
            .filter(|m| !m.is_empty())
    }
}

/// Maps a status code to the role used to color it.
///
/// Below 300 is [`Role::Success`], below 400 is [`Role::Warn`], everything
/// else is [`Role::Fail`].
pub fn status_role(status_code: u16) -> Role {
    match status_code {
        0..=299 => Role::Success,
        300..=399 => Role::Warn,
        _ => Role::Fail,
    }
}

fn canonical_reason(status_code: u16) -> Option<&'static str> {
    let reason = match status_code {
        100 => "Continue",
        101 => "Switching Protocols",
        200 => "OK",
        201 => "Created",
        202 => "Accepted",
        204 => "No Content",
        206 => "Partial Content",
        301 => "Moved Permanently",
        302 => "Found",
        303 => "See Other",
        304 => "Not Modified",
        307 => "Temporary Redirect",
        308 => "Permanent Redirect",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        409 => "Conflict",
        410 => "Gone",
        415 => "Unsupported Media Type",
        422 => "Unprocessable Entity",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        501 => "Not Implemented",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        _ => return None,
    };
    Some(reason)
}
