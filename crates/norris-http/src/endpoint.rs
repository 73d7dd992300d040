//! Declarative request descriptors.

use bytes::Bytes;
use strum::{AsRefStr, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum HttpMethod {
  Get,
  Post,
  Put,
  Delete,
}

impl From<HttpMethod> for reqwest::Method {
  fn from(method: HttpMethod) -> Self {
    match method {
      HttpMethod::Get => reqwest::Method::GET,
      HttpMethod::Post => reqwest::Method::POST,
      HttpMethod::Put => reqwest::Method::PUT,
      HttpMethod::Delete => reqwest::Method::DELETE,
    }
  }
}

/// A completed HTTP exchange. Any status code counts as a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
  pub status_code: u16,
  pub body:        Bytes,
}

impl HttpResponse {
  pub fn new(status_code: u16, body: impl Into<Bytes>) -> Self {
    Self { status_code, body: body.into() }
  }

  pub fn ok(body: impl Into<Bytes>) -> Self { Self::new(200, body) }
}

/// Everything needed to issue one request.
pub trait Endpoint: Send + Sync {
  /// Scheme, host and any fixed path prefix, without a trailing slash.
  fn base_url(&self) -> &str;

  /// Path appended to [`Endpoint::base_url`], starting with `/`.
  fn path(&self) -> String;

  /// Query parameters; values are percent-encoded by the client.
  fn query(&self) -> Vec<(&'static str, String)> { Vec::new() }

  fn method(&self) -> HttpMethod { HttpMethod::Get }

  fn body(&self) -> Option<Bytes> { None }

  fn headers(&self) -> Vec<(&'static str, String)> { Vec::new() }

  /// Canned response. When present the client returns it without touching
  /// the network or checking connectivity.
  fn sample_data(&self) -> Option<HttpResponse> { None }
}
