//! [`HttpClient`] — executes [`Endpoint`] descriptors over reqwest.

use std::{sync::Arc, time::Duration};

use norris_core::error::NetworkError;
use reqwest::Client;

use crate::{
  endpoint::{Endpoint, HttpResponse},
  reachability::Reachability,
};

/// Rewrites a built request before it is sent.
pub type RequestHook = Arc<dyn Fn(&mut reqwest::Request) + Send + Sync>;

/// Observes every raw response (status and headers) as soon as it arrives,
/// before the body is read.
pub type ResponseHook = Arc<dyn Fn(&reqwest::Response) + Send + Sync>;

/// Async HTTP client for declarative endpoints.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct HttpClient {
  client:        Client,
  reachability:  Arc<dyn Reachability>,
  request_hook:  Option<RequestHook>,
  response_hook: Option<ResponseHook>,
}

impl HttpClient {
  pub fn new(reachability: impl Reachability + 'static) -> Result<Self, NetworkError> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .map_err(NetworkError::unknown)?;
    Ok(Self::with_client(client, reachability))
  }

  pub fn with_client(client: Client, reachability: impl Reachability + 'static) -> Self {
    Self {
      client,
      reachability: Arc::new(reachability),
      request_hook: None,
      response_hook: None,
    }
  }

  pub fn on_request(
    mut self,
    hook: impl Fn(&mut reqwest::Request) + Send + Sync + 'static,
  ) -> Self {
    self.request_hook = Some(Arc::new(hook));
    self
  }

  pub fn on_response(
    mut self,
    hook: impl Fn(&reqwest::Response) + Send + Sync + 'static,
  ) -> Self {
    self.response_hook = Some(Arc::new(hook));
    self
  }

  /// Turn a descriptor into a concrete request.
  pub fn build_request<E: Endpoint + ?Sized>(
    &self,
    endpoint: &E,
  ) -> Result<reqwest::Request, NetworkError> {
    let raw = format!(
      "{}{}",
      endpoint.base_url().trim_end_matches('/'),
      endpoint.path()
    );
    let mut url = reqwest::Url::parse(&raw).map_err(NetworkError::unknown)?;

    let query = endpoint.query();
    if !query.is_empty() {
      url.query_pairs_mut().extend_pairs(query.iter());
    }

    let mut builder = self.client.request(endpoint.method().into(), url);
    for (name, value) in endpoint.headers() {
      builder = builder.header(name, value);
    }
    if let Some(body) = endpoint.body() {
      builder = builder.body(body);
    }
    builder.build().map_err(NetworkError::unknown)
  }

  /// Execute one request and deliver its single outcome.
  ///
  /// Status codes are not interpreted: a 500 is a successful exchange here.
  pub async fn execute<E: Endpoint + ?Sized>(
    &self,
    endpoint: &E,
  ) -> Result<HttpResponse, NetworkError> {
    if let Some(sample) = endpoint.sample_data() {
      tracing::debug!(path = %endpoint.path(), "serving sample data");
      return Ok(sample);
    }

    if !self.reachability.is_connected() {
      tracing::debug!(path = %endpoint.path(), "no network; request not sent");
      return Err(NetworkError::NoInternetConnection);
    }

    let mut request = self.build_request(endpoint)?;
    if let Some(hook) = &self.request_hook {
      hook(&mut request);
    }
    tracing::debug!(method = %request.method(), url = %request.url(), "sending request");

    let response = self
      .client
      .execute(request)
      .await
      .map_err(NetworkError::unknown)?;
    if let Some(hook) = &self.response_hook {
      hook(&response);
    }
    let status_code = response.status().as_u16();

    let body = response.bytes().await.map_err(|e| {
      tracing::debug!(error = %e, status_code, "response body unreadable");
      NetworkError::ConnectionError
    })?;

    let response = HttpResponse { status_code, body };
    tracing::debug!(status_code, bytes = response.body.len(), "received response");
    Ok(response)
  }
}
