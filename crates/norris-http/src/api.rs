//! The two facts API routes the pipeline consumes.

use std::sync::Arc;

use bytes::Bytes;

use crate::{
  endpoint::{Endpoint, HttpResponse},
  fixtures,
};

pub const DEFAULT_BASE_URL: &str = "https://api.chucknorris.io/jokes";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRoute {
  /// `GET {base}/categories` → JSON array of category strings.
  Categories,
  /// `GET {base}/search?query={term}` → `{ "total", "result" }`.
  Search { term: String },
}

/// One concrete request against the facts API.
#[derive(Debug, Clone)]
pub struct ApiRequest {
  base_url: Arc<str>,
  route:    ApiRoute,
  sample:   Option<HttpResponse>,
}

impl ApiRequest {
  pub fn route(&self) -> &ApiRoute { &self.route }
}

impl Endpoint for ApiRequest {
  fn base_url(&self) -> &str { &self.base_url }

  fn path(&self) -> String {
    match self.route {
      ApiRoute::Categories => "/categories".to_owned(),
      ApiRoute::Search { .. } => "/search".to_owned(),
    }
  }

  fn query(&self) -> Vec<(&'static str, String)> {
    match &self.route {
      ApiRoute::Categories => Vec::new(),
      ApiRoute::Search { term } => vec![("query", term.clone())],
    }
  }

  fn headers(&self) -> Vec<(&'static str, String)> {
    vec![("Content-type", "application/json".to_owned())]
  }

  fn sample_data(&self) -> Option<HttpResponse> { self.sample.clone() }
}

// ─── Stubs ───────────────────────────────────────────────────────────────────

/// Canned responses served instead of the network.
#[derive(Debug, Clone)]
pub struct ApiStubs {
  pub categories: HttpResponse,
  pub search:     HttpResponse,
}

impl ApiStubs {
  /// The bundled fixture payloads, all with status 200.
  pub fn fixtures() -> Self {
    Self {
      categories: HttpResponse::ok(Bytes::from_static(fixtures::CATEGORIES)),
      search:     HttpResponse::ok(Bytes::from_static(fixtures::SEARCH_RESPONSE)),
    }
  }

  /// Every route answers with `status_code` and an empty body.
  pub fn failing(status_code: u16) -> Self {
    Self {
      categories: HttpResponse::new(status_code, Bytes::new()),
      search:     HttpResponse::new(status_code, Bytes::new()),
    }
  }

  fn for_route(&self, route: &ApiRoute) -> HttpResponse {
    match route {
      ApiRoute::Categories => self.categories.clone(),
      ApiRoute::Search { .. } => self.search.clone(),
    }
  }
}

// ─── Facts API ───────────────────────────────────────────────────────────────

/// Builds [`ApiRequest`]s for a given base URL.
#[derive(Debug, Clone)]
pub struct FactsApi {
  base_url: Arc<str>,
  stubs:    Option<Arc<ApiStubs>>,
}

impl FactsApi {
  pub fn new(base_url: impl Into<String>) -> Self {
    let base_url: String = base_url.into();
    Self {
      base_url: Arc::from(base_url.trim_end_matches('/')),
      stubs:    None,
    }
  }

  /// Attach canned responses to every request this API builds.
  pub fn with_stubs(mut self, stubs: ApiStubs) -> Self {
    self.stubs = Some(Arc::new(stubs));
    self
  }

  pub fn is_stubbed(&self) -> bool { self.stubs.is_some() }

  pub fn base_url(&self) -> &str { &self.base_url }

  pub fn categories(&self) -> ApiRequest { self.request(ApiRoute::Categories) }

  pub fn search(&self, term: &str) -> ApiRequest {
    self.request(ApiRoute::Search { term: term.to_owned() })
  }

  fn request(&self, route: ApiRoute) -> ApiRequest {
    let sample = self.stubs.as_ref().map(|s| s.for_route(&route));
    ApiRequest { base_url: self.base_url.clone(), route, sample }
  }
}

impl Default for FactsApi {
  fn default() -> Self { Self::new(DEFAULT_BASE_URL) }
}
