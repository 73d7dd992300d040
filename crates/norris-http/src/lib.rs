//! HTTP access to the facts API.
//!
//! [`HttpClient`] executes declarative [`Endpoint`] descriptors and delivers
//! exactly one outcome per request. It never interprets status codes; that
//! policy belongs to the caller. [`FactsApi`] describes the two routes the
//! pipeline consumes, and [`wire`] decodes their JSON bodies.

pub mod api;
pub mod client;
pub mod endpoint;
pub mod fixtures;
pub mod handle;
pub mod mock;
pub mod reachability;
pub mod wire;

pub use api::{ApiRequest, ApiRoute, ApiStubs, FactsApi};
pub use client::{HttpClient, RequestHook, ResponseHook};
pub use endpoint::{Endpoint, HttpMethod, HttpResponse};
pub use handle::{Outcome, RequestHandle, Transport};
pub use mock::{MockTransport, RecordedRequest};
pub use reachability::{Connectivity, Reachability, SystemReachability};

#[cfg(test)]
mod tests;
