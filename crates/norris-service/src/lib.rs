//! The facts service: the one place that coordinates the HTTP client, the
//! local store and the error model.
//!
//! [`FactsService`] offers category sync and fact search (each with a
//! bounded [`RetryPolicy`]) plus live feeds over the store.
//! [`SearchSession`] drives searches with latest-wins semantics.

pub mod feed;
pub mod retry;
pub mod service;
pub mod session;

pub use feed::FeedQuery;
pub use retry::RetryPolicy;
pub use service::{DEFAULT_DISCOVER_LIMIT, FactsService};
pub use session::{SearchOutcome, SearchSession};
