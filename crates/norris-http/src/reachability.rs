//! Preflight connectivity check.
//!
//! [`SystemReachability`] asks the host for its interfaces; [`Connectivity`]
//! is a manual flag for tests and for forcing the app offline.

use std::{
  net::IpAddr,
  sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
  },
};

/// Answers "is there a network at all?" before a request is issued.
pub trait Reachability: Send + Sync {
  fn is_connected(&self) -> bool;
}

impl<R: Reachability + ?Sized> Reachability for Arc<R> {
  fn is_connected(&self) -> bool { (**self).is_connected() }
}

// ─── System ──────────────────────────────────────────────────────────────────

/// Connected when some interface other than loopback holds a routable
/// address. Re-checked on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemReachability;

impl Reachability for SystemReachability {
  fn is_connected(&self) -> bool {
    match get_if_addrs::get_if_addrs() {
      Ok(interfaces) => has_routable_address(interfaces.iter().map(|i| i.ip())),
      Err(e) => {
        tracing::warn!(error = %e, "could not list network interfaces");
        false
      }
    }
  }
}

/// Whether any address could reach beyond this host.
pub fn has_routable_address(addrs: impl IntoIterator<Item = IpAddr>) -> bool {
  addrs.into_iter().any(|addr| match addr {
    IpAddr::V4(v4) => !(v4.is_loopback() || v4.is_unspecified() || v4.is_link_local()),
    IpAddr::V6(v6) => {
      !(v6.is_loopback() || v6.is_unspecified() || v6.is_unicast_link_local())
    }
  })
}

// ─── Manual ──────────────────────────────────────────────────────────────────

/// A switchable connectivity flag shared by every clone. Online by default.
#[derive(Debug, Clone)]
pub struct Connectivity {
  online: Arc<AtomicBool>,
}

impl Connectivity {
  pub fn online() -> Self { Self { online: Arc::new(AtomicBool::new(true)) } }

  pub fn offline() -> Self { Self { online: Arc::new(AtomicBool::new(false)) } }

  pub fn set_online(&self, online: bool) { self.online.store(online, Ordering::SeqCst); }
}

impl Default for Connectivity {
  fn default() -> Self { Self::online() }
}

impl Reachability for Connectivity {
  fn is_connected(&self) -> bool { self.online.load(Ordering::SeqCst) }
}
