//! Visit gating: deciding whether a POST counts as a new visit.
//!
//! A [`VisitGate`] inspects the request context and reports whether this
//! visitor has been seen within the dedup window, marking them as seen as a
//! side effect. Two strategies are provided:
//!
//! - [`IpSetGate`]: process-local set of client IPs. No client state, but
//!   resets on restart and conflates visitors behind one NAT.
//! - [`CookieGate`]: a `viewed` cookie with a bounded lifetime. Survives
//!   restarts and distinguishes browsers, but is per-browser and clearable.
//!
//! The gate decides only whether to count; the counter itself lives behind
//! the service layer.

pub mod cookie;
pub mod ip;

pub use cookie::CookieGate;
pub use ip::IpSetGate;

use tower_cookies::Cookies;

/// Per-request context a gate inspects.
pub struct VisitContext<'a> {
    /// Best-effort client IP (forwarded header or peer address).
    pub client_ip: &'a str,
    /// The request's cookie jar; additions become `Set-Cookie` headers.
    pub cookies: &'a Cookies,
}

/// Decides whether a request is a new visit, marking the visitor as seen.
///
/// `observe` returns `true` exactly once per visitor per dedup window;
/// subsequent calls within the window return `false`.
pub trait VisitGate: Send + Sync {
    fn observe(&self, ctx: &VisitContext<'_>) -> bool;
}
