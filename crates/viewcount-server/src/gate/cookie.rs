//! Expiring-cookie visit gate.

use std::time::Duration;

use tower_cookies::cookie::SameSite;
use tower_cookies::Cookie;

use crate::gate::{VisitContext, VisitGate};

/// Name of the dedup marker cookie.
pub const MARKER_COOKIE: &str = "viewed";

/// Deduplicates visits with a `viewed` cookie that expires after
/// `marker_ttl`.
///
/// A request carrying the cookie is a returning visitor. A request without
/// it is counted, and the response sets `viewed=true; Path=/; Max-Age=<ttl>;
/// SameSite=Lax` so the same browser stops counting until the cookie
/// expires. State lives entirely client-side, so it survives server
/// restarts, at the cost of being per-browser and trivially clearable.
#[derive(Debug)]
pub struct CookieGate {
    marker_ttl: Duration,
}

impl CookieGate {
    /// Creates a gate whose marker cookie lives for `marker_ttl`.
    pub fn new(marker_ttl: Duration) -> Self {
        CookieGate { marker_ttl }
    }
}

impl VisitGate for CookieGate {
    fn observe(&self, ctx: &VisitContext<'_>) -> bool {
        if ctx.cookies.get(MARKER_COOKIE).is_some() {
            return false;
        }

        let marker = Cookie::build((MARKER_COOKIE, "true"))
            .path("/")
            .max_age(tower_cookies::cookie::time::Duration::seconds(
                self.marker_ttl.as_secs() as i64,
            ))
            .same_site(SameSite::Lax)
            .build();
        ctx.cookies.add(marker);
        true
    }
}
