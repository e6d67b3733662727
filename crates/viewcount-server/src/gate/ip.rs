//! IP-set visit gate.

use dashmap::DashSet;

use crate::gate::{VisitContext, VisitGate};

/// Deduplicates visits by client IP for the lifetime of the process.
///
/// The set only ever grows; there is no expiry, so a visitor counts once
/// per server run. A restart clears the set and every visitor counts again.
/// Visitors sharing an address (NAT, corporate proxy) are conflated into
/// one visit.
#[derive(Debug, Default)]
pub struct IpSetGate {
    seen: DashSet<String>,
}

impl IpSetGate {
    /// Creates an empty gate.
    pub fn new() -> Self {
        IpSetGate {
            seen: DashSet::new(),
        }
    }

    /// Number of distinct IPs observed so far.
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }
}

impl VisitGate for IpSetGate {
    fn observe(&self, ctx: &VisitContext<'_>) -> bool {
        // DashSet::insert returns true when the value was not present,
        // which is exactly "this is a new visit".
        self.seen.insert(ctx.client_ip.to_string())
    }
}
