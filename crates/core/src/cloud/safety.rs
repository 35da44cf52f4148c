//! Single-resource Banker's safety check.
//!
//! A state is safe when every VM can be driven to completion in some order:
//! repeatedly pick a VM whose outstanding need fits in the free pool, let it
//! finish, and return its allocation to the pool.

use crate::common::VmId;

/// Resources one VM holds and may still claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Claim {
    /// VM holding the allocation.
    pub id: VmId,
    /// Amount currently held.
    pub allocation: u64,
    /// Largest amount the VM may ever hold.
    pub max_demand: u64,
}

impl Claim {
    /// Amount the VM may still request. Never negative.
    pub const fn need(&self) -> u64 {
        self.max_demand.saturating_sub(self.allocation)
    }
}

/// Runs the reachability test over `claims` with `available` free.
///
/// Claims are scanned in order and the first one that fits finishes next.
///
/// # Returns
///
/// The finishing order if every claim can finish, otherwise `None`.
pub fn safe_sequence(available: u64, claims: &[Claim]) -> Option<Vec<VmId>> {
    let mut pending: Vec<Claim> = claims.to_vec();
    let mut work = available;
    let mut order = Vec::with_capacity(pending.len());

    while let Some(pos) = pending.iter().position(|c| c.need() <= work) {
        let done = pending.remove(pos);
        work = work.saturating_add(done.allocation);
        order.push(done.id);
    }

    pending.is_empty().then_some(order)
}

/// Returns whether every claim can finish.
pub fn is_safe(available: u64, claims: &[Claim]) -> bool {
    safe_sequence(available, claims).is_some()
}
