//! TLB Tests.
//!
//! Verifies LRU eviction order, recency promotion on resolve, and the
//! capacity invariant over arbitrary operation sequences.

use std::collections::HashSet;

use proptest::prelude::*;
use vmsim_core::units::mmu::tlb::Tlb;

use crate::common::{page, va};

// ══════════════════════════════════════════════════════════
// 1. LRU order
// ══════════════════════════════════════════════════════════

/// Capacity 2, inserts A, B, C: A is evicted, B and C stay resident.
#[test]
fn third_insert_evicts_first() {
    let mut tlb = Tlb::new(2);
    assert_eq!(tlb.insert(va(0xA), page(0xA)), None);
    assert_eq!(tlb.insert(va(0xB), page(0xB)), None);
    assert_eq!(tlb.insert(va(0xC), page(0xC)), Some((va(0xA), page(0xA))));

    assert_eq!(tlb.resolve(va(0xA)), None);
    assert_eq!(tlb.resolve(va(0xB)), Some(page(0xB)));
    assert_eq!(tlb.resolve(va(0xC)), Some(page(0xC)));
}

/// Resolving the LRU entry protects it from the next eviction.
#[test]
fn resolve_promotes_to_mru() {
    let mut tlb = Tlb::new(2);
    let _ = tlb.insert(va(0xA), page(0xA));
    let _ = tlb.insert(va(0xB), page(0xB));

    assert_eq!(tlb.resolve(va(0xA)), Some(page(0xA)));
    assert_eq!(tlb.insert(va(0xC), page(0xC)), Some((va(0xB), page(0xB))));

    assert!(tlb.contains(va(0xA)));
    assert!(!tlb.contains(va(0xB)));
    assert_eq!(
        tlb.recency().copied().collect::<Vec<_>>(),
        vec![va(0xC), va(0xA)]
    );
}

/// Re-inserting an address updates its page and promotes it.
#[test]
fn reinsert_promotes_and_updates() {
    let mut tlb = Tlb::new(3);
    let _ = tlb.insert(va(1), page(1));
    let _ = tlb.insert(va(2), page(2));
    let _ = tlb.insert(va(3), page(3));
    assert_eq!(tlb.insert(va(1), page(42)), None);

    assert_eq!(tlb.peek(va(1)), Some(page(42)));
    assert_eq!(tlb.insert(va(4), page(4)), Some((va(2), page(2))));
}

/// Peek does not disturb the eviction order.
#[test]
fn peek_does_not_promote() {
    let mut tlb = Tlb::new(2);
    let _ = tlb.insert(va(1), page(1));
    let _ = tlb.insert(va(2), page(2));
    assert_eq!(tlb.peek(va(1)), Some(page(1)));
    assert_eq!(tlb.insert(va(3), page(3)), Some((va(1), page(1))));
}

// ══════════════════════════════════════════════════════════
// 2. Invariants
// ══════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
enum Op {
    Insert(u64),
    Resolve(u64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u64..32).prop_map(Op::Insert),
        (0u64..32).prop_map(Op::Resolve),
    ]
}

proptest! {
    /// Size never exceeds capacity; recency is a duplicate-free permutation of the keys.
    #[test]
    fn capacity_and_recency_hold(capacity in 1usize..8, ops in prop::collection::vec(op(), 0..200)) {
        let mut tlb = Tlb::new(capacity);
        for op in ops {
            match op {
                Op::Insert(a) => { let _ = tlb.insert(va(a), page(a)); }
                Op::Resolve(a) => { let _ = tlb.resolve(va(a)); }
            }
            prop_assert!(tlb.len() <= capacity);

            let order: Vec<_> = tlb.recency().copied().collect();
            let unique: HashSet<_> = order.iter().copied().collect();
            prop_assert_eq!(order.len(), tlb.len());
            prop_assert_eq!(unique.len(), order.len());
            prop_assert!(order.iter().all(|&a| tlb.contains(a)));
        }
    }

    /// The last inserted address is always resident and MRU.
    #[test]
    fn last_insert_is_mru(capacity in 1usize..8, addrs in prop::collection::vec(0u64..64, 1..100)) {
        let mut tlb = Tlb::new(capacity);
        for &a in &addrs {
            let _ = tlb.insert(va(a), page(a));
        }
        let last = addrs[addrs.len() - 1];
        prop_assert_eq!(tlb.recency().next().copied(), Some(va(last)));
        prop_assert_eq!(tlb.peek(va(last)), Some(page(last)));
    }
}
