//! Tied-minimum candidate sets for the allocation search.
//!
//! Each DP cell keeps every allocation vector that reaches the cheapest
//! price seen so far. Offers at a lower price replace the set; offers at the
//! same price are merged in, skipping vectors already present.
//!
//! Duplicate detection hashes each vector's per-room `(adult, child, price)`
//! triples, so a tie costs time linear in the size of the offer.

use std::collections::HashSet;

use crate::model::{GuestAllocation, RoomAllocation};

/// Hashable identity of an allocation vector.
type AllocationKey = Vec<(u32, u32, u64)>;

fn key(alloc: &[RoomAllocation]) -> AllocationKey {
    alloc
        .iter()
        .map(|slot| {
            // +0.0 and -0.0 compare equal, so they must hash equal too.
            let bits = if slot.price == 0.0 { 0 } else { slot.price.to_bits() };
            (slot.adult, slot.child, bits)
        })
        .collect()
}

/// Push every vector of `incoming` whose key is not yet in `seen`.
fn extend_unique(
    target: &mut Vec<GuestAllocation>,
    seen: &mut HashSet<AllocationKey>,
    incoming: Vec<GuestAllocation>,
) {
    for alloc in incoming {
        if seen.insert(key(&alloc)) {
            target.push(alloc);
        }
    }
}

/// Append every vector of `set_b` not already in `set_a`.
///
/// `set_a` keeps its order and `set_b`'s new vectors follow in their
/// original relative order. Equality is structural (every room, every field).
pub fn merge(mut set_a: Vec<GuestAllocation>, set_b: Vec<GuestAllocation>) -> Vec<GuestAllocation> {
    let mut seen: HashSet<AllocationKey> = set_a.iter().map(|a| key(a)).collect();
    extend_unique(&mut set_a, &mut seen, set_b);
    set_a
}

/// Allocation vectors tied at the lowest total price offered so far.
#[derive(Debug, Clone, Default)]
pub struct CandidateSet {
    price: Option<f64>,
    allocations: Vec<GuestAllocation>,
    seen: HashSet<AllocationKey>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer `allocations`, all costing `price` in total.
    ///
    /// An empty offer is an infeasible branch and never changes the set.
    pub fn offer(&mut self, price: f64, allocations: Vec<GuestAllocation>) {
        if allocations.is_empty() {
            return;
        }
        match self.price {
            Some(best) if price > best => {}
            Some(best) if price == best => {
                extend_unique(&mut self.allocations, &mut self.seen, allocations);
            }
            _ => {
                self.price = Some(price);
                self.allocations.clear();
                self.seen.clear();
                extend_unique(&mut self.allocations, &mut self.seen, allocations);
            }
        }
    }

    /// Cheapest total price, `None` if nothing feasible was offered.
    pub fn price(&self) -> Option<f64> {
        self.price
    }

    pub fn is_empty(&self) -> bool {
        self.allocations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.allocations.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GuestAllocation> {
        self.allocations.iter()
    }

    pub fn first(&self) -> Option<&GuestAllocation> {
        self.allocations.first()
    }

    /// Take the first candidate in generation order.
    pub fn into_first(self) -> Option<GuestAllocation> {
        self.allocations.into_iter().next()
    }

    pub fn into_vec(self) -> Vec<GuestAllocation> {
        self.allocations
    }
}

impl<'a> IntoIterator for &'a CandidateSet {
    type Item = &'a GuestAllocation;
    type IntoIter = std::slice::Iter<'a, GuestAllocation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RoomAllocation;

    fn alloc(rooms: &[(u32, u32, f64)]) -> GuestAllocation {
        rooms
            .iter()
            .map(|&(a, c, p)| RoomAllocation::new(a, c, p))
            .collect()
    }

    #[test]
    fn test_merge_skips_duplicates() {
        let x = alloc(&[(1, 0, 100.0), (0, 0, 0.0)]);
        let y = alloc(&[(0, 0, 0.0), (1, 0, 100.0)]);
        let z = alloc(&[(1, 1, 150.0), (0, 0, 0.0)]);
        let merged = merge(vec![x.clone(), y.clone()], vec![y.clone(), z.clone()]);
        assert_eq!(merged, vec![x, y, z]);
    }

    #[test]
    fn test_merge_preserves_order() {
        let x = alloc(&[(1, 0, 1.0)]);
        let y = alloc(&[(2, 0, 2.0)]);
        let z = alloc(&[(3, 0, 3.0)]);
        let merged = merge(vec![z.clone()], vec![x.clone(), y.clone()]);
        assert_eq!(merged, vec![z, x, y]);
    }

    #[test]
    fn test_merge_compares_price_field() {
        let x = alloc(&[(1, 0, 100.0)]);
        let y = alloc(&[(1, 0, 101.0)]);
        assert_eq!(merge(vec![x], vec![y]).len(), 2);
    }

    #[test]
    fn test_merge_treats_signed_zero_as_equal() {
        let x = alloc(&[(0, 0, 0.0)]);
        let y = alloc(&[(0, 0, -0.0)]);
        assert_eq!(merge(vec![x.clone()], vec![y]), vec![x]);
    }

    #[test]
    fn test_merge_large_tie_keeps_each_vector_once() {
        // 40 rooms, one adult in any one of them: 40 distinct vectors.
        let single = |i: usize| {
            let mut v = vec![RoomAllocation::empty(); 40];
            v[i] = RoomAllocation::new(1, 0, 10.0);
            v
        };
        let set_a: Vec<_> = (0..40).map(single).collect();
        let set_b: Vec<_> = (0..40).rev().map(single).collect();
        let merged = merge(set_a.clone(), set_b);
        assert_eq!(merged, set_a);
    }

    #[test]
    fn test_merge_into_empty() {
        let x = alloc(&[(1, 0, 1.0)]);
        assert_eq!(merge(Vec::new(), vec![x.clone()]), vec![x]);
    }

    #[test]
    fn test_offer_lower_price_replaces() {
        let mut set = CandidateSet::new();
        set.offer(200.0, vec![alloc(&[(2, 0, 200.0)])]);
        set.offer(150.0, vec![alloc(&[(1, 0, 150.0)])]);
        assert_eq!(set.price(), Some(150.0));
        assert_eq!(set.len(), 1);
        assert_eq!(set.first(), Some(&alloc(&[(1, 0, 150.0)])));
    }

    #[test]
    fn test_offer_higher_price_ignored() {
        let mut set = CandidateSet::new();
        set.offer(150.0, vec![alloc(&[(1, 0, 150.0)])]);
        set.offer(200.0, vec![alloc(&[(2, 0, 200.0)])]);
        assert_eq!(set.price(), Some(150.0));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_offer_tie_merges() {
        let a = alloc(&[(1, 0, 100.0), (0, 0, 0.0)]);
        let b = alloc(&[(0, 0, 0.0), (1, 0, 100.0)]);
        let mut set = CandidateSet::new();
        set.offer(100.0, vec![a.clone()]);
        set.offer(100.0, vec![b.clone(), a.clone()]);
        assert_eq!(set.into_vec(), vec![a, b]);
    }

    #[test]
    fn test_offer_after_replace_forgets_old_vectors() {
        let a = alloc(&[(2, 0, 200.0)]);
        let b = alloc(&[(1, 0, 150.0)]);
        let mut set = CandidateSet::new();
        set.offer(200.0, vec![a.clone()]);
        set.offer(150.0, vec![b.clone(), b.clone()]);
        assert_eq!(set.len(), 1);
        // `a` was dropped by the replace, so a later tie may re-add it.
        set.offer(150.0, vec![a.clone()]);
        assert_eq!(set.into_vec(), vec![b, a]);
    }

    #[test]
    fn test_empty_offer_is_infeasible() {
        let mut set = CandidateSet::new();
        set.offer(0.0, Vec::new());
        assert!(set.is_empty());
        assert_eq!(set.price(), None);
        assert_eq!(set.into_first(), None);
    }
}
