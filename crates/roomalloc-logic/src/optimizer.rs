//! Cheapest default allocation of guests to rooms.
//!
//! Dynamic programming over `(adults, children)` demand states. A state
//! `(a, c)` keeps every allocation vector tied at the cheapest price found,
//! built three ways:
//!
//! 1. everybody in one room (the same-room baseline),
//! 2. one more adult on top of each cheapest `(a - 1, c)` vector,
//! 3. one more child on top of each cheapest `(a, c - 1)` vector, only into
//!    rooms that already hold an adult.
//!
//! Capacity and the child-needs-adult rule prune placements as candidates are
//! generated, so an infeasible branch simply contributes nothing. A state with
//! no candidates poisons every state built on it.
//!
//! The search extends cheapest sub-solutions only, so it is a heuristic: it
//! can miss a cheaper split that no cheapest sub-solution leads to.

use log::{debug, trace};

use crate::candidates::CandidateSet;
use crate::model::{
    total_price, unassigned_allocation, Guest, GuestAllocation, Occupancy, Room, RoomAllocation,
};
use crate::pricing::{marginal_adult_price, marginal_child_price, room_price};

/// Default allocation for `guest` across `rooms`.
///
/// Returns one entry per room, in room order. When nobody can be placed
/// (no adults at all, or every arrangement the search reaches breaks a
/// capacity or leaves a child without an adult) every room comes back empty
/// at price 0.
pub fn allocate(guest: Guest, rooms: &[Room]) -> GuestAllocation {
    debug!(
        "allocating {} adults, {} children across {} rooms",
        guest.adult,
        guest.child,
        rooms.len()
    );
    let candidates = optimal_candidates(guest, rooms);
    let price = candidates.price();
    let tied = candidates.len();
    match candidates.into_first() {
        Some(allocation) => {
            debug!("allocation found: total {:?}, {} tied candidates", price, tied);
            allocation
        }
        None => {
            debug!("no feasible allocation, leaving guests unassigned");
            unassigned_allocation(rooms.len())
        }
    }
}

/// Every allocation tied at the cheapest price for `guest`, in generation
/// order: baseline first, then adult increments, then child increments.
///
/// Empty when `guest` has no adults or no arrangement was found.
pub fn optimal_candidates(guest: Guest, rooms: &[Room]) -> CandidateSet {
    if guest.adult == 0 {
        return CandidateSet::new();
    }
    DpTable::fill(guest, rooms).into_cell(guest.adult, guest.child)
}

/// Candidate sets for every `(a, c)` with `1 <= a <= adults`,
/// `0 <= c <= children`, stored row-major by adult count.
struct DpTable {
    children: u32,
    cells: Vec<CandidateSet>,
}

impl DpTable {
    /// Fill adults ascending, then children ascending. Cell `(a, c)` reads
    /// only `(a - 1, c)` and `(a, c - 1)`, both already filled.
    fn fill(guest: Guest, rooms: &[Room]) -> Self {
        let width = guest.child as usize + 1;
        let mut table = Self {
            children: guest.child,
            cells: Vec::with_capacity(guest.adult as usize * width),
        };

        for a in 1..=guest.adult {
            for c in 0..=guest.child {
                let mut cell = CandidateSet::new();

                offer_same_room(rooms, a, c, &mut cell);
                if a > 1 {
                    for prev in table.cell(a - 1, c) {
                        offer_extra_adult(rooms, prev, &mut cell);
                    }
                }
                if c > 0 {
                    for prev in table.cell(a, c - 1) {
                        offer_extra_child(rooms, prev, &mut cell);
                    }
                }

                trace!(
                    "cell ({}, {}): price {:?}, {} candidates",
                    a,
                    c,
                    cell.price(),
                    cell.len()
                );
                table.cells.push(cell);
            }
        }
        table
    }

    fn index(&self, adult: u32, child: u32) -> usize {
        (adult as usize - 1) * (self.children as usize + 1) + child as usize
    }

    fn cell(&self, adult: u32, child: u32) -> &CandidateSet {
        &self.cells[self.index(adult, child)]
    }

    fn into_cell(mut self, adult: u32, child: u32) -> CandidateSet {
        let index = self.index(adult, child);
        self.cells.swap_remove(index)
    }
}

/// Everybody in a single room, for every room that fits them all.
fn offer_same_room(rooms: &[Room], adult: u32, child: u32, cell: &mut CandidateSet) {
    let prices: Vec<Option<f64>> = rooms
        .iter()
        .map(|room| {
            (room.capacity >= adult + child)
                .then(|| room_price(room, Occupancy::new(adult, child)))
        })
        .collect();
    let Some(cheapest) = min_price(&prices) else {
        return;
    };

    let allocations = prices
        .iter()
        .enumerate()
        .filter(|(_, price)| **price == Some(cheapest))
        .map(|(index, _)| {
            let mut allocation = unassigned_allocation(rooms.len());
            allocation[index] = RoomAllocation::new(adult, child, cheapest);
            allocation
        })
        .collect();
    cell.offer(cheapest, allocations);
}

fn offer_extra_adult(rooms: &[Room], prev: &GuestAllocation, cell: &mut CandidateSet) {
    let marginals: Vec<Option<f64>> = rooms
        .iter()
        .zip(prev)
        .map(|(room, current)| {
            (current.spare_capacity(room) > 0)
                .then(|| marginal_adult_price(room, current.occupancy()))
        })
        .collect();
    offer_increments(rooms, prev, &marginals, cell, |slot| slot.adult += 1);
}

fn offer_extra_child(rooms: &[Room], prev: &GuestAllocation, cell: &mut CandidateSet) {
    let marginals: Vec<Option<f64>> = rooms
        .iter()
        .zip(prev)
        .map(|(room, current)| {
            (current.adult > 0 && current.spare_capacity(room) > 0)
                .then(|| marginal_child_price(room))
        })
        .collect();
    offer_increments(rooms, prev, &marginals, cell, |slot| slot.child += 1);
}

/// Place one guest in each room whose marginal cost is the cheapest, each
/// placement being its own copy of `prev`.
fn offer_increments(
    rooms: &[Room],
    prev: &GuestAllocation,
    marginals: &[Option<f64>],
    cell: &mut CandidateSet,
    place: impl Fn(&mut RoomAllocation),
) {
    let Some(cheapest) = min_price(marginals) else {
        return;
    };

    let allocations = marginals
        .iter()
        .enumerate()
        .filter(|(_, marginal)| **marginal == Some(cheapest))
        .map(|(index, _)| {
            let mut allocation = prev.clone();
            let slot = &mut allocation[index];
            place(slot);
            slot.price = room_price(&rooms[index], slot.occupancy());
            allocation
        })
        .collect();
    cell.offer(total_price(prev) + cheapest, allocations);
}

fn min_price(prices: &[Option<f64>]) -> Option<f64> {
    prices.iter().flatten().copied().reduce(f64::min)
}
