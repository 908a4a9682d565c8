//! Guests, rooms, and per-room allocations.
//!
//! Field names serialize in camelCase (`roomPrice`, `adultPrice`, ...) so the
//! same JSON the booking front-end produces can be fed straight in.

use serde::{Deserialize, Serialize};

/// Total demand for one booking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    pub adult: u32,
    pub child: u32,
}

impl Guest {
    pub fn new(adult: u32, child: u32) -> Self {
        Self { adult, child }
    }

    pub fn total(&self) -> u32 {
        self.adult + self.child
    }
}

/// A bookable room. Order in a room list is significant: allocations line up
/// with rooms by index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Flat charge applied once the room holds anybody.
    pub room_price: f64,
    pub adult_price: f64,
    pub child_price: f64,
    /// Maximum head count (adults + children).
    pub capacity: u32,
}

impl Room {
    pub fn new(room_price: f64, adult_price: f64, child_price: f64, capacity: u32) -> Self {
        Self {
            room_price,
            adult_price,
            child_price,
            capacity,
        }
    }
}

/// Head count in a single room, without price.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Occupancy {
    pub adult: u32,
    pub child: u32,
}

impl Occupancy {
    pub fn new(adult: u32, child: u32) -> Self {
        Self { adult, child }
    }

    pub fn total(&self) -> u32 {
        self.adult + self.child
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Guests placed in one room and what that room costs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomAllocation {
    pub adult: u32,
    pub child: u32,
    pub price: f64,
}

impl RoomAllocation {
    pub fn new(adult: u32, child: u32, price: f64) -> Self {
        Self {
            adult,
            child,
            price,
        }
    }

    /// An unoccupied room.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn occupancy(&self) -> Occupancy {
        Occupancy::new(self.adult, self.child)
    }

    pub fn head_count(&self) -> u32 {
        self.adult + self.child
    }

    /// Remaining head count before `room` is full.
    pub fn spare_capacity(&self, room: &Room) -> u32 {
        room.capacity.saturating_sub(self.head_count())
    }
}

/// One entry per room, same order as the room list.
pub type GuestAllocation = Vec<RoomAllocation>;

/// The "nobody could be placed" result: every room empty at price 0.
pub fn unassigned_allocation(room_count: usize) -> GuestAllocation {
    vec![RoomAllocation::empty(); room_count]
}

/// Sum of all room prices.
pub fn total_price(allocation: &[RoomAllocation]) -> f64 {
    allocation.iter().map(|a| a.price).sum()
}

/// Total adults and children placed across all rooms.
pub fn placed_guests(allocation: &[RoomAllocation]) -> Guest {
    allocation.iter().fold(Guest::default(), |acc, a| {
        Guest::new(acc.adult + a.adult, acc.child + a.child)
    })
}

/// True when no room holds anybody, which is how the optimizer reports an
/// infeasible request.
pub fn is_unassigned(allocation: &[RoomAllocation]) -> bool {
    allocation.iter().all(|a| a.head_count() == 0)
}
