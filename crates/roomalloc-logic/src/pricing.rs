//! Single-room price calculation.

use crate::model::{Occupancy, Room};

/// Price of `room` holding `occupancy`.
///
/// An empty room costs nothing; otherwise the flat room price is charged
/// plus the per-head prices.
pub fn room_price(room: &Room, occupancy: Occupancy) -> f64 {
    if occupancy.is_empty() {
        return 0.0;
    }
    room.room_price
        + room.adult_price * occupancy.adult as f64
        + room.child_price * occupancy.child as f64
}

/// Extra cost of putting one more adult into a room currently holding
/// `current`. Opening an empty room pays the flat room price too.
pub fn marginal_adult_price(room: &Room, current: Occupancy) -> f64 {
    if current.is_empty() {
        room.room_price + room.adult_price
    } else {
        room.adult_price
    }
}

/// Extra cost of one more child. Only meaningful for a room that already
/// holds an adult, so the flat room price is never charged here.
pub fn marginal_child_price(room: &Room) -> f64 {
    room.child_price
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occ(adult: u32, child: u32) -> Occupancy {
        Occupancy::new(adult, child)
    }

    #[test]
    fn test_full_formula() {
        let room = Room::new(1200.0, 200.0, 300.0, 10);
        assert_eq!(room_price(&room, occ(3, 2)), 2400.0);
    }

    #[test]
    fn test_flat_room_only() {
        let room = Room::new(1000.0, 0.0, 0.0, 10);
        assert_eq!(room_price(&room, occ(3, 2)), 1000.0);
    }

    #[test]
    fn test_child_price_only() {
        let room = Room::new(0.0, 0.0, 500.0, 10);
        assert_eq!(room_price(&room, occ(3, 2)), 1000.0);
    }

    #[test]
    fn test_adult_price_only() {
        let room = Room::new(0.0, 60.0, 0.0, 10);
        assert_eq!(room_price(&room, occ(3, 2)), 180.0);
    }

    #[test]
    fn test_empty_room_is_free() {
        let room = Room::new(1000.0, 200.0, 100.0, 4);
        assert_eq!(room_price(&room, occ(0, 0)), 0.0);
    }

    #[test]
    fn test_capacity_not_checked() {
        // Pricing is total; capacity is the optimizer's and editor's concern.
        let room = Room::new(0.0, 10.0, 1.0, 1);
        assert_eq!(room_price(&room, occ(3, 3)), 33.0);
    }

    #[test]
    fn test_marginal_adult_opens_room() {
        let room = Room::new(500.0, 300.0, 200.0, 4);
        assert_eq!(marginal_adult_price(&room, occ(0, 0)), 800.0);
        assert_eq!(marginal_adult_price(&room, occ(1, 0)), 300.0);
    }

    #[test]
    fn test_marginals_sum_to_room_price() {
        let room = Room::new(500.0, 300.0, 200.0, 4);
        let total = marginal_adult_price(&room, occ(0, 0))
            + marginal_adult_price(&room, occ(1, 0))
            + marginal_child_price(&room);
        assert_eq!(total, room_price(&room, occ(2, 1)));
    }
}
