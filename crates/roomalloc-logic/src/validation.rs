//! Sanity checks for guest/room input loaded from outside the process.
//!
//! The optimizer assumes clean input and never checks it; callers that read
//! rooms from files or requests run `validate_input` first.

use std::fmt;

use crate::model::{Guest, Room};

/// Which price field of a room is bad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceField {
    Room,
    Adult,
    Child,
}

/// Input validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Guests to place but no rooms to place them in.
    NoRooms,
    /// Price below zero.
    NegativePrice { room: usize, field: PriceField },
    /// NaN or infinite price.
    NonFinitePrice { room: usize, field: PriceField },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::NoRooms => write!(f, "guests given but no rooms"),
            InputError::NegativePrice { room, field } => {
                write!(f, "room {} has a negative {:?} price", room, field)
            }
            InputError::NonFinitePrice { room, field } => {
                write!(f, "room {} has a non-finite {:?} price", room, field)
            }
        }
    }
}

impl std::error::Error for InputError {}

/// Validate guests and rooms, returning all errors found.
pub fn validate_input(guest: Guest, rooms: &[Room]) -> Vec<InputError> {
    let mut errors = Vec::new();

    if rooms.is_empty() && guest.total() > 0 {
        errors.push(InputError::NoRooms);
    }

    for (index, room) in rooms.iter().enumerate() {
        for (field, price) in [
            (PriceField::Room, room.room_price),
            (PriceField::Adult, room.adult_price),
            (PriceField::Child, room.child_price),
        ] {
            if !price.is_finite() {
                errors.push(InputError::NonFinitePrice { room: index, field });
            } else if price < 0.0 {
                errors.push(InputError::NegativePrice { room: index, field });
            }
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_input() {
        let rooms = vec![Room::new(1000.0, 200.0, 100.0, 4), Room::new(0.0, 0.0, 0.0, 0)];
        assert!(validate_input(Guest::new(4, 2), &rooms).is_empty());
    }

    #[test]
    fn test_no_rooms() {
        assert_eq!(
            validate_input(Guest::new(1, 0), &[]),
            vec![InputError::NoRooms]
        );
        assert!(validate_input(Guest::new(0, 0), &[]).is_empty());
    }

    #[test]
    fn test_negative_price() {
        let rooms = vec![Room::new(100.0, -1.0, 0.0, 2)];
        assert_eq!(
            validate_input(Guest::new(1, 0), &rooms),
            vec![InputError::NegativePrice {
                room: 0,
                field: PriceField::Adult
            }]
        );
    }

    #[test]
    fn test_non_finite_prices_all_reported() {
        let rooms = vec![
            Room::new(0.0, 0.0, 0.0, 2),
            Room::new(f64::NAN, 0.0, f64::INFINITY, 2),
        ];
        let errors = validate_input(Guest::new(1, 0), &rooms);
        assert_eq!(errors.len(), 2);
        assert!(errors.contains(&InputError::NonFinitePrice {
            room: 1,
            field: PriceField::Room
        }));
        assert!(errors.contains(&InputError::NonFinitePrice {
            room: 1,
            field: PriceField::Child
        }));
    }

    #[test]
    fn test_display() {
        let err = InputError::NegativePrice {
            room: 2,
            field: PriceField::Child,
        };
        assert_eq!(err.to_string(), "room 2 has a negative Child price");
    }
}
