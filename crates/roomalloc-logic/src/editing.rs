//! Manual per-room edits on top of a default allocation.
//!
//! After the optimizer proposes an allocation, the booking form lets the
//! user move guests around one room at a time. An edit only touches that
//! room: its count changes and its price is recomputed, nothing is
//! re-optimized. The limits here keep edits within capacity, within the
//! guests still unassigned, and never leave children alone in a room.

use std::fmt;

use log::debug;

use crate::model::{placed_guests, Guest, Room, RoomAllocation};
use crate::pricing::room_price;

/// Which count of a room is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Adult,
    Child,
}

/// Allowed range for one room's count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditLimits {
    pub min: u32,
    pub max: u32,
    /// Children can't be edited into a room with no adult.
    pub enabled: bool,
}

impl EditLimits {
    pub fn allows(&self, value: u32) -> bool {
        self.enabled && (self.min..=self.max).contains(&value)
    }
}

/// Why a manual edit was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// Index past the end of the room list or the allocation.
    RoomOutOfRange { index: usize, rooms: usize },
    /// Field can't be edited right now (children in a room with no adult).
    Disabled { index: usize, field: EditField },
    /// Requested count outside the room's current limits.
    OutOfLimits { value: u32, min: u32, max: u32 },
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditError::RoomOutOfRange { index, rooms } => {
                write!(f, "room {} out of range ({} rooms)", index, rooms)
            }
            EditError::Disabled { index, field } => {
                write!(f, "{:?} count of room {} is not editable", field, index)
            }
            EditError::OutOfLimits { value, min, max } => {
                write!(f, "{} outside allowed range {}..={}", value, min, max)
            }
        }
    }
}

impl std::error::Error for EditError {}

/// Guests not placed in any room.
pub fn unassigned(guest: Guest, allocation: &[RoomAllocation]) -> Guest {
    let placed = placed_guests(allocation);
    Guest::new(
        guest.adult.saturating_sub(placed.adult),
        guest.child.saturating_sub(placed.child),
    )
}

/// Current limits for editing `field` of room `index`.
pub fn edit_limits(
    guest: Guest,
    rooms: &[Room],
    allocation: &[RoomAllocation],
    index: usize,
    field: EditField,
) -> Result<EditLimits, EditError> {
    let (room, current) = lookup(rooms, allocation, index)?;
    let left = unassigned(guest, allocation);
    let spare = current.spare_capacity(room);

    Ok(match field {
        EditField::Adult => EditLimits {
            min: u32::from(current.child > 0),
            max: current.adult + spare.min(left.adult),
            enabled: true,
        },
        EditField::Child => EditLimits {
            min: 0,
            max: current.child + spare.min(left.child),
            enabled: current.adult > 0,
        },
    })
}

/// Set `field` of room `index` to `value` and reprice that room.
///
/// Other rooms are left exactly as they were.
pub fn apply_edit(
    guest: Guest,
    rooms: &[Room],
    allocation: &mut [RoomAllocation],
    index: usize,
    field: EditField,
    value: u32,
) -> Result<(), EditError> {
    let limits = edit_limits(guest, rooms, allocation, index, field)?;
    if !limits.enabled {
        return Err(EditError::Disabled { index, field });
    }
    if !limits.allows(value) {
        return Err(EditError::OutOfLimits {
            value,
            min: limits.min,
            max: limits.max,
        });
    }

    let slot = &mut allocation[index];
    match field {
        EditField::Adult => slot.adult = value,
        EditField::Child => slot.child = value,
    }
    slot.price = room_price(&rooms[index], slot.occupancy());
    debug!(
        "room {} edited to {} adults, {} children, price {}",
        index, slot.adult, slot.child, slot.price
    );
    Ok(())
}

fn lookup<'a>(
    rooms: &'a [Room],
    allocation: &'a [RoomAllocation],
    index: usize,
) -> Result<(&'a Room, &'a RoomAllocation), EditError> {
    match (rooms.get(index), allocation.get(index)) {
        (Some(room), Some(current)) => Ok((room, current)),
        _ => Err(EditError::RoomOutOfRange {
            index,
            rooms: rooms.len().min(allocation.len()),
        }),
    }
}
