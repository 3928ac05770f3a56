//! Movement request status workflow.
//!
//! A movement request tracks a physical file leaving and re-entering storage.
//! Status ids must match the seed data in
//! `20260301000008_create_movement_status_table.sql`.
//!
//! The workflow is linear with a single branch at the approval step:
//!
//! ```text
//! Pending -> Approved -> TakenOut -> Returned
//!         \-> Rejected
//! ```
//!
//! `Rejected` and `Returned` are terminal.

use std::fmt;

/// Status of a movement request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i16)]
pub enum MovementStatus {
    /// Request filed, awaiting an approval decision.
    Pending = 1,
    /// Approved by an admin; the file may now be taken out.
    Approved = 2,
    /// Rejected by an admin (terminal). Requires a remark.
    Rejected = 3,
    /// The physical file has left storage.
    TakenOut = 4,
    /// The physical file is back in storage (terminal).
    Returned = 5,
}

impl MovementStatus {
    /// Convert a stored status id back into a status.
    ///
    /// Returns `None` for ids outside the seeded range, which indicates a
    /// corrupted row rather than a caller error.
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            1 => Some(Self::Pending),
            2 => Some(Self::Approved),
            3 => Some(Self::Rejected),
            4 => Some(Self::TakenOut),
            5 => Some(Self::Returned),
            _ => None,
        }
    }

    /// The status id as stored in `movements.status_id`.
    pub fn id(self) -> i16 {
        self as i16
    }

    /// Lowercase status name matching the `movement_status` seed data.
    pub fn name(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::TakenOut => "taken_out",
            Self::Returned => "returned",
        }
    }

    /// Terminal statuses permit no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Rejected | Self::Returned)
    }

    /// Whether the workflow permits moving from `self` to `next`.
    pub fn can_transition(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Approved)
                | (Self::Pending, Self::Rejected)
                | (Self::Approved, Self::TakenOut)
                | (Self::TakenOut, Self::Returned)
        )
    }
}

impl fmt::Display for MovementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Default label for a movement request when the client sends none.
pub const DEFAULT_MOVE_TYPE: &str = "Take Out";
