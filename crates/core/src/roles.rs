//! Well-known role name constants and the legacy userlevel mapping.
//!
//! Roles are not stored on the user row; they are derived from the legacy
//! numeric `userlevel` column at login and embedded in the token claims.

pub const ROLE_SUPER_ADMIN: &str = "super_admin";
pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_HR: &str = "hr";
pub const ROLE_STAFF: &str = "staff";
pub const ROLE_USER: &str = "user";

/// Map a legacy numeric userlevel to a role name.
///
/// The level groups come from the legacy user directory; any level not
/// listed falls back to the plain `user` role.
pub fn role_for_userlevel(level: i32) -> &'static str {
    match level {
        -1 | 18 | 37 => ROLE_SUPER_ADMIN,
        13 | 14 | 17 | 35 => ROLE_ADMIN,
        21 => ROLE_HR,
        3 => ROLE_STAFF,
        _ => ROLE_USER,
    }
}

/// Whether a role may decide (approve or reject) movement requests.
pub fn can_decide_movements(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_SUPER_ADMIN
}

/// Whether a role may handle physical custody (take out / return files).
///
/// Everyone except the plain `user` role qualifies.
pub fn can_handle_custody(role: &str) -> bool {
    role != ROLE_USER
}
