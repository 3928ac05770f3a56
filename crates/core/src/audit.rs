//! Activity log action constants.
//!
//! These must match the values written by the API handlers so the activity
//! view can filter reliably.

pub mod action_types {
    pub const LOGIN: &str = "login";
    pub const LOGOUT: &str = "logout";
    pub const MOVEMENT_REQUEST: &str = "movement_request";
    pub const MOVEMENT_APPROVE: &str = "movement_approve";
    pub const MOVEMENT_REJECT: &str = "movement_reject";
    pub const MOVEMENT_TAKE_OUT: &str = "movement_take_out";
    pub const MOVEMENT_RETURN: &str = "movement_return";
    pub const ENTITY_CREATE: &str = "entity_create";
    pub const ENTITY_UPDATE: &str = "entity_update";
    pub const ENTITY_DELETE: &str = "entity_delete";
}
