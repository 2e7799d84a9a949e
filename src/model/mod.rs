pub mod attendance;
pub mod holiday;
