pub mod holiday;
pub mod timesheet;
