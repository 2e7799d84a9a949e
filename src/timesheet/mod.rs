//! Attendance hours engine: punch categorization and month grid reconciliation.

pub mod builder;
pub mod categorizer;
pub mod grid;
pub mod policy;
pub mod store;
pub mod view;

#[cfg(test)]
pub mod testing;
